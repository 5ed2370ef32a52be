//! Domain models
//!
//! One module per entity family: content catalog entities, intake
//! (submissions and form definitions), consent events, and admin users.
//! Row structs derive `sqlx::FromRow`; response and input DTOs carry
//! `utoipa::ToSchema` for the API docs.

pub mod admin_user;
pub mod consent;
pub mod contact;
pub mod faq;
pub mod form;
pub mod job;
pub mod post;
pub mod service_offering;
pub mod testimonial;
pub mod work;

pub use admin_user::AdminUser;
pub use consent::{ConsentEvent, ConsentEventResponse, RecordConsentRequest};
pub use contact::{ContactSubmission, ContactSubmissionResponse, CreateContactRequest};
pub use faq::{FaqEntry, FaqEntryInput, FaqEntryResponse};
pub use form::{
    FormDefinition, FormDefinitionInput, FormDefinitionResponse, FormSubmission,
    FormSubmissionResponse, JobApplication, JobApplicationResponse, StoredFile,
};
pub use job::{Job, JobInput, JobResponse};
pub use post::{Post, PostInput, PostResponse};
pub use service_offering::{ServiceOffering, ServiceOfferingInput, ServiceOfferingResponse};
pub use testimonial::{Testimonial, TestimonialInput, TestimonialResponse};
pub use work::{Work, WorkInput, WorkResponse};
