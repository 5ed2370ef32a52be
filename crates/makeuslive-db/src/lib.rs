//! Make Us Live database layer
//!
//! Repository implementations over sqlx/Postgres. See `db` module for the
//! per-domain organization.

pub mod db;

pub use db::content::{
    FaqRepository, JobRepository, PostRepository, ServiceOfferingRepository,
    TestimonialRepository, WorkRepository,
};
pub use db::control::AdminUserRepository;
pub use db::intake::{
    ConsentRepository, ContactRepository, FormDefinitionRepository, FormSubmissionRepository,
    JobApplicationRepository,
};
