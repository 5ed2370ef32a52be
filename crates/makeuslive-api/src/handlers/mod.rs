//! HTTP handlers, one module per resource. Each module carries both the
//! public read surface and the admin CRUD surface for its entity.

pub mod applications;
pub mod auth;
pub mod consent;
pub mod contact;
pub mod faqs;
pub mod forms;
pub mod health;
pub mod jobs;
pub mod posts;
pub mod service_offerings;
pub mod testimonials;
pub mod works;
