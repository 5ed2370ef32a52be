//! Database repositories for data access layer
//!
//! Repositories are organized into content/ (the public catalog entities),
//! intake/ (form definitions, submissions, consent events) and control/
//! (admin accounts). Each repository is responsible for a specific domain
//! entity and provides CRUD operations and specialized queries.
//
// Content catalog repositories (posts, works, services, jobs, testimonials, FAQ)
pub mod content;
//
// Intake repositories (contact, dynamic forms, applications, consent)
pub mod intake;
//
// Control repositories (admin accounts)
pub mod control;
