pub mod consent;
pub mod contact;
pub mod form_definition;
pub mod form_submission;
pub mod job_application;

pub use consent::ConsentRepository;
pub use contact::ContactRepository;
pub use form_definition::FormDefinitionRepository;
pub use form_submission::FormSubmissionRepository;
pub use job_application::JobApplicationRepository;
