//! Workspace-wide constants.

/// Default per-file attachment size limit in MiB.
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 5;

/// Default aggregate size limit for one submission's attachments in MiB.
pub const DEFAULT_MAX_TOTAL_SIZE_MB: usize = 15;

/// Default content-type allowlist for dynamic form attachments.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/webp",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Content-type allowlist for job application resumes.
pub const RESUME_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Maximum accepted filename length after sanitization.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Maximum number of fields an admin-authored form definition may carry.
pub const MAX_FORM_FIELDS: usize = 64;

/// Consent category implied true on every consent event.
pub const CONSENT_CATEGORY_NECESSARY: &str = "necessary";
