//! Submission error types
//!
//! Field-level validation problems accumulate into one
//! [`SubmissionError::Invalid`]; size and content-type violations short
//! circuit with a human-readable message of their own.

use serde::Serialize;

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Field id from the definition (or the offending submitted key)
    pub field: String,
    /// Machine-readable code (e.g. "required", "invalid_option")
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Submission failed validation ({} field error(s))", .0.len())]
    Invalid(Vec<FieldError>),

    #[error("File '{filename}' is {size} bytes, exceeding the {max} byte limit")]
    FileTooLarge {
        filename: String,
        size: usize,
        max: usize,
    },

    #[error("Attachments total {total} bytes, exceeding the {max} byte limit")]
    TotalTooLarge { total: usize, max: usize },

    #[error("File '{filename}' has unsupported content type '{content_type}'")]
    UnsupportedContentType {
        filename: String,
        content_type: String,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file '{0}'")]
    EmptyFile(String),
}
