//! Dynamic form engine
//!
//! An admin-authored form definition is a list of field descriptors. At
//! submission time the descriptor list drives construction of a runtime
//! validation schema and a multipart-aware payload assembler: ordinary
//! fields are validated per kind (with repeated-key coercion into arrays
//! for checkbox groups), file parts are checked against per-file and
//! aggregate size limits plus a content-type allowlist, and the result is
//! a canonical JSON payload with base64-encoded file blobs, ready to
//! persist as one document.
//!
//! The engine is pure: no I/O, no clock, no database. Callers assemble a
//! [`RawSubmission`] from the transport layer and receive either a
//! [`ValidatedSubmission`] or a [`SubmissionError`] with full detail.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod limits;
pub mod submission;

pub use descriptor::{parse_fields, validate_definition, FieldDescriptor, FieldKind};
pub use engine::{validate_submission, ValidatedSubmission};
pub use error::{FieldError, SubmissionError};
pub use limits::{sanitize_filename, FileRules};
pub use submission::{FilePart, RawSubmission};
