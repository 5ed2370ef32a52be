//! Multipart helpers for the submission endpoints.
//!
//! Turns an axum `Multipart` stream into the form engine's
//! [`RawSubmission`]: parts with a filename become file parts, everything
//! else is a text value, and repeated keys accumulate.

use axum::extract::Multipart;
use makeuslive_core::AppError;
use makeuslive_forms::{FilePart, RawSubmission};

/// Upper bound on parts per request, against pathological multipart bodies.
const MAX_PARTS: usize = 256;

/// Drain the multipart stream into a [`RawSubmission`].
pub async fn collect_submission(mut multipart: Multipart) -> Result<RawSubmission, AppError> {
    let mut raw = RawSubmission::new();
    let mut parts = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        parts += 1;
        if parts > MAX_PARTS {
            return Err(AppError::InvalidInput(format!(
                "Too many multipart parts (max {})",
                MAX_PARTS
            )));
        }

        let name = match field.name() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                return Err(AppError::InvalidInput(
                    "Multipart part is missing a field name".to_string(),
                ))
            }
        };

        if let Some(filename) = field.file_name().map(|s| s.to_string()) {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;
            raw.push_file(FilePart {
                field: name,
                filename,
                content_type,
                data: data.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field: {}", e)))?;
            raw.push_value(name, value);
        }
    }

    Ok(raw)
}

/// Fetch the single non-empty text value of an ordinary field, if present.
pub fn single_value<'a>(raw: &'a RawSubmission, name: &str) -> Option<&'a str> {
    raw.values()
        .get(name)
        .and_then(|vs| vs.iter().find(|v| !v.is_empty()))
        .map(String::as_str)
}
