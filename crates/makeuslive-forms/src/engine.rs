//! Runtime submission validation
//!
//! [`validate_submission`] is the whole pipeline: file rules first (size
//! and content type short-circuit with a human-readable error), then every
//! field is checked against its descriptor with errors accumulating, and
//! finally the canonical payload is assembled. Checkbox groups always
//! serialize as arrays, numbers as JSON numbers, everything else as
//! strings.

use base64::Engine as _;
use makeuslive_core::models::StoredFile;
use makeuslive_core::validation::{is_valid_date, is_valid_email, is_valid_phone};
use serde_json::Value;

use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::error::{FieldError, SubmissionError};
use crate::limits::{sanitize_filename, FileRules};
use crate::submission::RawSubmission;

/// The outcome of a successful validation: a canonical JSON payload plus
/// the file blobs, base64-encoded and ready to persist inline.
#[derive(Debug)]
pub struct ValidatedSubmission {
    pub payload: serde_json::Map<String, Value>,
    pub files: Vec<StoredFile>,
}

/// Validate a raw submission against a descriptor list and file rules.
pub fn validate_submission(
    fields: &[FieldDescriptor],
    raw: RawSubmission,
    rules: &FileRules,
) -> Result<ValidatedSubmission, SubmissionError> {
    // Filenames are checked before sizes so traversal attempts never get
    // as far as limit accounting.
    let mut sanitized_names = Vec::with_capacity(raw.files().len());
    for file in raw.files() {
        sanitized_names.push(sanitize_filename(&file.filename)?);
    }
    rules.check(raw.files())?;

    let mut errors: Vec<FieldError> = Vec::new();
    let mut payload = serde_json::Map::new();

    for field in fields {
        match field.kind {
            FieldKind::File => validate_file_field(field, &raw, &mut errors),
            _ => validate_value_field(field, &raw, &mut payload, &mut errors),
        }
    }

    // Submitted keys that no descriptor claims.
    for key in raw.values().keys() {
        if !fields.iter().any(|f| f.id == *key) {
            errors.push(FieldError::new(
                key.clone(),
                "unknown_field",
                format!("'{}' is not a field of this form", key),
            ));
        }
    }
    for file in raw.files() {
        let descriptor = fields.iter().find(|f| f.id == file.field);
        match descriptor {
            Some(f) if f.kind == FieldKind::File => {}
            Some(_) => errors.push(FieldError::new(
                file.field.clone(),
                "unexpected_file",
                format!("'{}' does not accept file uploads", file.field),
            )),
            None => errors.push(FieldError::new(
                file.field.clone(),
                "unknown_field",
                format!("'{}' is not a field of this form", file.field),
            )),
        }
    }

    if !errors.is_empty() {
        return Err(SubmissionError::Invalid(errors));
    }

    let files = raw
        .into_files()
        .into_iter()
        .zip(sanitized_names)
        .map(|(part, filename)| StoredFile {
            filename,
            content_type: part.content_type,
            size: part.data.len() as i64,
            data: Some(base64::engine::general_purpose::STANDARD.encode(&part.data)),
        })
        .collect();

    Ok(ValidatedSubmission { payload, files })
}

fn validate_file_field(field: &FieldDescriptor, raw: &RawSubmission, errors: &mut Vec<FieldError>) {
    let count = raw.files().iter().filter(|f| f.field == field.id).count();
    if field.required && count == 0 {
        errors.push(FieldError::new(
            field.id.clone(),
            "required",
            format!("'{}' requires a file", field.label),
        ));
    }
    // A text value arriving under a file field id is a client bug.
    if raw.values().contains_key(&field.id) {
        errors.push(FieldError::new(
            field.id.clone(),
            "invalid_value",
            format!("'{}' only accepts file uploads", field.label),
        ));
    }
}

fn validate_value_field(
    field: &FieldDescriptor,
    raw: &RawSubmission,
    payload: &mut serde_json::Map<String, Value>,
    errors: &mut Vec<FieldError>,
) {
    // Empty occurrences count as absent: browsers submit empty strings for
    // untouched inputs.
    let values: Vec<&str> = raw
        .values()
        .get(&field.id)
        .map(|vs| {
            vs.iter()
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if values.is_empty() {
        if field.required {
            errors.push(FieldError::new(
                field.id.clone(),
                "required",
                format!("'{}' is required", field.label),
            ));
        }
        return;
    }

    if let Some(max) = field.max_len {
        if values.iter().any(|v| v.chars().count() > max) {
            errors.push(FieldError::new(
                field.id.clone(),
                "too_long",
                format!("'{}' exceeds {} characters", field.label, max),
            ));
            return;
        }
    }

    if field.kind == FieldKind::Checkbox {
        // Repeated keys coerce into an array; a single occurrence becomes a
        // one-element array.
        let mut selected = Vec::with_capacity(values.len());
        for value in &values {
            if !field.options.iter().any(|opt| opt == value) {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_option",
                    format!("'{}' is not an option of '{}'", value, field.label),
                ));
                return;
            }
            selected.push(Value::String(value.to_string()));
        }
        payload.insert(field.id.clone(), Value::Array(selected));
        return;
    }

    if values.len() > 1 {
        errors.push(FieldError::new(
            field.id.clone(),
            "multiple_values",
            format!("'{}' accepts a single value", field.label),
        ));
        return;
    }
    let value = values[0];

    match field.kind {
        FieldKind::Text | FieldKind::Textarea => {
            payload.insert(field.id.clone(), Value::String(value.to_string()));
        }
        FieldKind::Email => {
            if is_valid_email(value) {
                payload.insert(field.id.clone(), Value::String(value.to_string()));
            } else {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_email",
                    format!("'{}' must be a valid email address", field.label),
                ));
            }
        }
        FieldKind::Phone => {
            if is_valid_phone(value) {
                payload.insert(field.id.clone(), Value::String(value.to_string()));
            } else {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_phone",
                    format!("'{}' must be a valid phone number", field.label),
                ));
            }
        }
        FieldKind::Number => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                // from_f64 only fails on non-finite values, checked above
                let number = serde_json::Number::from_f64(n)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(value.to_string()));
                payload.insert(field.id.clone(), number);
            }
            _ => {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_number",
                    format!("'{}' must be a number", field.label),
                ));
            }
        },
        FieldKind::Date => {
            if is_valid_date(value) {
                payload.insert(field.id.clone(), Value::String(value.to_string()));
            } else {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_date",
                    format!("'{}' must be a date in YYYY-MM-DD format", field.label),
                ));
            }
        }
        FieldKind::Select | FieldKind::Radio => {
            if field.options.iter().any(|opt| opt == value) {
                payload.insert(field.id.clone(), Value::String(value.to_string()));
            } else {
                errors.push(FieldError::new(
                    field.id.clone(),
                    "invalid_option",
                    format!("'{}' is not an option of '{}'", value, field.label),
                ));
            }
        }
        FieldKind::Checkbox | FieldKind::File => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::FilePart;

    fn field(id: &str, kind: FieldKind, required: bool) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            label: id.to_string(),
            kind,
            required,
            options: vec![],
            max_len: None,
        }
    }

    fn choice(id: &str, kind: FieldKind, options: &[&str]) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            label: id.to_string(),
            kind,
            required: false,
            options: options.iter().map(|s| s.to_string()).collect(),
            max_len: None,
        }
    }

    fn rules() -> FileRules {
        FileRules::new(
            1024,
            2048,
            vec!["application/pdf".to_string(), "text/plain".to_string()],
        )
    }

    fn pdf(field: &str, len: usize) -> FilePart {
        FilePart {
            field: field.to_string(),
            filename: "file.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![1u8; len],
        }
    }

    fn field_codes(err: SubmissionError) -> Vec<(String, &'static str)> {
        match err {
            SubmissionError::Invalid(errors) => {
                errors.into_iter().map(|e| (e.field, e.code)).collect()
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn happy_path_builds_canonical_payload() {
        let fields = vec![
            field("name", FieldKind::Text, true),
            field("email", FieldKind::Email, true),
            field("budget", FieldKind::Number, false),
            choice("topics", FieldKind::Checkbox, &["web", "brand"]),
        ];
        let mut raw = RawSubmission::new();
        raw.push_value("name", "Ada Lovelace");
        raw.push_value("email", "ada@example.com");
        raw.push_value("budget", "15000");
        raw.push_value("topics", "web");
        raw.push_value("topics", "brand");

        let out = validate_submission(&fields, raw, &rules()).expect("valid");
        assert_eq!(out.payload["name"], "Ada Lovelace");
        assert_eq!(out.payload["budget"], serde_json::json!(15000.0));
        assert_eq!(out.payload["topics"], serde_json::json!(["web", "brand"]));
        assert!(out.files.is_empty());
    }

    #[test]
    fn single_checkbox_occurrence_becomes_array() {
        let fields = vec![choice("topics", FieldKind::Checkbox, &["web", "brand"])];
        let mut raw = RawSubmission::new();
        raw.push_value("topics", "web");

        let out = validate_submission(&fields, raw, &rules()).expect("valid");
        assert_eq!(out.payload["topics"], serde_json::json!(["web"]));
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let fields = vec![
            field("name", FieldKind::Text, true),
            field("email", FieldKind::Email, true),
            field("when", FieldKind::Date, false),
        ];
        let mut raw = RawSubmission::new();
        raw.push_value("email", "not-an-email");
        raw.push_value("when", "tomorrow");

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes.len(), 3);
        assert!(codes.contains(&("name".to_string(), "required")));
        assert!(codes.contains(&("email".to_string(), "invalid_email")));
        assert!(codes.contains(&("when".to_string(), "invalid_date")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let fields = vec![field("name", FieldKind::Text, false)];
        let mut raw = RawSubmission::new();
        raw.push_value("name", "Ada");
        raw.push_value("extra", "surprise");

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("extra".to_string(), "unknown_field")]);
    }

    #[test]
    fn empty_optional_field_is_omitted() {
        let fields = vec![
            field("name", FieldKind::Text, true),
            field("phone", FieldKind::Phone, false),
        ];
        let mut raw = RawSubmission::new();
        raw.push_value("name", "Ada");
        raw.push_value("phone", "");

        let out = validate_submission(&fields, raw, &rules()).expect("valid");
        assert!(!out.payload.contains_key("phone"));
    }

    #[test]
    fn repeated_single_value_field_rejected() {
        let fields = vec![field("name", FieldKind::Text, false)];
        let mut raw = RawSubmission::new();
        raw.push_value("name", "Ada");
        raw.push_value("name", "Grace");

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("name".to_string(), "multiple_values")]);
    }

    #[test]
    fn invalid_checkbox_option_rejected() {
        let fields = vec![choice("topics", FieldKind::Checkbox, &["web"])];
        let mut raw = RawSubmission::new();
        raw.push_value("topics", "web");
        raw.push_value("topics", "space-lasers");

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("topics".to_string(), "invalid_option")]);
    }

    #[test]
    fn max_len_enforced() {
        let mut f = field("name", FieldKind::Text, false);
        f.max_len = Some(3);
        let mut raw = RawSubmission::new();
        raw.push_value("name", "Adaline");

        let codes = field_codes(validate_submission(&[f], raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("name".to_string(), "too_long")]);
    }

    #[test]
    fn required_file_field_needs_a_part() {
        let fields = vec![field("resume", FieldKind::File, true)];
        let raw = RawSubmission::new();

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("resume".to_string(), "required")]);
    }

    #[test]
    fn file_on_non_file_field_rejected() {
        let fields = vec![field("name", FieldKind::Text, false)];
        let mut raw = RawSubmission::new();
        raw.push_file(pdf("name", 10));

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("name".to_string(), "unexpected_file")]);
    }

    #[test]
    fn file_size_violation_short_circuits_field_errors() {
        // Size problems are a different error class than field errors.
        let fields = vec![
            field("name", FieldKind::Text, true),
            field("resume", FieldKind::File, false),
        ];
        let mut raw = RawSubmission::new();
        raw.push_file(pdf("resume", 4096));

        let err = validate_submission(&fields, raw, &rules()).unwrap_err();
        assert!(matches!(err, SubmissionError::FileTooLarge { .. }));
    }

    #[test]
    fn files_are_base64_encoded() {
        let fields = vec![field("resume", FieldKind::File, true)];
        let mut raw = RawSubmission::new();
        raw.push_file(FilePart {
            field: "resume".to_string(),
            filename: "hi.txt".to_string(),
            content_type: "text/plain".to_string(),
            data: b"hi".to_vec(),
        });

        let out = validate_submission(&fields, raw, &rules()).expect("valid");
        assert_eq!(out.files.len(), 1);
        assert_eq!(out.files[0].filename, "hi.txt");
        assert_eq!(out.files[0].size, 2);
        assert_eq!(out.files[0].data.as_deref(), Some("aGk="));
    }

    #[test]
    fn number_rejects_non_finite() {
        let fields = vec![field("budget", FieldKind::Number, false)];
        let mut raw = RawSubmission::new();
        raw.push_value("budget", "NaN");

        let codes = field_codes(validate_submission(&fields, raw, &rules()).unwrap_err());
        assert_eq!(codes, vec![("budget".to_string(), "invalid_number")]);
    }
}
