//! Field descriptors
//!
//! The typed representation of an admin-authored form definition. The
//! database stores the descriptor list as JSONB; [`parse_fields`] is the
//! single place that turns that document back into typed descriptors.

use makeuslive_core::constants::MAX_FORM_FIELDS;
use serde::{Deserialize, Serialize};

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Select,
    Radio,
    Checkbox,
    File,
}

impl FieldKind {
    /// Kinds whose submitted value must come from `options`.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox)
    }
}

/// One field of a form definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Machine name, unique within the form; doubles as the multipart
    /// field name and the payload key.
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Permitted values for choice kinds; must be empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
    /// Maximum value length in characters for text-like kinds.
    #[serde(default)]
    pub max_len: Option<usize>,
}

fn is_valid_field_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Parse a JSONB descriptor document into typed descriptors.
pub fn parse_fields(fields: &serde_json::Value) -> Result<Vec<FieldDescriptor>, String> {
    serde_json::from_value(fields.clone()).map_err(|e| format!("Invalid field list: {}", e))
}

/// Validate a descriptor list before it is persisted. Returns the first
/// problem found, phrased for the admin author.
pub fn validate_definition(fields: &[FieldDescriptor]) -> Result<(), String> {
    if fields.is_empty() {
        return Err("A form must have at least one field".to_string());
    }
    if fields.len() > MAX_FORM_FIELDS {
        return Err(format!("A form may have at most {} fields", MAX_FORM_FIELDS));
    }

    let mut seen = std::collections::HashSet::new();
    for field in fields {
        if !is_valid_field_id(&field.id) {
            return Err(format!(
                "Field id '{}' is invalid: use lowercase letters, digits, '_' or '-', max 64 chars",
                field.id
            ));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(format!("Duplicate field id '{}'", field.id));
        }
        if field.label.trim().is_empty() {
            return Err(format!("Field '{}' is missing a label", field.id));
        }
        if field.kind.is_choice() {
            if field.options.is_empty() {
                return Err(format!(
                    "Field '{}' is a choice field and must list options",
                    field.id
                ));
            }
            let mut opts = std::collections::HashSet::new();
            for opt in &field.options {
                if opt.is_empty() {
                    return Err(format!("Field '{}' has an empty option", field.id));
                }
                if !opts.insert(opt.as_str()) {
                    return Err(format!("Field '{}' repeats option '{}'", field.id, opt));
                }
            }
        } else if !field.options.is_empty() {
            return Err(format!(
                "Field '{}' is not a choice field and must not list options",
                field.id
            ));
        }
        if field.kind == FieldKind::File && field.max_len.is_some() {
            return Err(format!("File field '{}' cannot have max_len", field.id));
        }
        if let Some(0) = field.max_len {
            return Err(format!("Field '{}' has max_len 0", field.id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(id: &str) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            label: "Label".to_string(),
            kind: FieldKind::Text,
            required: false,
            options: vec![],
            max_len: None,
        }
    }

    #[test]
    fn parses_descriptor_document() {
        let doc = serde_json::json!([
            {"id": "name", "label": "Your name", "kind": "text", "required": true},
            {"id": "topics", "label": "Topics", "kind": "checkbox",
             "options": ["web", "brand", "motion"]},
        ]);
        let fields = parse_fields(&doc).expect("parse");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].kind, FieldKind::Text);
        assert!(fields[0].required);
        assert_eq!(fields[1].options.len(), 3);
    }

    #[test]
    fn rejects_unknown_kind() {
        let doc = serde_json::json!([{"id": "x", "label": "X", "kind": "captcha"}]);
        assert!(parse_fields(&doc).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let fields = vec![text_field("a"), text_field("a")];
        let err = validate_definition(&fields).unwrap_err();
        assert!(err.contains("Duplicate"));
    }

    #[test]
    fn rejects_bad_field_id() {
        let fields = vec![text_field("Bad Id")];
        assert!(validate_definition(&fields).is_err());
    }

    #[test]
    fn choice_requires_options() {
        let mut f = text_field("pick");
        f.kind = FieldKind::Select;
        let err = validate_definition(&[f]).unwrap_err();
        assert!(err.contains("options"));
    }

    #[test]
    fn non_choice_rejects_options() {
        let mut f = text_field("note");
        f.options = vec!["a".to_string()];
        assert!(validate_definition(&[f]).is_err());
    }

    #[test]
    fn empty_definition_rejected() {
        assert!(validate_definition(&[]).is_err());
    }
}
