//! Request fixtures shared across integration tests.

use serde_json::json;

pub fn post_input(slug: &str, published: bool) -> serde_json::Value {
    json!({
        "slug": slug,
        "title": "Designing for motion",
        "excerpt": "Notes from a recent build",
        "body": "<p>Long-form body</p>",
        "tags": ["design", "motion"],
        "published": published,
    })
}

pub fn job_input(slug: &str, open: bool) -> serde_json::Value {
    json!({
        "slug": slug,
        "title": "Senior Creative Developer",
        "location": "Remote",
        "employment_type": "full-time",
        "body": "<p>Build delightful sites</p>",
        "open": open,
    })
}

/// A project-brief form: required text and email, a checkbox group, an
/// optional file field.
pub fn form_definition_input(slug: &str, published: bool) -> serde_json::Value {
    json!({
        "slug": slug,
        "name": "Project brief",
        "description": "Tell us about your project",
        "fields": [
            {"id": "name", "label": "Your name", "kind": "text", "required": true},
            {"id": "email", "label": "Email", "kind": "email", "required": true},
            {"id": "topics", "label": "Topics", "kind": "checkbox",
             "options": ["web", "brand", "motion"]},
            {"id": "brief", "label": "Brief", "kind": "file"},
        ],
        "published": published,
    })
}

/// Minimal bytes that pass as a PDF attachment in tests.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n".to_vec()
}
