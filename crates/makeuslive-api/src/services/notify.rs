//! Best-effort notification fan-out.
//!
//! Emails go out on a spawned task after the submission row is committed.
//! Failures are logged at warn and never surface to the submitter.

use makeuslive_core::models::{ContactSubmission, JobApplication, StoredFile};
use serde_json::Value;

use crate::services::email::EmailService;

/// Fire-and-forget send. Safe to call with `None` (notifications disabled)
/// or an empty recipient list.
pub fn spawn_notification(
    email: Option<EmailService>,
    recipients: Vec<String>,
    subject: String,
    body: String,
) {
    let Some(service) = email else {
        return;
    };
    if recipients.is_empty() {
        return;
    }
    tokio::spawn(async move {
        if let Err(err) = service.send(&recipients, &subject, &body).await {
            tracing::warn!(error = %err, subject = %subject, "Notification email failed");
        }
    });
}

pub fn contact_notification(submission: &ContactSubmission) -> (String, String) {
    let subject = format!("New contact message from {}", submission.name);
    let mut body = format!(
        "Name: {}\nEmail: {}\n",
        submission.name, submission.email
    );
    if let Some(phone) = &submission.phone {
        body.push_str(&format!("Phone: {}\n", phone));
    }
    if let Some(company) = &submission.company {
        body.push_str(&format!("Company: {}\n", company));
    }
    body.push_str(&format!("\n{}\n", submission.message));
    (subject, body)
}

pub fn application_notification(job_title: &str, application: &JobApplication) -> (String, String) {
    let subject = format!(
        "New application for {}: {}",
        job_title, application.applicant_name
    );
    let mut body = format!(
        "Position: {}\nApplicant: {}\nEmail: {}\n",
        job_title, application.applicant_name, application.email
    );
    if let Some(phone) = &application.phone {
        body.push_str(&format!("Phone: {}\n", phone));
    }
    if let Ok(resume) = serde_json::from_value::<StoredFile>(application.resume.clone()) {
        body.push_str(&format!(
            "Resume: {} ({} bytes)\n",
            resume.filename, resume.size
        ));
    }
    if !application.cover_letter.is_empty() {
        body.push_str(&format!("\n{}\n", application.cover_letter));
    }
    (subject, body)
}

/// Render the canonical payload of a dynamic form submission. Files are
/// listed by name and size only; blobs never go over email.
pub fn form_notification(
    form_name: &str,
    payload: &Value,
    files: &[StoredFile],
) -> (String, String) {
    let subject = format!("New '{}' form submission", form_name);
    let mut body = String::new();
    if let Some(map) = payload.as_object() {
        for (key, value) in map {
            match value {
                Value::Array(items) => {
                    let joined = items
                        .iter()
                        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    body.push_str(&format!("{}: {}\n", key, joined));
                }
                Value::String(s) => body.push_str(&format!("{}: {}\n", key, s)),
                other => body.push_str(&format!("{}: {}\n", key, other)),
            }
        }
    }
    for file in files {
        body.push_str(&format!(
            "Attachment: {} ({} bytes)\n",
            file.filename, file.size
        ));
    }
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn contact_body_includes_optional_fields() {
        let submission = ContactSubmission {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            company: None,
            message: "We need a site".to_string(),
            created_at: Utc::now(),
        };
        let (subject, body) = contact_notification(&submission);
        assert!(subject.contains("Ada"));
        assert!(body.contains("Phone: +1 555 0100"));
        assert!(!body.contains("Company:"));
        assert!(body.contains("We need a site"));
    }

    #[test]
    fn form_body_renders_arrays_and_files() {
        let payload = serde_json::json!({
            "name": "Ada",
            "topics": ["web", "brand"],
            "budget": 15000.0,
        });
        let files = vec![StoredFile {
            filename: "brief.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 2048,
            data: Some("ignored".to_string()),
        }];
        let (subject, body) = form_notification("project-brief", &payload, &files);
        assert!(subject.contains("project-brief"));
        assert!(body.contains("topics: web, brand"));
        assert!(body.contains("budget: 15000"));
        assert!(body.contains("Attachment: brief.pdf (2048 bytes)"));
        assert!(!body.contains("ignored"));
    }
}
