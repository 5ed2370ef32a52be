//! Dynamic form models: admin-authored definitions, submissions, and job
//! applications.
//!
//! Field descriptors are stored as JSONB and kept opaque
//! (`serde_json::Value`) at this layer; the form engine crate owns their
//! typed representation and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A file attachment persisted inline with its submission, base64-encoded.
/// `data` is omitted from list responses and only rendered on detail reads.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    /// Base64-encoded file bytes. Absent in list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl StoredFile {
    /// Copy with the blob dropped, for list responses.
    pub fn without_data(&self) -> StoredFile {
        StoredFile {
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            data: None,
        }
    }
}

/// Admin-authored form definition row. `fields` holds the descriptor list
/// as JSONB; the optional limit columns narrow the workspace defaults.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormDefinition {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub fields: serde_json::Value,
    pub max_file_size_bytes: Option<i64>,
    pub max_total_size_bytes: Option<i64>,
    pub allowed_content_types: Option<Vec<String>>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormDefinitionResponse {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Field descriptor list, served to the client for rendering
    #[schema(value_type = Object)]
    pub fields: serde_json::Value,
    pub max_file_size_bytes: Option<i64>,
    pub max_total_size_bytes: Option<i64>,
    pub allowed_content_types: Option<Vec<String>>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input DTO for creating or replacing a form definition. The descriptor
/// list is validated by the form engine before persisting.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FormDefinitionInput {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub fields: serde_json::Value,
    #[serde(default)]
    pub max_file_size_bytes: Option<i64>,
    #[serde(default)]
    pub max_total_size_bytes: Option<i64>,
    #[serde(default)]
    pub allowed_content_types: Option<Vec<String>>,
    #[serde(default)]
    pub published: bool,
}

impl From<FormDefinition> for FormDefinitionResponse {
    fn from(f: FormDefinition) -> Self {
        FormDefinitionResponse {
            id: f.id,
            slug: f.slug,
            name: f.name,
            description: f.description,
            fields: f.fields,
            max_file_size_bytes: f.max_file_size_bytes,
            max_total_size_bytes: f.max_total_size_bytes,
            allowed_content_types: f.allowed_content_types,
            published: f.published,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// One validated submission: canonical payload plus inline file blobs,
/// persisted as a single row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormSubmission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub payload: serde_json::Value,
    pub files: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormSubmissionResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub files: Vec<StoredFile>,
    pub created_at: DateTime<Utc>,
}

impl FormSubmission {
    fn parse_files(&self) -> Vec<StoredFile> {
        serde_json::from_value(self.files.clone()).unwrap_or_default()
    }

    /// Response with file blobs included (detail reads).
    pub fn into_detail_response(self) -> FormSubmissionResponse {
        let files = self.parse_files();
        FormSubmissionResponse {
            id: self.id,
            form_id: self.form_id,
            payload: self.payload,
            files,
            created_at: self.created_at,
        }
    }

    /// Response with file blobs stripped (list reads).
    pub fn into_list_response(self) -> FormSubmissionResponse {
        let files = self.parse_files().iter().map(StoredFile::without_data).collect();
        FormSubmissionResponse {
            id: self.id,
            form_id: self.form_id,
            payload: self.payload,
            files,
            created_at: self.created_at,
        }
    }
}

/// Job application row. The resume is a single `StoredFile` as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: String,
    pub resume: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: String,
    pub resume: Option<StoredFile>,
    pub created_at: DateTime<Utc>,
}

impl JobApplication {
    fn parse_resume(&self) -> Option<StoredFile> {
        serde_json::from_value(self.resume.clone()).ok()
    }

    pub fn into_detail_response(self) -> JobApplicationResponse {
        let resume = self.parse_resume();
        JobApplicationResponse {
            id: self.id,
            job_id: self.job_id,
            applicant_name: self.applicant_name,
            email: self.email,
            phone: self.phone,
            cover_letter: self.cover_letter,
            resume,
            created_at: self.created_at,
        }
    }

    pub fn into_list_response(self) -> JobApplicationResponse {
        let resume = self.parse_resume().map(|f| f.without_data());
        JobApplicationResponse {
            id: self.id,
            job_id: self.job_id,
            applicant_name: self.applicant_name,
            email: self.email,
            phone: self.phone,
            cover_letter: self.cover_letter,
            resume,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_file_data_hidden_when_absent() {
        let file = StoredFile {
            filename: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 1234,
            data: None,
        };
        let json = serde_json::to_value(&file).expect("serialize");
        assert!(json.get("data").is_none());
        assert_eq!(
            json.get("filename").and_then(|v| v.as_str()),
            Some("resume.pdf")
        );
    }

    #[test]
    fn without_data_strips_blob() {
        let file = StoredFile {
            filename: "a.txt".to_string(),
            content_type: "text/plain".to_string(),
            size: 2,
            data: Some("aGk=".to_string()),
        };
        assert!(file.without_data().data.is_none());
        assert_eq!(file.without_data().size, 2);
    }
}
