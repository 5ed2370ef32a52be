//! Career opening models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub location: String,
    pub employment_type: String,
    pub body: String,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub location: String,
    /// Free-form employment type (e.g. "full-time", "contract")
    pub employment_type: String,
    pub body: String,
    pub open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JobInput {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_employment_type() -> String {
    "full-time".to_string()
}

fn default_open() -> bool {
    true
}

impl From<Job> for JobResponse {
    fn from(j: Job) -> Self {
        JobResponse {
            id: j.id,
            slug: j.slug,
            title: j.title,
            location: j.location,
            employment_type: j.employment_type,
            body: j.body,
            open: j.open,
            created_at: j.created_at,
            updated_at: j.updated_at,
        }
    }
}
