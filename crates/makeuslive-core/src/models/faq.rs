//! FAQ entry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FaqEntry {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FaqEntryResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FaqEntryInput {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub published: bool,
}

impl From<FaqEntry> for FaqEntryResponse {
    fn from(f: FaqEntry) -> Self {
        FaqEntryResponse {
            id: f.id,
            question: f.question,
            answer: f.answer,
            position: f.position,
            published: f.published,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
