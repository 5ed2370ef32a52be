//! Service offering models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceOfferingResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    /// Manual ordering on the services page (ascending)
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceOfferingInput {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub published: bool,
}

impl From<ServiceOffering> for ServiceOfferingResponse {
    fn from(s: ServiceOffering) -> Self {
        ServiceOfferingResponse {
            id: s.id,
            slug: s.slug,
            title: s.title,
            summary: s.summary,
            body: s.body,
            position: s.position,
            published: s.published,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
