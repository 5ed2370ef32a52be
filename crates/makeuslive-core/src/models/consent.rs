//! Consent event models
//!
//! Server half of the cookie consent manager: append-only records of
//! visitor category decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsentEvent {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub categories: serde_json::Value,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for recording a consent decision. The `necessary` category
/// is implied true and stored as such regardless of the submitted map.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordConsentRequest {
    /// Client-generated anonymous visitor id
    pub visitor_id: Uuid,
    /// Category name to granted flag (e.g. analytics, marketing, functional)
    pub categories: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConsentEventResponse {
    pub id: Uuid,
    pub visitor_id: Uuid,
    #[schema(value_type = Object)]
    pub categories: serde_json::Value,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ConsentEvent> for ConsentEventResponse {
    fn from(e: ConsentEvent) -> Self {
        ConsentEventResponse {
            id: e.id,
            visitor_id: e.visitor_id,
            categories: e.categories,
            user_agent: e.user_agent,
            created_at: e.created_at,
        }
    }
}
