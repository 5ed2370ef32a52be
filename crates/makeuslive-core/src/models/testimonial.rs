//! Testimonial models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: String,
    pub quote: String,
    pub avatar_url: Option<String>,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub author_name: String,
    /// Role and company line shown under the author name
    pub author_role: String,
    pub quote: String,
    pub avatar_url: Option<String>,
    pub position: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TestimonialInput {
    pub author_name: String,
    #[serde(default)]
    pub author_role: String,
    pub quote: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub published: bool,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        TestimonialResponse {
            id: t.id,
            author_name: t.author_name,
            author_role: t.author_role,
            quote: t.quote,
            avatar_url: t.avatar_url,
            position: t.position,
            published: t.published,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
