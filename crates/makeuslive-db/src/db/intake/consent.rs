use makeuslive_core::models::ConsentEvent;
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Append-only repository for consent events.
#[derive(Clone)]
pub struct ConsentRepository {
    pool: PgPool,
}

impl ConsentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, categories, user_agent),
        fields(db.table = "consent_events", db.operation = "insert")
    )]
    pub async fn create(
        &self,
        visitor_id: Uuid,
        categories: serde_json::Value,
        user_agent: Option<&str>,
    ) -> Result<ConsentEvent, AppError> {
        let event = sqlx::query_as::<Postgres, ConsentEvent>(
            r#"
            INSERT INTO consent_events (id, visitor_id, categories, user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(visitor_id)
        .bind(categories)
        .bind(user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    #[tracing::instrument(skip(self), fields(db.table = "consent_events", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ConsentEvent>, AppError> {
        let events = sqlx::query_as::<Postgres, ConsentEvent>(
            "SELECT * FROM consent_events ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }
}
