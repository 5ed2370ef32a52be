use makeuslive_core::models::{FaqEntry, FaqEntryInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for FAQ entries
#[derive(Clone)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "faq_entries", db.operation = "insert"))]
    pub async fn create(&self, input: FaqEntryInput) -> Result<FaqEntry, AppError> {
        let entry = sqlx::query_as::<Postgres, FaqEntry>(
            r#"
            INSERT INTO faq_entries (id, question, answer, position, published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.question)
        .bind(&input.answer)
        .bind(input.position)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "faq_entries", db.operation = "update"))]
    pub async fn update(&self, id: Uuid, input: FaqEntryInput) -> Result<FaqEntry, AppError> {
        let entry = sqlx::query_as::<Postgres, FaqEntry>(
            r#"
            UPDATE faq_entries
            SET question = $2, answer = $3, position = $4, published = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.question)
        .bind(&input.answer)
        .bind(input.position)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ entry not found".to_string()))?;

        Ok(entry)
    }

    #[tracing::instrument(skip(self), fields(db.table = "faq_entries", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FaqEntry>, AppError> {
        let entry = sqlx::query_as::<Postgres, FaqEntry>("SELECT * FROM faq_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    #[tracing::instrument(skip(self), fields(db.table = "faq_entries", db.operation = "select"))]
    pub async fn list_published(&self) -> Result<Vec<FaqEntry>, AppError> {
        let entries = sqlx::query_as::<Postgres, FaqEntry>(
            "SELECT * FROM faq_entries WHERE published ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    #[tracing::instrument(skip(self), fields(db.table = "faq_entries", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<FaqEntry>, AppError> {
        let entries = sqlx::query_as::<Postgres, FaqEntry>(
            "SELECT * FROM faq_entries ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    #[tracing::instrument(skip(self), fields(db.table = "faq_entries", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM faq_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
