use makeuslive_core::models::FormSubmission;
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for dynamic form submissions. Payload and file blobs are one
/// JSONB document each; the whole submission is a single row.
#[derive(Clone)]
pub struct FormSubmissionRepository {
    pool: PgPool,
}

impl FormSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, payload, files),
        fields(db.table = "form_submissions", db.operation = "insert")
    )]
    pub async fn create(
        &self,
        form_id: Uuid,
        payload: serde_json::Value,
        files: serde_json::Value,
    ) -> Result<FormSubmission, AppError> {
        let submission = sqlx::query_as::<Postgres, FormSubmission>(
            r#"
            INSERT INTO form_submissions (id, form_id, payload, files)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(form_id)
        .bind(payload)
        .bind(files)
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }

    #[tracing::instrument(skip(self), fields(db.table = "form_submissions", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FormSubmission>, AppError> {
        let submission = sqlx::query_as::<Postgres, FormSubmission>(
            "SELECT * FROM form_submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(submission)
    }

    /// Newest first, optionally narrowed to one form.
    #[tracing::instrument(skip(self), fields(db.table = "form_submissions", db.operation = "select"))]
    pub async fn list(
        &self,
        form_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FormSubmission>, AppError> {
        let submissions = sqlx::query_as::<Postgres, FormSubmission>(
            r#"
            SELECT * FROM form_submissions
            WHERE ($3::uuid IS NULL OR form_id = $3)
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(submissions)
    }

    #[tracing::instrument(skip(self), fields(db.table = "form_submissions", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
