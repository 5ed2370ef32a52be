use makeuslive_core::models::ContactSubmission;
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for contact form submissions
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, name, email, phone, company, message),
        fields(db.table = "contact_submissions", db.operation = "insert")
    )]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        company: Option<&str>,
        message: &str,
    ) -> Result<ContactSubmission, AppError> {
        let submission = sqlx::query_as::<Postgres, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions (id, name, email, phone, company, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(company)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_submissions", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ContactSubmission>, AppError> {
        let submission = sqlx::query_as::<Postgres, ContactSubmission>(
            "SELECT * FROM contact_submissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(submission)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_submissions", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ContactSubmission>, AppError> {
        let submissions = sqlx::query_as::<Postgres, ContactSubmission>(
            "SELECT * FROM contact_submissions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(submissions)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_submissions", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
