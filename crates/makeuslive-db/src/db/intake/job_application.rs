use makeuslive_core::models::JobApplication;
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for job applications. The resume is stored inline as a JSONB
/// file object (filename, content type, size, base64 data).
#[derive(Clone)]
pub struct JobApplicationRepository {
    pool: PgPool,
}

impl JobApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, applicant_name, email, phone, cover_letter, resume),
        fields(db.table = "job_applications", db.operation = "insert")
    )]
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        job_id: Uuid,
        applicant_name: &str,
        email: &str,
        phone: Option<&str>,
        cover_letter: &str,
        resume: serde_json::Value,
    ) -> Result<JobApplication, AppError> {
        let application = sqlx::query_as::<Postgres, JobApplication>(
            r#"
            INSERT INTO job_applications (id, job_id, applicant_name, email, phone,
                                          cover_letter, resume)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job_id)
        .bind(applicant_name)
        .bind(email)
        .bind(phone)
        .bind(cover_letter)
        .bind(resume)
        .fetch_one(&self.pool)
        .await?;

        Ok(application)
    }

    #[tracing::instrument(skip(self), fields(db.table = "job_applications", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<JobApplication>, AppError> {
        let application = sqlx::query_as::<Postgres, JobApplication>(
            "SELECT * FROM job_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    #[tracing::instrument(skip(self), fields(db.table = "job_applications", db.operation = "select"))]
    pub async fn list(
        &self,
        job_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobApplication>, AppError> {
        let applications = sqlx::query_as::<Postgres, JobApplication>(
            r#"
            SELECT * FROM job_applications
            WHERE ($3::uuid IS NULL OR job_id = $3)
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    #[tracing::instrument(skip(self), fields(db.table = "job_applications", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
