use makeuslive_core::models::{Job, JobInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for career openings
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM jobs WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "jobs", db.operation = "insert"))]
    pub async fn create(&self, input: JobInput) -> Result<Job, AppError> {
        if self.slug_taken(&input.slug, None).await? {
            return Err(AppError::Conflict(format!(
                "A job with slug '{}' already exists",
                input.slug
            )));
        }

        let job = sqlx::query_as::<Postgres, Job>(
            r#"
            INSERT INTO jobs (id, slug, title, location, employment_type, body, open)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.employment_type)
        .bind(&input.body)
        .bind(input.open)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "jobs", db.operation = "update"))]
    pub async fn update(&self, id: Uuid, input: JobInput) -> Result<Job, AppError> {
        if self.slug_taken(&input.slug, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A job with slug '{}' already exists",
                input.slug
            )));
        }

        let job = sqlx::query_as::<Postgres, Job>(
            r#"
            UPDATE jobs
            SET slug = $2, title = $3, location = $4, employment_type = $5, body = $6,
                open = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.employment_type)
        .bind(&input.body)
        .bind(input.open)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

        Ok(job)
    }

    #[tracing::instrument(skip(self), fields(db.table = "jobs", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<Postgres, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Open jobs only: the application endpoint and the public careers page
    /// never see closed openings.
    #[tracing::instrument(skip(self), fields(db.table = "jobs", db.operation = "select"))]
    pub async fn get_open_by_slug(&self, slug: &str) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<Postgres, Job>("SELECT * FROM jobs WHERE slug = $1 AND open")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    #[tracing::instrument(skip(self), fields(db.table = "jobs", db.operation = "select"))]
    pub async fn list_open(&self) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<Postgres, Job>(
            "SELECT * FROM jobs WHERE open ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    #[tracing::instrument(skip(self), fields(db.table = "jobs", db.operation = "select"))]
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<Postgres, Job>(
            "SELECT * FROM jobs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    #[tracing::instrument(skip(self), fields(db.table = "jobs", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
