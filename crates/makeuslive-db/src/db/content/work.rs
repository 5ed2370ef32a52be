use makeuslive_core::models::{Work, WorkInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for case studies
#[derive(Clone)]
pub struct WorkRepository {
    pool: PgPool,
}

impl WorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM works WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "works", db.operation = "insert"))]
    pub async fn create(&self, input: WorkInput) -> Result<Work, AppError> {
        if self.slug_taken(&input.slug, None).await? {
            return Err(AppError::Conflict(format!(
                "A case study with slug '{}' already exists",
                input.slug
            )));
        }

        let work = sqlx::query_as::<Postgres, Work>(
            r#"
            INSERT INTO works (id, slug, title, summary, body, client_name,
                               cover_image_url, tags, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.client_name)
        .bind(&input.cover_image_url)
        .bind(&input.tags)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(work)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "works", db.operation = "update"))]
    pub async fn update(&self, id: Uuid, input: WorkInput) -> Result<Work, AppError> {
        if self.slug_taken(&input.slug, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A case study with slug '{}' already exists",
                input.slug
            )));
        }

        let work = sqlx::query_as::<Postgres, Work>(
            r#"
            UPDATE works
            SET slug = $2, title = $3, summary = $4, body = $5, client_name = $6,
                cover_image_url = $7, tags = $8, published = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(&input.client_name)
        .bind(&input.cover_image_url)
        .bind(&input.tags)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Case study not found".to_string()))?;

        Ok(work)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Work>, AppError> {
        let work = sqlx::query_as::<Postgres, Work>("SELECT * FROM works WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(work)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Work>, AppError> {
        let work = sqlx::query_as::<Postgres, Work>(
            "SELECT * FROM works WHERE slug = $1 AND published",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(work)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    pub async fn list_published(
        &self,
        limit: i64,
        offset: i64,
        tag: Option<&str>,
    ) -> Result<Vec<Work>, AppError> {
        let works = sqlx::query_as::<Postgres, Work>(
            r#"
            SELECT * FROM works
            WHERE published AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        Ok(works)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "select"))]
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Work>, AppError> {
        let works = sqlx::query_as::<Postgres, Work>(
            "SELECT * FROM works ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(works)
    }

    #[tracing::instrument(skip(self), fields(db.table = "works", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
