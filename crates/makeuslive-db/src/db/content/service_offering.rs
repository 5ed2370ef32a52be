use makeuslive_core::models::{ServiceOffering, ServiceOfferingInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for service offerings. Public lists order by the manual
/// `position` column.
#[derive(Clone)]
pub struct ServiceOfferingRepository {
    pool: PgPool,
}

impl ServiceOfferingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM service_offerings WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "service_offerings", db.operation = "insert")
    )]
    pub async fn create(&self, input: ServiceOfferingInput) -> Result<ServiceOffering, AppError> {
        if self.slug_taken(&input.slug, None).await? {
            return Err(AppError::Conflict(format!(
                "A service with slug '{}' already exists",
                input.slug
            )));
        }

        let service = sqlx::query_as::<Postgres, ServiceOffering>(
            r#"
            INSERT INTO service_offerings (id, slug, title, summary, body, position, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(input.position)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "service_offerings", db.operation = "update")
    )]
    pub async fn update(
        &self,
        id: Uuid,
        input: ServiceOfferingInput,
    ) -> Result<ServiceOffering, AppError> {
        if self.slug_taken(&input.slug, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A service with slug '{}' already exists",
                input.slug
            )));
        }

        let service = sqlx::query_as::<Postgres, ServiceOffering>(
            r#"
            UPDATE service_offerings
            SET slug = $2, title = $3, summary = $4, body = $5, position = $6,
                published = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.body)
        .bind(input.position)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

        Ok(service)
    }

    #[tracing::instrument(skip(self), fields(db.table = "service_offerings", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ServiceOffering>, AppError> {
        let service =
            sqlx::query_as::<Postgres, ServiceOffering>("SELECT * FROM service_offerings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(service)
    }

    #[tracing::instrument(skip(self), fields(db.table = "service_offerings", db.operation = "select"))]
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ServiceOffering>, AppError> {
        let service = sqlx::query_as::<Postgres, ServiceOffering>(
            "SELECT * FROM service_offerings WHERE slug = $1 AND published",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(service)
    }

    #[tracing::instrument(skip(self), fields(db.table = "service_offerings", db.operation = "select"))]
    pub async fn list_published(&self) -> Result<Vec<ServiceOffering>, AppError> {
        let services = sqlx::query_as::<Postgres, ServiceOffering>(
            "SELECT * FROM service_offerings WHERE published ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    #[tracing::instrument(skip(self), fields(db.table = "service_offerings", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<ServiceOffering>, AppError> {
        let services = sqlx::query_as::<Postgres, ServiceOffering>(
            "SELECT * FROM service_offerings ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    #[tracing::instrument(skip(self), fields(db.table = "service_offerings", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM service_offerings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
