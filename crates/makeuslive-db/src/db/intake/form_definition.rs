use makeuslive_core::models::{FormDefinition, FormDefinitionInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for admin-authored form definitions. The field descriptor
/// list is stored as JSONB and validated by the form engine before it
/// reaches this layer.
#[derive(Clone)]
pub struct FormDefinitionRepository {
    pool: PgPool,
}

impl FormDefinitionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM form_definitions WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "form_definitions", db.operation = "insert")
    )]
    pub async fn create(&self, input: FormDefinitionInput) -> Result<FormDefinition, AppError> {
        if self.slug_taken(&input.slug, None).await? {
            return Err(AppError::Conflict(format!(
                "A form with slug '{}' already exists",
                input.slug
            )));
        }

        let form = sqlx::query_as::<Postgres, FormDefinition>(
            r#"
            INSERT INTO form_definitions (id, slug, name, description, fields,
                                          max_file_size_bytes, max_total_size_bytes,
                                          allowed_content_types, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.fields)
        .bind(input.max_file_size_bytes)
        .bind(input.max_total_size_bytes)
        .bind(&input.allowed_content_types)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(form)
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "form_definitions", db.operation = "update")
    )]
    pub async fn update(
        &self,
        id: Uuid,
        input: FormDefinitionInput,
    ) -> Result<FormDefinition, AppError> {
        if self.slug_taken(&input.slug, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A form with slug '{}' already exists",
                input.slug
            )));
        }

        let form = sqlx::query_as::<Postgres, FormDefinition>(
            r#"
            UPDATE form_definitions
            SET slug = $2, name = $3, description = $4, fields = $5,
                max_file_size_bytes = $6, max_total_size_bytes = $7,
                allowed_content_types = $8, published = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.fields)
        .bind(input.max_file_size_bytes)
        .bind(input.max_total_size_bytes)
        .bind(&input.allowed_content_types)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

        Ok(form)
    }

    #[tracing::instrument(skip(self), fields(db.table = "form_definitions", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<FormDefinition>, AppError> {
        let form = sqlx::query_as::<Postgres, FormDefinition>(
            "SELECT * FROM form_definitions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(form)
    }

    /// Published lookup used by the public form and submission endpoints.
    #[tracing::instrument(skip(self), fields(db.table = "form_definitions", db.operation = "select"))]
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<FormDefinition>, AppError> {
        let form = sqlx::query_as::<Postgres, FormDefinition>(
            "SELECT * FROM form_definitions WHERE slug = $1 AND published",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(form)
    }

    #[tracing::instrument(skip(self), fields(db.table = "form_definitions", db.operation = "select"))]
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<FormDefinition>, AppError> {
        let forms = sqlx::query_as::<Postgres, FormDefinition>(
            "SELECT * FROM form_definitions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(forms)
    }

    #[tracing::instrument(skip(self), fields(db.table = "form_definitions", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM form_definitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
