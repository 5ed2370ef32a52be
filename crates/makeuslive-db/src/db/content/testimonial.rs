use makeuslive_core::models::{Testimonial, TestimonialInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for testimonials
#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "testimonials", db.operation = "insert")
    )]
    pub async fn create(&self, input: TestimonialInput) -> Result<Testimonial, AppError> {
        let testimonial = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            INSERT INTO testimonials (id, author_name, author_role, quote, avatar_url,
                                      position, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.author_name)
        .bind(&input.author_role)
        .bind(&input.quote)
        .bind(&input.avatar_url)
        .bind(input.position)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(testimonial)
    }

    #[tracing::instrument(
        skip(self, input),
        fields(db.table = "testimonials", db.operation = "update")
    )]
    pub async fn update(&self, id: Uuid, input: TestimonialInput) -> Result<Testimonial, AppError> {
        let testimonial = sqlx::query_as::<Postgres, Testimonial>(
            r#"
            UPDATE testimonials
            SET author_name = $2, author_role = $3, quote = $4, avatar_url = $5,
                position = $6, published = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.author_name)
        .bind(&input.author_role)
        .bind(&input.quote)
        .bind(&input.avatar_url)
        .bind(input.position)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;

        Ok(testimonial)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Testimonial>, AppError> {
        let testimonial =
            sqlx::query_as::<Postgres, Testimonial>("SELECT * FROM testimonials WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(testimonial)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn list_published(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<Postgres, Testimonial>(
            "SELECT * FROM testimonials WHERE published ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(testimonials)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, AppError> {
        let testimonials = sqlx::query_as::<Postgres, Testimonial>(
            "SELECT * FROM testimonials ORDER BY position ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(testimonials)
    }

    #[tracing::instrument(skip(self), fields(db.table = "testimonials", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
