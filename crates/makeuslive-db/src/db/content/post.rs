use makeuslive_core::models::{Post, PostInput};
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for blog posts
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    #[tracing::instrument(skip(self, input), fields(db.table = "posts", db.operation = "insert"))]
    pub async fn create(&self, input: PostInput) -> Result<Post, AppError> {
        if self.slug_taken(&input.slug, None).await? {
            return Err(AppError::Conflict(format!(
                "A post with slug '{}' already exists",
                input.slug
            )));
        }

        let post = sqlx::query_as::<Postgres, Post>(
            r#"
            INSERT INTO posts (id, slug, title, excerpt, body, cover_image_url, tags,
                               published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                    CASE WHEN $8 THEN now() ELSE NULL END)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.body)
        .bind(&input.cover_image_url)
        .bind(&input.tags)
        .bind(input.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Full-field replacement. Publishing stamps `published_at` once;
    /// unpublishing clears it.
    #[tracing::instrument(skip(self, input), fields(db.table = "posts", db.operation = "update"))]
    pub async fn update(&self, id: Uuid, input: PostInput) -> Result<Post, AppError> {
        if self.slug_taken(&input.slug, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A post with slug '{}' already exists",
                input.slug
            )));
        }

        let post = sqlx::query_as::<Postgres, Post>(
            r#"
            UPDATE posts
            SET slug = $2, title = $3, excerpt = $4, body = $5, cover_image_url = $6,
                tags = $7, published = $8,
                published_at = CASE WHEN $8 THEN COALESCE(published_at, now()) ELSE NULL END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.body)
        .bind(&input.cover_image_url)
        .bind(&input.tags)
        .bind(input.published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        Ok(post)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<Postgres, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn get_published_by_slug(&self, slug: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<Postgres, Post>(
            "SELECT * FROM posts WHERE slug = $1 AND published",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    /// Published posts, newest first, optionally narrowed to one tag.
    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn list_published(
        &self,
        limit: i64,
        offset: i64,
        tag: Option<&str>,
    ) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<Postgres, Post>(
            r#"
            SELECT * FROM posts
            WHERE published AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY published_at DESC NULLS LAST
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "select"))]
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<Postgres, Post>(
            "SELECT * FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    #[tracing::instrument(skip(self), fields(db.table = "posts", db.operation = "delete"))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
