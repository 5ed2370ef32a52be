use makeuslive_core::models::AdminUser;
use makeuslive_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for admin accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        skip(self, email, password_hash),
        fields(db.table = "admin_users", db.operation = "insert")
    )]
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<AdminUser, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "An admin with email '{}' already exists",
                email
            )));
        }

        let user = sqlx::query_as::<Postgres, AdminUser>(
            r#"
            INSERT INTO admin_users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self, email), fields(db.table = "admin_users", db.operation = "select"))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let user =
            sqlx::query_as::<Postgres, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admin_users", db.operation = "select"))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, AppError> {
        let user = sqlx::query_as::<Postgres, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "admin_users", db.operation = "select"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
