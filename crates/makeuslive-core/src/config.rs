//! Configuration module
//!
//! Environment-based configuration for the API service: server, database,
//! auth, intake limits, and SMTP notification settings.

use std::env;

use crate::constants::{
    DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_MAX_TOTAL_SIZE_MB,
};

// Common constants
const DEFAULT_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_EXPIRY_HOURS: i64 = 24;
const SUBMISSION_RATE_LIMIT_PER_MINUTE: u32 = 30;
const LOGIN_FAILURE_MAX: u32 = 5;
const LOGIN_FAILURE_WINDOW_SECS: u64 = 300;
const MIN_JWT_SECRET_BYTES: usize = 32;

/// Application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    // Bootstrap admin account, seeded on startup when the table is empty
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    // Abuse controls
    pub submission_rate_limit_per_minute: u32,
    pub login_failure_max: u32,
    pub login_failure_window_secs: u64,
    // Attachment limits (workspace defaults; form definitions may narrow them)
    pub max_file_size_bytes: usize,
    pub max_total_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    // Email notifications
    pub email_notifications_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    pub notify_emails: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let max_total_size_mb = env::var("MAX_TOTAL_SIZE_MB")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_TOTAL_SIZE_MB);

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_CONTENT_TYPES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let notify_emails = env::var("NOTIFY_EMAILS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            environment,
            cors_origins,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(JWT_EXPIRY_HOURS),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            submission_rate_limit_per_minute: env::var("SUBMISSION_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SUBMISSION_RATE_LIMIT_PER_MINUTE),
            login_failure_max: env::var("LOGIN_FAILURE_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LOGIN_FAILURE_MAX),
            login_failure_window_secs: env::var("LOGIN_FAILURE_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LOGIN_FAILURE_WINDOW_SECS),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_total_size_bytes: max_total_size_mb * 1024 * 1024,
            allowed_content_types,
            email_notifications_enabled: env::var("EMAIL_NOTIFICATIONS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            notify_emails,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Startup validation. Rejects configurations that would only fail later
    /// at request time.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            anyhow::bail!(
                "JWT_SECRET must be at least {} bytes in production",
                MIN_JWT_SECRET_BYTES
            );
        }
        if self.max_file_size_bytes == 0 || self.max_total_size_bytes == 0 {
            anyhow::bail!("attachment size limits must be non-zero");
        }
        if self.max_file_size_bytes > self.max_total_size_bytes {
            anyhow::bail!("MAX_FILE_SIZE_MB cannot exceed MAX_TOTAL_SIZE_MB");
        }
        if self.admin_password.is_some() && self.admin_email.is_none() {
            anyhow::bail!("ADMIN_PASSWORD is set but ADMIN_EMAIL is not");
        }
        if self.email_notifications_enabled && self.notify_emails.is_empty() {
            tracing::warn!("EMAIL_NOTIFICATIONS_ENABLED is set but NOTIFY_EMAILS is empty");
        }
        Ok(())
    }

    /// Request body cap for multipart endpoints: aggregate attachment limit
    /// plus slack for text fields and multipart framing.
    pub fn request_body_limit_bytes(&self) -> usize {
        self.max_total_size_bytes + 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 3000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: "postgresql://localhost/test".to_string(),
            db_max_connections: 20,
            db_timeout_seconds: 30,
            jwt_secret: "short".to_string(),
            jwt_expiry_hours: 24,
            admin_email: None,
            admin_password: None,
            submission_rate_limit_per_minute: 30,
            login_failure_max: 5,
            login_failure_window_secs: 300,
            max_file_size_bytes: 5 * 1024 * 1024,
            max_total_size_bytes: 15 * 1024 * 1024,
            allowed_content_types: vec!["application/pdf".to_string()],
            email_notifications_enabled: false,
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            notify_emails: vec![],
        }
    }

    #[test]
    fn short_jwt_secret_allowed_in_development() {
        let config = base_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_rejected_in_production() {
        let mut config = base_config();
        config.environment = "production".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn per_file_limit_cannot_exceed_total() {
        let mut config = base_config();
        config.max_file_size_bytes = config.max_total_size_bytes + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_password_without_email_rejected() {
        let mut config = base_config();
        config.admin_password = Some("hunter2hunter2".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn body_limit_exceeds_total_attachment_limit() {
        let config = base_config();
        assert!(config.request_body_limit_bytes() > config.max_total_size_bytes);
    }
}
