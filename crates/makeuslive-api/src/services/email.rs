//! Email service for sending submission notifications via SMTP.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use makeuslive_core::Config;

/// Email service for submission notifications.
/// No-op if notifications are disabled or SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Create email service from config. Returns `None` if disabled or SMTP
    /// not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_notifications_enabled {
            tracing::debug!("Email notifications disabled (EMAIL_NOTIFICATIONS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.as_deref()?.to_string();
        let port = config.smtp_port.unwrap_or(587);

        let mailer = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (&config.smtp_user, &config.smtp_password) {
                b.credentials(Credentials::new(u.clone(), p.clone()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    /// Send a plain-text email to the given recipients.
    pub async fn send(&self, to: &[String], subject: &str, body_plain: &str) -> Result<(), String> {
        if to.is_empty() {
            return Ok(());
        }
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect::<Vec<_>>();
        if to_addrs.is_empty() {
            return Err("No valid recipient addresses".to_string());
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let mut builder = Message::builder().from(from_addr).subject(subject);
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }
        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        info!(count = to.len(), "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: "postgresql://localhost/test".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            jwt_secret: "test-secret-key-min-32-characters-long".to_string(),
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
            smtp_host: Some("smtp.example.com".to_string()),
            smtp_port: Some(587),
            smtp_user: None,
            smtp_password: None,
            smtp_from: Some("site@makeuslive.com".to_string()),
            smtp_tls: true,
            notify_emails: vec!["hello@makeuslive.com".to_string()],
        }
    }

    /// EmailService::from_config returns None when notifications are disabled.
    #[test]
    fn from_config_returns_none_when_disabled() {
        let config = test_config();
        assert!(
            EmailService::from_config(&config).is_none(),
            "When EMAIL_NOTIFICATIONS_ENABLED=false, from_config should return None"
        );
    }

    /// Missing SMTP host also disables the service cleanly.
    #[test]
    fn from_config_returns_none_without_host() {
        let mut config = test_config();
        config.email_notifications_enabled = true;
        config.smtp_host = None;
        assert!(EmailService::from_config(&config).is_none());
    }
}
