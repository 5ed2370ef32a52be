//! Application setup: database, bootstrap, routes, server.

pub mod bootstrap;
pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use makeuslive_core::Config;

use crate::auth::middleware::AuthFailureLimiter;
use crate::services::email::EmailService;
use crate::state::{AppState, DbState, IntakeConfig};

/// Wire everything together: pool + migrations, admin bootstrap, email
/// service, state, and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let pool = database::setup_database(&config).await?;
    let db = DbState::new(pool);

    bootstrap::seed_admin(&db.admin_users, &config).await?;

    let email = EmailService::from_config(&config);
    if email.is_none() {
        tracing::info!("Email notifications are disabled");
    }

    let state = Arc::new(AppState {
        intake: IntakeConfig::from_config(&config),
        login_limiter: Arc::new(AuthFailureLimiter::new(
            config.login_failure_max,
            config.login_failure_window_secs,
        )),
        is_production: config.is_production(),
        email,
        db,
        config,
    });

    let router = routes::setup_routes(&state.config.clone(), state.clone())?;
    Ok((state, router))
}
