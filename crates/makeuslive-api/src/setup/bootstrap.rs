//! First-run bootstrap: seed the initial admin account.

use anyhow::Result;
use makeuslive_core::Config;
use makeuslive_db::AdminUserRepository;

use crate::auth::password::hash_password;

const MIN_ADMIN_PASSWORD_LENGTH: usize = 12;

/// Seed an admin account from `ADMIN_EMAIL`/`ADMIN_PASSWORD` when the table
/// is empty. A populated table means the instance is already managed; the
/// env credentials are then ignored.
pub async fn seed_admin(repo: &AdminUserRepository, config: &Config) -> Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    if repo.count().await? > 0 {
        tracing::debug!("Admin accounts exist, skipping bootstrap seed");
        return Ok(());
    }

    if password.len() < MIN_ADMIN_PASSWORD_LENGTH {
        anyhow::bail!(
            "ADMIN_PASSWORD must be at least {} characters",
            MIN_ADMIN_PASSWORD_LENGTH
        );
    }

    let hash = hash_password(password)?;
    let user = repo.create(email, &hash).await?;
    tracing::info!(admin = %user.email, "Bootstrap admin account created");
    Ok(())
}
