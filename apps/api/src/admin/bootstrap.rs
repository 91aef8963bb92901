use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::admin::store::set_admin_flag;
use crate::auth::password::hash_password;
use crate::auth::store::{find_by_username, insert_user, NewUser};
use crate::config::AdminBootstrap;

const ADMIN_DISPLAY_NAME: &str = "Administrator";
const ADMIN_BIO: &str = "System Administrator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    AlreadyAdmin,
    Promoted,
    Created,
}

/// Makes sure the configured admin account exists and carries the admin flag.
/// An existing account keeps its password.
pub async fn ensure_admin(pool: &PgPool, admin: &AdminBootstrap) -> Result<BootstrapOutcome> {
    if let Some(user) = find_by_username(pool, &admin.username).await? {
        if user.is_admin {
            return Ok(BootstrapOutcome::AlreadyAdmin);
        }
        set_admin_flag(pool, &admin.username, true).await?;
        info!("Promoted existing user '{}' to admin", admin.username);
        return Ok(BootstrapOutcome::Promoted);
    }

    let password_hash = hash_password(&admin.password).context("Failed to hash admin password")?;
    insert_user(
        pool,
        NewUser {
            username: &admin.username,
            password_hash: &password_hash,
            email: Some(admin.email.as_str()),
            display_name: ADMIN_DISPLAY_NAME,
            bio: ADMIN_BIO,
            is_admin: true,
            onboarded: true,
        },
    )
    .await?;
    info!("Created admin user '{}'", admin.username);
    Ok(BootstrapOutcome::Created)
}
