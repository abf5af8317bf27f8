//! Sessions, passwords and the admin seed

pub mod guard;
pub mod password;
pub mod token;

pub use guard::{ADMIN_COOKIE, LEGACY_ADMIN_COOKIE, USER_COOKIE};
pub use token::{SessionKind, SessionPayload, TokenSigner, TokenVerification};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::AdminUser;
use crate::settings::AdminBootstrap;

/// Create the configured bootstrap admin unless one with that email exists
///
/// Returns the created admin, or `None` when nothing was configured or the
/// account was already present.
pub async fn seed_admin(
    db: &Database,
    bootstrap: &AdminBootstrap,
) -> Result<Option<AdminUser>, ApiError> {
    let (Some(email), Some(password)) = (
        bootstrap.bootstrap_email.as_deref(),
        bootstrap.bootstrap_password.as_deref(),
    ) else {
        return Ok(None);
    };

    let email = email.trim().to_lowercase();
    if db.find_admin_by_email(&email).await?.is_some() {
        return Ok(None);
    }

    let hash = password::hash_password(password)?;
    let admin = db
        .create_admin(&email, &hash, bootstrap.bootstrap_name.trim())
        .await?;
    tracing::info!(admin_id = %admin.id, email = %admin.email, "seeded bootstrap admin");
    Ok(Some(admin))
}
