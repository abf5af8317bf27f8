// Cookie names, Set-Cookie rendering and fail-closed session checks

use uuid::Uuid;

use super::token::{SessionPayload, TokenSigner};
use crate::error::ApiError;

/// Cookie carrying a user session
pub const USER_COOKIE: &str = "auth_token";

/// Cookie carrying an admin session
pub const ADMIN_COOKIE: &str = "admin_session";

/// Older admin cookie name, still honored when `admin_session` is absent
pub const LEGACY_ADMIN_COOKIE: &str = "admin_token";

/// Resolve a cookie token to a session, or 401
pub fn authenticate(signer: &TokenSigner, token: Option<&str>) -> Result<SessionPayload, ApiError> {
    let Some(token) = token else {
        tracing::debug!(kind = ?signer.kind(), "no session cookie");
        return Err(ApiError::Unauthorized);
    };

    let verification = signer.verify(token);
    match verification.payload {
        Some(payload) if verification.valid => Ok(payload),
        _ => {
            tracing::debug!(
                kind = ?signer.kind(),
                error = verification.error.as_deref().unwrap_or("unknown"),
                "session rejected"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

/// Subject id of a valid session, or 401
pub fn require(signer: &TokenSigner, token: Option<&str>) -> Result<Uuid, ApiError> {
    authenticate(signer, token).map(|payload| payload.subject())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        name,
        token,
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing a session
pub fn expired_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}
