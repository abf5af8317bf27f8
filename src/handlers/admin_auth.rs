// Admin session endpoints under /api/admin/auth

use std::convert::Infallible;

use serde_json::json;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json, with_cookies};
use crate::auth::guard::{expired_cookie, session_cookie};
use crate::auth::{password, ADMIN_COOKIE, LEGACY_ADMIN_COOKIE};
use crate::error::ApiError;
use crate::models::LoginRequest;
use crate::state::AppState;

pub async fn login_handler(
    state: AppState,
    request: LoginRequest,
) -> Result<Response, Infallible> {
    finish(login(&state, request).await)
}

async fn login(state: &AppState, request: LoginRequest) -> Result<Response, ApiError> {
    let (email, plaintext) = request.credentials()?;

    let admin = match state.db.find_admin_by_email(&email).await? {
        Some(admin) if password::verify_password(plaintext, &admin.password_hash) => admin,
        _ => {
            tracing::warn!(%email, "admin login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state
        .admin_tokens
        .issue(admin.id)
        .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))?;
    let cookie = session_cookie(
        ADMIN_COOKIE,
        &token,
        state.admin_tokens.ttl().num_seconds(),
        state.secure_cookies,
    );

    tracing::info!(admin_id = %admin.id, "admin logged in");
    with_cookies(json(&json!({ "admin": admin }), StatusCode::OK), &[cookie])
}

pub async fn logout_handler(state: AppState) -> Result<Response, Infallible> {
    finish(with_cookies(
        json(&json!({ "success": true }), StatusCode::OK),
        &[
            expired_cookie(ADMIN_COOKIE, state.secure_cookies),
            expired_cookie(LEGACY_ADMIN_COOKIE, state.secure_cookies),
        ],
    ))
}

/// Report the token check itself: `{valid, payload?, error?}`
pub async fn verify_handler(
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    let verification = state.admin_tokens.verify(token.as_deref().unwrap_or(""));
    let status = if verification.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    Ok(json(&verification, status))
}

pub async fn me_handler(state: AppState, token: Option<String>) -> Result<Response, Infallible> {
    finish(me(&state, token.as_deref()).await)
}

async fn me(state: &AppState, token: Option<&str>) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    let admin = state.db.get_admin(admin_id).await?;
    Ok(json(&json!({ "admin": admin }), StatusCode::OK))
}
