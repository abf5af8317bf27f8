// POST /api/auth/login, POST /api/auth/logout, GET /api/auth/me

use std::convert::Infallible;

use serde_json::json;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json, with_cookies};
use crate::auth::guard::{expired_cookie, session_cookie};
use crate::auth::{password, USER_COOKIE};
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

    let user = match state.db.find_user_by_email(&email).await? {
        Some(user) if password::verify_password(plaintext, &user.password_hash) => user,
        _ => {
            tracing::info!(%email, "user login failed");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state
        .user_tokens
        .issue(user.id)
        .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))?;
    let cookie = session_cookie(
        USER_COOKIE,
        &token,
        state.user_tokens.ttl().num_seconds(),
        state.secure_cookies,
    );

    tracing::info!(user_id = %user.id, "user logged in");
    with_cookies(json(&json!({ "user": user }), StatusCode::OK), &[cookie])
}

pub async fn logout_handler(state: AppState) -> Result<Response, Infallible> {
    finish(with_cookies(
        json(&json!({ "success": true }), StatusCode::OK),
        &[expired_cookie(USER_COOKIE, state.secure_cookies)],
    ))
}

pub async fn me_handler(state: AppState, token: Option<String>) -> Result<Response, Infallible> {
    finish(me(&state, token.as_deref()).await)
}

async fn me(state: &AppState, token: Option<&str>) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let user = state.db.get_user(user_id).await?;
    Ok(json(&json!({ "user": user }), StatusCode::OK))
}
