// User management under /api/admin/users

use std::convert::Infallible;

use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json};
use crate::auth::password;
use crate::db;
use crate::error::ApiError;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::state::AppState;

fn email_taken(err: db::Error) -> ApiError {
    match err {
        db::Error::Conflict(_) => {
            ApiError::Conflict("A user with this email already exists".to_string())
        }
        other => other.into(),
    }
}

pub async fn list_users_handler(
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(list_users(&state, token.as_deref()).await)
}

async fn list_users(state: &AppState, token: Option<&str>) -> Result<Response, ApiError> {
    state.require_admin(token)?;
    let users = state.db.list_users().await?;
    Ok(json(&json!({ "users": users }), StatusCode::OK))
}

pub async fn create_user_handler(
    state: AppState,
    token: Option<String>,
    request: CreateUserRequest,
) -> Result<Response, Infallible> {
    finish(create_user(&state, token.as_deref(), request).await)
}

async fn create_user(
    state: &AppState,
    token: Option<&str>,
    request: CreateUserRequest,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    let new_user = request.validate()?;

    let hash = password::hash_password(&new_user.password)?;
    let user = state
        .db
        .create_user(&new_user, &hash)
        .await
        .map_err(email_taken)?;

    tracing::info!(%admin_id, user_id = %user.id, "user created");
    Ok(json(&json!({ "user": user }), StatusCode::CREATED))
}

pub async fn get_user_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(get_user(&state, token.as_deref(), user_id).await)
}

async fn get_user(state: &AppState, token: Option<&str>, user_id: Uuid) -> Result<Response, ApiError> {
    state.require_admin(token)?;
    let user = state.db.get_user(user_id).await?;
    Ok(json(&json!({ "user": user }), StatusCode::OK))
}

pub async fn update_user_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
    request: UpdateUserRequest,
) -> Result<Response, Infallible> {
    finish(update_user(&state, token.as_deref(), user_id, request).await)
}

async fn update_user(
    state: &AppState,
    token: Option<&str>,
    user_id: Uuid,
    request: UpdateUserRequest,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    let changes = request.validate()?;

    let hash = changes
        .password
        .as_deref()
        .map(password::hash_password)
        .transpose()?;
    let user = state
        .db
        .update_user(user_id, &changes, hash.as_deref())
        .await
        .map_err(email_taken)?;

    tracing::info!(%admin_id, %user_id, "user updated");
    Ok(json(&json!({ "user": user }), StatusCode::OK))
}

pub async fn delete_user_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(delete_user(&state, token.as_deref(), user_id).await)
}

async fn delete_user(
    state: &AppState,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    state.db.delete_user(user_id).await?;

    tracing::info!(%admin_id, %user_id, "user deleted");
    Ok(json(&json!({ "success": true }), StatusCode::OK))
}
