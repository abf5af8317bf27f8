// Sub-projects nested under a user's project, and the files filed under them

use std::convert::Infallible;

use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json};
use crate::error::ApiError;
use crate::models::{CreateSubProjectRequest, UpdateSubProjectRequest};
use crate::state::AppState;

pub async fn list_sub_projects_handler(
    project_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(list_sub_projects(&state, token.as_deref(), project_id).await)
}

async fn list_sub_projects(
    state: &AppState,
    token: Option<&str>,
    project_id: Uuid,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let sub_projects = state.db.list_sub_projects(user_id, project_id).await?;
    Ok(json(&json!({ "subProjects": sub_projects }), StatusCode::OK))
}

pub async fn create_sub_project_handler(
    project_id: Uuid,
    state: AppState,
    token: Option<String>,
    request: CreateSubProjectRequest,
) -> Result<Response, Infallible> {
    finish(create_sub_project(&state, token.as_deref(), project_id, request).await)
}

async fn create_sub_project(
    state: &AppState,
    token: Option<&str>,
    project_id: Uuid,
    request: CreateSubProjectRequest,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let sub_project = request.validate()?;
    let sub_project = state
        .db
        .create_sub_project(user_id, project_id, &sub_project)
        .await?;

    tracing::info!(%user_id, %project_id, sub_project_id = %sub_project.id, "sub-project created");
    Ok(json(&json!({ "subProject": sub_project }), StatusCode::OK))
}

pub async fn update_sub_project_handler(
    sub_project_id: Uuid,
    state: AppState,
    token: Option<String>,
    request: UpdateSubProjectRequest,
) -> Result<Response, Infallible> {
    finish(update_sub_project(&state, token.as_deref(), sub_project_id, request).await)
}

async fn update_sub_project(
    state: &AppState,
    token: Option<&str>,
    sub_project_id: Uuid,
    request: UpdateSubProjectRequest,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let changes = request.validate()?;
    let sub_project = state
        .db
        .update_sub_project(user_id, sub_project_id, &changes)
        .await?;
    Ok(json(&json!({ "subProject": sub_project }), StatusCode::OK))
}

pub async fn delete_sub_project_handler(
    sub_project_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(delete_sub_project(&state, token.as_deref(), sub_project_id).await)
}

async fn delete_sub_project(
    state: &AppState,
    token: Option<&str>,
    sub_project_id: Uuid,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    state.db.delete_sub_project(user_id, sub_project_id).await?;

    tracing::info!(%user_id, %sub_project_id, "sub-project deleted");
    Ok(json(&json!({ "success": true }), StatusCode::OK))
}

pub async fn list_files_handler(
    sub_project_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(list_files(&state, token.as_deref(), sub_project_id).await)
}

async fn list_files(
    state: &AppState,
    token: Option<&str>,
    sub_project_id: Uuid,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let files = state.db.list_project_files(user_id, sub_project_id).await?;
    Ok(json(&json!({ "files": files }), StatusCode::OK))
}
