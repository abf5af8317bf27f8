// /api/user/projects: a user's own projects

use std::convert::Infallible;

use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json};
use crate::error::ApiError;
use crate::models::{CreateProjectRequest, UpdateProjectRequest};
use crate::state::AppState;

pub async fn list_projects_handler(
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(list_projects(&state, token.as_deref()).await)
}

async fn list_projects(state: &AppState, token: Option<&str>) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let projects = state.db.list_projects(user_id).await?;
    Ok(json(&json!({ "projects": projects }), StatusCode::OK))
}

pub async fn create_project_handler(
    state: AppState,
    token: Option<String>,
    request: CreateProjectRequest,
) -> Result<Response, Infallible> {
    finish(create_project(&state, token.as_deref(), request).await)
}

async fn create_project(
    state: &AppState,
    token: Option<&str>,
    request: CreateProjectRequest,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let project = request.validate()?;

    if !state.db.is_supabase_configured(user_id).await? {
        return Err(ApiError::Forbidden(
            "Supabase is not configured for this account".to_string(),
        ));
    }

    let project = state.db.create_project(user_id, &project).await?;
    tracing::info!(%user_id, project_id = %project.id, "project created");
    Ok(json(&json!({ "project": project }), StatusCode::OK))
}

pub async fn get_project_handler(
    project_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(get_project(&state, token.as_deref(), project_id).await)
}

async fn get_project(
    state: &AppState,
    token: Option<&str>,
    project_id: Uuid,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let project = state.db.get_project(user_id, project_id).await?;
    Ok(json(&json!({ "project": project }), StatusCode::OK))
}

pub async fn update_project_handler(
    project_id: Uuid,
    state: AppState,
    token: Option<String>,
    request: UpdateProjectRequest,
) -> Result<Response, Infallible> {
    finish(update_project(&state, token.as_deref(), project_id, request).await)
}

async fn update_project(
    state: &AppState,
    token: Option<&str>,
    project_id: Uuid,
    request: UpdateProjectRequest,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    let changes = request.validate()?;
    let project = state.db.update_project(user_id, project_id, &changes).await?;
    Ok(json(&json!({ "project": project }), StatusCode::OK))
}

pub async fn delete_project_handler(
    project_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(delete_project(&state, token.as_deref(), project_id).await)
}

async fn delete_project(
    state: &AppState,
    token: Option<&str>,
    project_id: Uuid,
) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    state.db.delete_project(user_id, project_id).await?;

    tracing::info!(%user_id, %project_id, "project deleted");
    Ok(json(&json!({ "success": true }), StatusCode::OK))
}
