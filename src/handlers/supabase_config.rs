// Per-user Supabase credentials under /api/admin/users/{id}/supabase-config

use std::convert::Infallible;

use serde_json::json;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json};
use crate::error::ApiError;
use crate::models::SupabaseConfigRequest;
use crate::state::AppState;
use crate::upstream::{check, UpstreamError};

pub async fn get_config_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(get_config(&state, token.as_deref(), user_id).await)
}

async fn get_config(state: &AppState, token: Option<&str>, user_id: Uuid) -> Result<Response, ApiError> {
    state.require_admin(token)?;
    let config = state.db.get_supabase_config(user_id).await?;
    Ok(json(
        &json!({ "config": config.map(|c| c.view()) }),
        StatusCode::OK,
    ))
}

pub async fn put_config_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
    request: SupabaseConfigRequest,
) -> Result<Response, Infallible> {
    finish(put_config(&state, token.as_deref(), user_id, request).await)
}

async fn put_config(
    state: &AppState,
    token: Option<&str>,
    user_id: Uuid,
    request: SupabaseConfigRequest,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    let input = request.validate()?;

    let config = state.db.upsert_supabase_config(user_id, &input).await?;

    tracing::info!(%admin_id, %user_id, configured = config.is_configured(), "supabase config saved");
    Ok(json(&json!({ "config": config.view() }), StatusCode::OK))
}

pub async fn delete_config_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(delete_config(&state, token.as_deref(), user_id).await)
}

async fn delete_config(
    state: &AppState,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;
    state.db.delete_supabase_config(user_id).await?;

    tracing::info!(%admin_id, %user_id, "supabase config removed");
    Ok(json(&json!({ "success": true }), StatusCode::OK))
}

pub async fn test_config_handler(
    user_id: Uuid,
    state: AppState,
    token: Option<String>,
) -> Result<Response, Infallible> {
    finish(test_config(&state, token.as_deref(), user_id).await)
}

async fn test_config(
    state: &AppState,
    token: Option<&str>,
    user_id: Uuid,
) -> Result<Response, ApiError> {
    state.require_admin(token)?;

    let config = state
        .db
        .get_supabase_config(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Supabase config not found".to_string()))?;

    let outcome = match check::check_supabase(&state.http, &config).await {
        Ok(outcome) => outcome,
        Err(UpstreamError::NotConfigured(_)) => {
            let key = if config.use_service_role {
                "service_role_key"
            } else {
                "anon_key"
            };
            return Err(ApiError::BadRequest(format!("{} is not set", key)));
        }
        Err(e) => return Err(ApiError::BadRequest(e.to_string())),
    };

    if let Some(verified_at) = outcome.verified_at {
        state.db.mark_supabase_verified(user_id, verified_at).await?;
        tracing::info!(%user_id, response_time = ?outcome.response_time, "supabase credentials verified");
        return Ok(json(&outcome, StatusCode::OK));
    }

    tracing::warn!(%user_id, error = ?outcome.error, "supabase credentials rejected");
    Ok(json(&outcome, StatusCode::UNPROCESSABLE_ENTITY))
}
