// POST /api/admin/webhook/test

use std::convert::Infallible;

use warp::http::StatusCode;
use warp::reply::Response;

use super::{finish, json};
use crate::error::ApiError;
use crate::models::{required, WebhookTestRequest};
use crate::state::AppState;
use crate::upstream::check;

pub async fn test_webhook_handler(
    state: AppState,
    token: Option<String>,
    request: WebhookTestRequest,
) -> Result<Response, Infallible> {
    finish(test_webhook(&state, token.as_deref(), request).await)
}

async fn test_webhook(
    state: &AppState,
    token: Option<&str>,
    request: WebhookTestRequest,
) -> Result<Response, ApiError> {
    let admin_id = state.require_admin(token)?;

    let raw = required(&request.webhook_url, "webhook_url")?;
    let url = check::parse_target(&raw)
        .map_err(|_| ApiError::BadRequest("Invalid URL format".to_string()))?;

    tracing::info!(%admin_id, %url, method = ?request.method, "testing webhook");
    let outcome = check::test_webhook(&state.http, url, request.method).await;
    Ok(json(&outcome, StatusCode::OK))
}
