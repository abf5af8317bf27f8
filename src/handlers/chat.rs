// POST /api/chat: relay a conversation to the agent webhook, streaming its reply

use std::convert::Infallible;

use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use super::finish;
use crate::error::ApiError;
use crate::models::ChatRequest;
use crate::state::AppState;
use crate::upstream::agent::FALLBACK_CONTENT_TYPE;
use crate::upstream::UpstreamError;

const AGENT_FAILURE: &str = "Failed to get response from agent";

pub async fn chat_handler(
    state: AppState,
    token: Option<String>,
    request: ChatRequest,
) -> Result<Response, Infallible> {
    finish(chat(&state, token.as_deref(), request).await)
}

async fn chat(state: &AppState, token: Option<&str>, request: ChatRequest) -> Result<Response, ApiError> {
    let user_id = state.require_user(token)?;
    request.validate()?;

    let relayed = state.agent.forward(user_id, &request).await.map_err(|e| {
        match &e {
            UpstreamError::NotConfigured(_) => tracing::error!(%user_id, "agent webhook is not configured"),
            other => tracing::warn!(%user_id, error = %other, "agent relay failed"),
        }
        ApiError::Upstream(AGENT_FAILURE.to_string())
    })?;

    tracing::debug!(
        %user_id,
        status = %relayed.status,
        content_type = %relayed.content_type,
        "agent replied, streaming body"
    );

    let content_type = HeaderValue::from_str(&relayed.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));
    let mut response = warp::reply::stream(relayed.body).into_response();
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    Ok(response)
}
