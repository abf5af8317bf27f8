// GET /api/health

use std::convert::Infallible;

use serde_json::json;
use warp::http::StatusCode;
use warp::reply::Response;

use super::json;
use crate::state::AppState;

pub async fn health_handler(state: AppState) -> Result<Response, Infallible> {
    match state.db.ping().await {
        Ok(()) => Ok(json(&json!({ "status": "ok" }), StatusCode::OK)),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            Ok(json(
                &json!({ "status": "unavailable" }),
                StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}
