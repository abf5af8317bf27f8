//! Error taxonomy shared by every route

use serde_json::json;
use thiserror::Error;
use warp::http::StatusCode;
use warp::Reply;

use crate::db;

/// Errors surfaced to HTTP callers
///
/// Client errors carry their message to the caller verbatim. `Internal`
/// keeps its cause for the server log and replies with a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unprocessable(String),

    /// Upstream failure with a caller-safe message
    #[error("{0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a `{"error": ...}` reply, logging server-side failures
    pub fn into_response(self) -> warp::reply::Response {
        let status = self.status();
        match &self {
            ApiError::Internal(cause) => tracing::error!(%cause, "request failed"),
            ApiError::Upstream(message) => tracing::error!(%message, "upstream failure"),
            _ => tracing::debug!(%status, error = %self, "request rejected"),
        }

        warp::reply::with_status(warp::reply::json(&json!({ "error": self.to_string() })), status)
            .into_response()
    }
}

impl From<db::Error> for ApiError {
    fn from(err: db::Error) -> Self {
        match err {
            db::Error::NotFound(what) => ApiError::NotFound(what),
            db::Error::Conflict(_) => ApiError::Conflict("Resource already exists".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Unprocessable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Upstream("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_hides_cause() {
        let err = ApiError::Internal("password authentication failed for user".into());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_from_db_error() {
        let err: ApiError = db::Error::NotFound("Project not found".into()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = db::Error::Conflict("users_email_key".into()).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = db::Error::Pool("timed out".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
