// Route handlers: one async fn per endpoint, each producing a finished reply

pub mod admin_auth;
pub mod admin_users;
pub mod auth;
pub mod chat;
pub mod health;
pub mod projects;
pub mod sub_projects;
pub mod supabase_config;
pub mod webhook;

use std::convert::Infallible;

use serde::Serialize;
use warp::http::header::{HeaderValue, SET_COOKIE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::error::ApiError;

/// Serialize `value` as a JSON reply
pub(crate) fn json<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

/// Append `Set-Cookie` headers to a reply
pub(crate) fn with_cookies(mut response: Response, cookies: &[String]) -> Result<Response, ApiError> {
    for cookie in cookies {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {}", e)))?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

/// Turn a handler outcome into the reply warp sends
pub(crate) fn finish(result: Result<Response, ApiError>) -> Result<Response, Infallible> {
    Ok(result.unwrap_or_else(ApiError::into_response))
}
