//! Error types for outbound HTTP calls

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// A required URL or key is missing
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The target isn't an absolute http(s) URL
    #[error("Invalid URL format")]
    InvalidUrl,

    /// The target answered with a non-success status
    #[error("HTTP error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => UpstreamError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => UpstreamError::Transport(err.to_string()),
        }
    }
}
