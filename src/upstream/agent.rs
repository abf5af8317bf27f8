//! Relay of chat turns to the external agent webhook

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode, Url};
use serde::Serialize;
use uuid::Uuid;

use super::error::UpstreamError;
use super::check::parse_target;
use crate::models::{ChatInput, ChatMessage, ChatRequest};

/// Content type used when the agent doesn't declare one
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Longest slice of an error body kept for logs
const ERROR_BODY_LIMIT: usize = 512;

/// Body posted to the agent
#[derive(Debug, Serialize)]
struct AgentPayload<'a> {
    messages: &'a [ChatMessage],
    input: &'a ChatInput,
    user_id: Uuid,
}

/// Chunks of the agent's reply body, in arrival order
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, UpstreamError>> + Send + Sync>>;

/// Agent reply, passed back to the caller untouched
///
/// The body is not read yet; it is consumed as the caller's response streams.
pub struct RelayedResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: BodyStream,
}

impl std::fmt::Debug for RelayedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayedResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Client for the one statically configured agent webhook
#[derive(Debug, Clone)]
pub struct AgentWebhook {
    client: Client,
    url: Option<Url>,
    timeout: Option<Duration>,
}

impl AgentWebhook {
    /// Create a relay; a present but malformed URL is rejected up front
    pub fn new(
        client: Client,
        url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, UpstreamError> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(parse_target)
            .transpose()?;

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Forward a conversation and return the agent's reply as it arrives
    ///
    /// Resolves once the status and headers are in. No retries. Non-2xx
    /// answers become `UpstreamError::Http`.
    pub async fn forward(
        &self,
        user_id: Uuid,
        request: &ChatRequest,
    ) -> Result<RelayedResponse, UpstreamError> {
        let url = self
            .url
            .clone()
            .ok_or(UpstreamError::NotConfigured("Agent webhook URL"))?;

        let payload = AgentPayload {
            messages: &request.messages,
            input: &request.input,
            user_id,
        };

        let mut outbound = self.client.post(url).json(&payload);
        if let Some(timeout) = self.timeout {
            outbound = outbound.timeout(timeout);
        }

        let response = outbound.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let body: BodyStream = Box::pin(response.bytes_stream().map_err(UpstreamError::from));

        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}
