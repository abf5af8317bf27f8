//! Timed reachability checks for admin tooling

use std::time::Instant;

use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::json;

use super::error::UpstreamError;
use crate::models::{CheckOutcome, UserSupabaseConfig, WebhookMethod};

/// Parse an absolute http(s) URL
pub fn parse_target(raw: &str) -> Result<Url, UpstreamError> {
    let url = Url::parse(raw.trim()).map_err(|_| UpstreamError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(UpstreamError::InvalidUrl),
    }
}

/// Send `request`, returning elapsed milliseconds and the response status
async fn timed(request: RequestBuilder) -> (u64, Result<StatusCode, UpstreamError>) {
    let started = Instant::now();
    let result = request
        .send()
        .await
        .map(|response| response.status())
        .map_err(UpstreamError::from);
    (started.elapsed().as_millis() as u64, result)
}

fn outcome(elapsed: u64, result: Result<StatusCode, UpstreamError>, subject: &str) -> CheckOutcome {
    match result {
        Ok(status) if status.is_success() => CheckOutcome {
            success: true,
            status: Some(status.as_u16()),
            response_time: Some(elapsed),
            verified_at: None,
            error: None,
        },
        Ok(status) => CheckOutcome {
            success: false,
            status: Some(status.as_u16()),
            response_time: Some(elapsed),
            verified_at: None,
            error: Some(format!("{} responded with status {}", subject, status.as_u16())),
        },
        Err(e) => CheckOutcome {
            success: false,
            status: None,
            response_time: Some(elapsed),
            verified_at: None,
            error: Some(e.to_string()),
        },
    }
}

/// Fire one test request at a webhook
///
/// POST carries a small JSON marker payload; GET carries nothing.
pub async fn test_webhook(client: &Client, url: Url, method: WebhookMethod) -> CheckOutcome {
    let request = match method {
        WebhookMethod::Post => client.post(url).json(&json!({
            "test": true,
            "source": "agentdash",
            "timestamp": Utc::now().to_rfc3339(),
        })),
        WebhookMethod::Get => client.get(url),
    };

    let (elapsed, result) = timed(request).await;
    outcome(elapsed, result, "Webhook")
}

/// Check Supabase credentials against the PostgREST root
///
/// Fails with `InvalidUrl` when the stored URL doesn't parse and with
/// `NotConfigured` when the selected key is absent.
pub async fn check_supabase(
    client: &Client,
    config: &UserSupabaseConfig,
) -> Result<CheckOutcome, UpstreamError> {
    let key = config.active_key().ok_or(UpstreamError::NotConfigured("Supabase key"))?;
    let url = parse_target(&format!(
        "{}/rest/v1/",
        config.supabase_url.trim().trim_end_matches('/')
    ))?;

    let request = client
        .get(url)
        .header("apikey", key)
        .bearer_auth(key);

    let (elapsed, result) = timed(request).await;
    let mut outcome = outcome(elapsed, result, "Supabase");
    if outcome.success {
        outcome.verified_at = Some(Utc::now());
    }
    Ok(outcome)
}
