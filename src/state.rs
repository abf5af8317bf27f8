use std::time::Duration;

use uuid::Uuid;

use crate::auth::{guard, SessionKind, TokenSigner};
use crate::db::Database;
use crate::error::ApiError;
use crate::settings::Settings;
use crate::upstream::{AgentWebhook, UpstreamError};

/// Everything a request handler needs; cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub user_tokens: TokenSigner,
    pub admin_tokens: TokenSigner,
    pub http: reqwest::Client,
    pub agent: AgentWebhook,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(settings: &Settings, db: Database) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let agent = AgentWebhook::new(
            http.clone(),
            settings.agent.webhook_url.as_deref(),
            settings.agent.timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self {
            db,
            user_tokens: TokenSigner::new(
                SessionKind::User,
                &settings.auth.user_secret,
                chrono::Duration::hours(settings.auth.user_session_hours),
            ),
            admin_tokens: TokenSigner::new(
                SessionKind::Admin,
                &settings.auth.admin_secret,
                chrono::Duration::hours(settings.auth.admin_session_hours),
            ),
            http,
            agent,
            secure_cookies: settings.auth.secure_cookies,
        })
    }

    /// Authenticated user id, or 401
    pub fn require_user(&self, token: Option<&str>) -> Result<Uuid, ApiError> {
        guard::require(&self.user_tokens, token)
    }

    /// Authenticated admin id, or 401
    pub fn require_admin(&self, token: Option<&str>) -> Result<Uuid, ApiError> {
        guard::require(&self.admin_tokens, token)
    }
}
