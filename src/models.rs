// Rows, request bodies and response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Color assigned to projects created without one
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

/// Shortest password accepted on create or update
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row as listed for admins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    pub has_supabase_config: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubProject {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectFile {
    pub id: Uuid,
    pub sub_project_id: Uuid,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub storage_path: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Per-user external database credentials
#[derive(Debug, Clone, PartialEq)]
pub struct UserSupabaseConfig {
    pub id: Uuid,
    pub user_id: Uuid,
    pub supabase_url: String,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    pub use_service_role: bool,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSupabaseConfig {
    /// The key selected by `use_service_role`, if it is present and non-blank
    pub fn active_key(&self) -> Option<&str> {
        let key = if self.use_service_role {
            self.service_role_key.as_deref()
        } else {
            self.anon_key.as_deref()
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.trim().is_empty() && self.active_key().is_some()
    }

    pub fn view(&self) -> SupabaseConfigView {
        SupabaseConfigView {
            user_id: self.user_id,
            supabase_url: self.supabase_url.clone(),
            has_anon_key: has_text(&self.anon_key),
            has_service_role_key: has_text(&self.service_role_key),
            use_service_role: self.use_service_role,
            is_configured: self.is_configured(),
            last_verified_at: self.last_verified_at,
            updated_at: self.updated_at,
        }
    }
}

/// Credential-free rendering of a [`UserSupabaseConfig`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfigView {
    pub user_id: Uuid,
    pub supabase_url: String,
    pub has_anon_key: bool,
    pub has_service_role_key: bool,
    pub use_service_role: bool,
    pub is_configured: bool,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Normalized email and untouched password
    pub fn credentials(&self) -> Result<(String, &str), ApiError> {
        let email = required(&self.email, "email")?.to_lowercase();
        if self.password.is_empty() {
            return Err(ApiError::BadRequest("password is required".to_string()));
        }
        Ok((email, self.password.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_verified: Option<bool>,
}

/// Validated input for inserting a user; the password is still plaintext
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_verified: bool,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let email = email(&self.email)?;
        let name = required(&self.name, "name")?;
        password(&self.password)?;

        Ok(NewUser {
            email,
            password: self.password,
            name,
            is_verified: self.is_verified.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_verified: Option<bool>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserChanges, ApiError> {
        let email = self.email.as_deref().map(email).transpose()?;
        let name = self
            .name
            .as_deref()
            .map(|n| required(n, "name"))
            .transpose()?;
        if let Some(p) = self.password.as_deref() {
            password(p)?;
        }

        Ok(UserChanges {
            email,
            name,
            password: self.password,
            is_verified: self.is_verified,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: String,
}

impl CreateProjectRequest {
    pub fn validate(self) -> Result<NewProject, ApiError> {
        Ok(NewProject {
            name: required(&self.name, "name")?,
            description: optional(self.description),
            icon: optional(self.icon),
            color: optional(self.color).unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

/// Fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateProjectRequest {
    pub fn validate(self) -> Result<ProjectChanges, ApiError> {
        Ok(ProjectChanges {
            name: self
                .name
                .as_deref()
                .map(|n| required(n, "name"))
                .transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
            icon: self.icon.map(|i| i.trim().to_string()),
            color: optional(self.color),
            sort_order: self.sort_order,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CreateSubProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubProject {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CreateSubProjectRequest {
    pub fn validate(self) -> Result<NewSubProject, ApiError> {
        Ok(NewSubProject {
            name: required(&self.name, "name")?,
            description: optional(self.description),
            icon: optional(self.icon),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UpdateSubProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateSubProjectRequest {
    pub fn validate(self) -> Result<SubProjectChanges, ApiError> {
        Ok(SubProjectChanges {
            name: self
                .name
                .as_deref()
                .map(|n| required(n, "name"))
                .transpose()?,
            description: self.description.map(|d| d.trim().to_string()),
            icon: self.icon.map(|i| i.trim().to_string()),
            sort_order: self.sort_order,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SupabaseConfigRequest {
    pub supabase_url: String,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    pub use_service_role: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfigInput {
    pub supabase_url: String,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    pub use_service_role: bool,
}

impl SupabaseConfigRequest {
    pub fn validate(self) -> Result<SupabaseConfigInput, ApiError> {
        let supabase_url = required(&self.supabase_url, "supabase_url")?;
        match reqwest::Url::parse(&supabase_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::BadRequest("Invalid URL format".to_string())),
        }

        Ok(SupabaseConfigInput {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            anon_key: optional(self.anon_key),
            service_role_key: optional(self.service_role_key),
            use_service_role: self.use_service_role.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookMethod {
    #[default]
    Post,
    Get,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebhookTestRequest {
    pub webhook_url: String,
    pub method: WebhookMethod,
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Latest user turn: plain text, or a document with attached images
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatInput {
    Text(String),
    Document {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default)]
        images: Vec<ImageAttachment>,
    },
}

impl ChatInput {
    pub fn is_empty(&self) -> bool {
        match self {
            ChatInput::Text(text) => text.trim().is_empty(),
            ChatInput::Document { text, images } => {
                images.is_empty() && text.as_deref().map_or(true, |t| t.trim().is_empty())
            }
        }
    }
}

impl Default for ChatInput {
    fn default() -> Self {
        ChatInput::Text(String::new())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub input: ChatInput,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.messages.is_empty() && self.input.is_empty() {
            return Err(ApiError::BadRequest("messages or input is required".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Outcome of probing a webhook or credential endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Field validation
// ============================================================================

/// Trimmed value, or 400 when blank
pub fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn email(value: &str) -> Result<String, ApiError> {
    let email = required(value, "email")?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ApiError::BadRequest("Invalid email address".to_string())),
    }
}

fn password(value: &str) -> Result<(), ApiError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
