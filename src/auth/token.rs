//! Signed session tokens
//!
//! Users and admins hold separate HS256 keys. Every token also names the
//! kind of session it was issued for, and verification rejects a token
//! presented for the other kind.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which credential space a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    User,
    Admin,
}

/// JWT claims carried in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    kind: SessionKind,
    iat: i64,
    exp: i64,
}

/// Identity recovered from a valid token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionPayload {
    User {
        #[serde(rename = "userId")]
        user_id: Uuid,
        #[serde(rename = "type")]
        kind: SessionKind,
    },
    Admin {
        #[serde(rename = "adminId")]
        admin_id: Uuid,
        #[serde(rename = "type")]
        kind: SessionKind,
    },
}

impl SessionPayload {
    pub fn subject(&self) -> Uuid {
        match self {
            SessionPayload::User { user_id, .. } => *user_id,
            SessionPayload::Admin { admin_id, .. } => *admin_id,
        }
    }

    pub fn kind(&self) -> SessionKind {
        match self {
            SessionPayload::User { kind, .. } | SessionPayload::Admin { kind, .. } => *kind,
        }
    }
}

/// Result of checking a token: `valid` is false for every failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<SessionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenVerification {
    fn valid(payload: SessionPayload) -> Self {
        Self {
            valid: true,
            payload: Some(payload),
            error: None,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            payload: None,
            error: Some(error.into()),
        }
    }
}

/// Issues and verifies session tokens for one [`SessionKind`]
#[derive(Clone)]
pub struct TokenSigner {
    kind: SessionKind,
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("kind", &self.kind)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(kind: SessionKind, secret: &str, ttl: Duration) -> Self {
        Self {
            kind,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Token lifetime, also used as the cookie `Max-Age`
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` valid for the signer's lifetime
    pub fn issue(&self, subject: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_expiring(subject, Utc::now() + self.ttl)
    }

    pub(crate) fn issue_expiring(
        &self,
        subject: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: subject,
            kind: self.kind,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Check signature, expiry and session kind
    pub fn verify(&self, token: &str) -> TokenVerification {
        let token = token.trim();
        if token.is_empty() {
            return TokenVerification::invalid("Missing token");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => return TokenVerification::invalid(e.to_string()),
        };

        if claims.kind != self.kind {
            return TokenVerification::invalid("Token type mismatch");
        }

        let payload = match claims.kind {
            SessionKind::User => SessionPayload::User {
                user_id: claims.sub,
                kind: claims.kind,
            },
            SessionKind::Admin => SessionPayload::Admin {
                admin_id: claims.sub,
                kind: claims.kind,
            },
        };
        TokenVerification::valid(payload)
    }
}
