//! Outbound HTTP: webhook and Supabase credential checks and the agent relay

pub mod agent;
pub mod error;
pub mod check;

pub use agent::{AgentWebhook, RelayedResponse};
pub use error::UpstreamError;
