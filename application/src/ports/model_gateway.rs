//! Model gateway port
//!
//! Defines how the application layer performs one chat-completion call.
//! Implementations (adapters) live in the infrastructure layer. A gateway
//! never retries: one call is one attempt, and retry policy belongs to the
//! orchestrator's callers.

use async_trait::async_trait;
use colloquy_domain::{Model, ResponseLength, TokenUsage};
use thiserror::Error;

/// An API credential for the model provider.
///
/// When a request carries no credential the adapter falls back to the shared
/// credential from its configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

// The secret must not leak through Debug output or logs.
impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiCredential(***)")
    }
}

/// Errors that can occur during a gateway call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Credential rejected. Fatal for the whole run.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Provider throttled the caller. Recoverable by switching credentials.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Transport failure. Surfaced per turn, never retried here.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Whether this error ends the whole run rather than one turn.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GatewayError::Authentication(_))
    }
}

/// One chat-completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: Model,
    /// Persona text sent as the system message.
    pub persona: String,
    pub prompt: String,
    pub response_length: ResponseLength,
    pub temperature: f32,
    pub credential: Option<ApiCredential>,
}

/// Result of one successful chat-completion call.
///
/// `resolved_model` is the id that actually served the request; when the
/// provider substituted the requested model it differs from the request and
/// `fallback_used` is set. Billing must use `resolved_model`.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub content: String,
    pub usage: Option<TokenUsage>,
    pub resolved_model: Model,
    pub fallback_used: bool,
}

/// Gateway for chat-completion calls
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Perform exactly one chat-completion call.
    async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_authentication_is_fatal() {
        assert!(GatewayError::Authentication("bad key".into()).is_fatal());
        assert!(!GatewayError::RateLimited("slow down".into()).is_fatal());
        assert!(!GatewayError::Timeout.is_fatal());
        assert!(!GatewayError::Network("reset".into()).is_fatal());
    }
}
