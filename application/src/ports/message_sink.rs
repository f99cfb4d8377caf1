//! Message sink port
//!
//! The orchestrator emits each conversation message to a caller-supplied
//! sink as soon as the turn completes and its debit has been accounted.
//! Messages are never batched.

use async_trait::async_trait;
use colloquy_domain::ConversationMessage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Receives conversation messages as they are produced
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn deliver(&self, message: &ConversationMessage) -> Result<(), SinkError>;
}

/// No-op sink for tests and fire-and-forget runs.
pub struct NullSink;

#[async_trait]
impl MessageSink for NullSink {
    async fn deliver(&self, _message: &ConversationMessage) -> Result<(), SinkError> {
        Ok(())
    }
}
