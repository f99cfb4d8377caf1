//! Inputs, outputs, and errors of the debate orchestrator

use crate::ports::ledger::LedgerError;
use crate::ports::message_sink::SinkError;
use colloquy_domain::{ConversationMessage, DomainError};
use serde::Serialize;
use thiserror::Error;

/// Why a run stopped before finishing its rounds.
///
/// All of these are turn-local: messages produced before the halt are
/// retained and already delivered to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HaltReason {
    /// The ledger rejected a debit or reported an empty balance. Expected
    /// and non-fatal.
    BudgetExhausted { remaining: u64 },
    /// The provider throttled the caller; resumable after a credential
    /// change.
    RateLimited { remediation: String },
    /// One gateway call timed out.
    Timeout,
    /// One gateway call failed in transport or returned garbage.
    Network { detail: String },
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HaltReason::BudgetExhausted { remaining } => {
                write!(f, "budget exhausted ({remaining} remaining)")
            }
            HaltReason::RateLimited { remediation } => write!(f, "rate limited: {remediation}"),
            HaltReason::Timeout => write!(f, "gateway call timed out"),
            HaltReason::Network { detail } => write!(f, "network failure: {detail}"),
        }
    }
}

/// Terminal status of one orchestrator operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunStatus {
    /// Every requested turn completed.
    Complete,
    /// The run stopped early; remaining turns were skipped, prior messages
    /// kept.
    Halted(HaltReason),
}

impl RunStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, RunStatus::Complete)
    }
}

/// Report of one orchestrator operation.
#[derive(Debug, Clone, Serialize)]
pub struct RoundsReport {
    /// Messages produced by this operation, in emission order.
    pub messages: Vec<ConversationMessage>,
    /// Rounds fully completed over the whole conversation so far.
    pub completed_rounds: u32,
    pub status: RunStatus,
}

/// Session-fatal errors of the orchestrator.
///
/// Turn-local failures are reported through [`RunStatus::Halted`] instead;
/// only conditions that invalidate the whole run surface here.
#[derive(Error, Debug)]
pub enum DebateError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Conversation already started")]
    AlreadyStarted,

    #[error("Conversation not started")]
    NotStarted,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Message sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
