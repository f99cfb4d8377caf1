//! Domain error types

use crate::agent::entities::AgentId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents configured for the debate")]
    EmptyRoster,

    #[error("Too many agents: {0} (at most 3 may participate)")]
    TooManyAgents(usize),

    #[error("Duplicate agent id: {0}")]
    DuplicateAgent(AgentId),

    #[error("Invalid agent id: {0}")]
    InvalidAgentId(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid round count: {0} (at least 1 round is required)")]
    InvalidRounds(u32),

    #[error("Agent {0} already spoke this round")]
    AgentAlreadySpoke(AgentId),

    #[error("Agent {0} is not part of this round")]
    AgentNotInRound(AgentId),

    #[error("Round is already complete")]
    RoundComplete,
}
