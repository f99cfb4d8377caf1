//! Round state machine
//!
//! Tracks one round of a conversation: which agents are active, who has
//! spoken, and whether the round is complete. A round completes once every
//! active agent has spoken exactly once; the scheduler builds a fresh state
//! for each round.

use crate::agent::entities::AgentId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No agent has spoken yet.
    NotStarted,
    /// The named agent is speaking.
    Turn(AgentId),
    /// Every active agent has spoken exactly once.
    Complete,
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundPhase::NotStarted => write!(f, "not_started"),
            RoundPhase::Turn(id) => write!(f, "turn_{id}"),
            RoundPhase::Complete => write!(f, "complete"),
        }
    }
}

/// State of one round, trimmed to the configured agent count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    active: Vec<AgentId>,
    spoken: Vec<AgentId>,
    phase: RoundPhase,
}

impl RoundState {
    pub fn new(active: &[AgentId]) -> Self {
        Self {
            active: active.to_vec(),
            spoken: Vec::new(),
            phase: RoundPhase::NotStarted,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Agents that have not yet spoken, in fixed roster order.
    pub fn unspoken(&self) -> Vec<AgentId> {
        self.active
            .iter()
            .copied()
            .filter(|id| !self.spoken.contains(id))
            .collect()
    }

    /// Agents that have spoken, in speaking order.
    pub fn spoken(&self) -> &[AgentId] {
        &self.spoken
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Mark an agent as the current speaker.
    pub fn begin_turn(&mut self, agent: AgentId) -> Result<(), DomainError> {
        if self.is_complete() {
            return Err(DomainError::RoundComplete);
        }
        if !self.active.contains(&agent) {
            return Err(DomainError::AgentNotInRound(agent));
        }
        if self.spoken.contains(&agent) {
            return Err(DomainError::AgentAlreadySpoke(agent));
        }
        self.phase = RoundPhase::Turn(agent);
        Ok(())
    }

    /// Record that the current speaker finished; completes the round once
    /// every active agent has spoken.
    pub fn finish_turn(&mut self, agent: AgentId) -> Result<(), DomainError> {
        if self.phase != RoundPhase::Turn(agent) {
            return Err(DomainError::AgentNotInRound(agent));
        }
        self.spoken.push(agent);
        self.phase = if self.spoken.len() == self.active.len() {
            RoundPhase::Complete
        } else {
            RoundPhase::NotStarted
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_completes_after_all_spoke() {
        let mut round = RoundState::new(&[AgentId::A, AgentId::B]);
        assert_eq!(round.phase(), RoundPhase::NotStarted);

        round.begin_turn(AgentId::A).unwrap();
        round.finish_turn(AgentId::A).unwrap();
        assert!(!round.is_complete());

        round.begin_turn(AgentId::B).unwrap();
        round.finish_turn(AgentId::B).unwrap();
        assert!(round.is_complete());
    }

    #[test]
    fn test_agent_cannot_speak_twice() {
        let mut round = RoundState::new(&[AgentId::A, AgentId::B]);
        round.begin_turn(AgentId::A).unwrap();
        round.finish_turn(AgentId::A).unwrap();
        assert_eq!(
            round.begin_turn(AgentId::A).unwrap_err(),
            DomainError::AgentAlreadySpoke(AgentId::A)
        );
    }

    #[test]
    fn test_inactive_agent_rejected() {
        let mut round = RoundState::new(&[AgentId::A]);
        assert_eq!(
            round.begin_turn(AgentId::C).unwrap_err(),
            DomainError::AgentNotInRound(AgentId::C)
        );
    }

    #[test]
    fn test_complete_round_rejects_turns() {
        let mut round = RoundState::new(&[AgentId::A]);
        round.begin_turn(AgentId::A).unwrap();
        round.finish_turn(AgentId::A).unwrap();
        assert_eq!(
            round.begin_turn(AgentId::A).unwrap_err(),
            DomainError::RoundComplete
        );
    }

    #[test]
    fn test_unspoken_keeps_roster_order() {
        let mut round = RoundState::new(&[AgentId::A, AgentId::B, AgentId::C]);
        round.begin_turn(AgentId::B).unwrap();
        round.finish_turn(AgentId::B).unwrap();
        assert_eq!(round.unspoken(), vec![AgentId::A, AgentId::C]);
        assert_eq!(round.spoken(), &[AgentId::B]);
    }
}
