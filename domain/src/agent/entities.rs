//! Agent configuration entities

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Position of an agent in the debate (Value Object)
///
/// At most three agents participate; their ids double as the fixed
/// fallback speaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentId {
    A,
    B,
    C,
}

impl AgentId {
    /// All ids in fixed A, B, C order
    pub fn all() -> [AgentId; 3] {
        [AgentId::A, AgentId::B, AgentId::C]
    }

    /// The first `count` ids in fixed order
    pub fn first(count: usize) -> Vec<AgentId> {
        Self::all().into_iter().take(count).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::A => "A",
            AgentId::B => "B",
            AgentId::C => "C",
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(AgentId::A),
            "B" => Ok(AgentId::B),
            "C" => Ok(AgentId::C),
            other => Err(DomainError::InvalidAgentId(other.to_string())),
        }
    }
}

/// Configuration of one debate participant (Entity)
///
/// Set once before a run starts and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: AgentId,
    pub model: Model,
    pub persona: String,
}

impl AgentConfig {
    pub fn new(id: AgentId, model: Model, persona: impl Into<String>) -> Self {
        Self {
            id,
            model,
            persona: persona.into(),
        }
    }
}

/// The ordered set of active agents for one session (Entity)
///
/// Validated at construction: non-empty, at most three, unique ids.
/// Agents are kept in fixed A, B, C order regardless of input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    agents: Vec<AgentConfig>,
}

impl Roster {
    pub fn new(mut agents: Vec<AgentConfig>) -> Result<Self, DomainError> {
        if agents.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        if agents.len() > 3 {
            return Err(DomainError::TooManyAgents(agents.len()));
        }
        agents.sort_by_key(|a| a.id);
        for pair in agents.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(DomainError::DuplicateAgent(pair[0].id));
            }
        }
        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[AgentConfig] {
        &self.agents
    }

    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id).collect()
    }

    pub fn get(&self, id: AgentId) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: AgentId) -> AgentConfig {
        AgentConfig::new(id, Model::new("test/model"), "a persona")
    }

    #[test]
    fn test_agent_id_order() {
        assert_eq!(AgentId::first(2), vec![AgentId::A, AgentId::B]);
        assert!(AgentId::A < AgentId::B);
    }

    #[test]
    fn test_agent_id_parse() {
        assert_eq!("B".parse::<AgentId>().unwrap(), AgentId::B);
        assert!("D".parse::<AgentId>().is_err());
        assert!("a".parse::<AgentId>().is_err());
    }

    #[test]
    fn test_roster_sorts_by_id() {
        let roster = Roster::new(vec![agent(AgentId::C), agent(AgentId::A)]).unwrap();
        assert_eq!(roster.ids(), vec![AgentId::A, AgentId::C]);
    }

    #[test]
    fn test_roster_rejects_empty() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), DomainError::EmptyRoster);
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let err = Roster::new(vec![agent(AgentId::A), agent(AgentId::A)]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateAgent(AgentId::A));
    }

    #[test]
    fn test_roster_rejects_more_than_three() {
        let agents = vec![
            agent(AgentId::A),
            agent(AgentId::B),
            agent(AgentId::C),
            agent(AgentId::A),
        ];
        assert_eq!(
            Roster::new(agents).unwrap_err(),
            DomainError::TooManyAgents(4)
        );
    }

    #[test]
    fn test_roster_get() {
        let roster = Roster::new(vec![agent(AgentId::A), agent(AgentId::B)]).unwrap();
        assert!(roster.get(AgentId::B).is_some());
        assert!(roster.get(AgentId::C).is_none());
    }
}
