//! Conversation history entities

use crate::agent::entities::AgentId;
use crate::core::model::Model;
use crate::core::topic::Topic;
use crate::prompt::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Agent(AgentId),
    Human,
}

impl Speaker {
    pub fn agent_id(&self) -> Option<AgentId> {
        match self {
            Speaker::Agent(id) => Some(*id),
            Speaker::Human => None,
        }
    }
}

/// One immutable entry in a conversation (Entity)
///
/// Agent messages are created by the orchestrator after a successful gateway
/// call and carry the model that actually produced them. When the provider
/// silently substituted the requested model, `fallback_used` is set and
/// `original_model` records the id that was asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub speaker: Speaker,
    pub display_name: String,
    pub message: String,
    /// Model that produced the message; `None` for human messages.
    pub model: Option<Model>,
    /// Persona the agent spoke with; `None` for human messages.
    pub persona: Option<String>,
    pub fallback_used: bool,
    pub original_model: Option<Model>,
    pub round: u32,
}

impl ConversationMessage {
    /// Message produced by an agent turn.
    pub fn agent(
        id: AgentId,
        display_name: impl Into<String>,
        message: impl Into<String>,
        model: Model,
        persona: impl Into<String>,
        round: u32,
    ) -> Self {
        Self {
            speaker: Speaker::Agent(id),
            display_name: display_name.into(),
            message: message.into(),
            model: Some(model),
            persona: Some(persona.into()),
            fallback_used: false,
            original_model: None,
            round,
        }
    }

    /// Mark this message as served by a substituted model.
    pub fn with_fallback(mut self, original: Model) -> Self {
        self.fallback_used = true;
        self.original_model = Some(original);
        self
    }

    /// Message interjected by the human observer.
    pub fn human(message: impl Into<String>, round: u32) -> Self {
        Self {
            speaker: Speaker::Human,
            display_name: "User".to_string(),
            message: message.into(),
            model: None,
            persona: None,
            fallback_used: false,
            original_model: None,
            round,
        }
    }
}

/// A debate conversation (Aggregate)
///
/// History is append-only: messages are pushed as turns complete and never
/// mutated or removed afterwards. Replaying the sequence reconstructs exactly
/// the prompts later agents saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    topic: Topic,
    scenario: Scenario,
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new(topic: Topic, scenario: Scenario) -> Self {
        Self {
            topic,
            scenario,
            messages: Vec::new(),
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Messages of a single round, in completion order.
    pub fn round_messages(&self, round: u32) -> Vec<&ConversationMessage> {
        self.messages.iter().filter(|m| m.round == round).collect()
    }

    /// The most recent `n` messages, oldest first.
    pub fn last_n(&self, n: usize) -> &[ConversationMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: AgentId, round: u32) -> ConversationMessage {
        ConversationMessage::agent(id, "Nova", "hello", Model::new("x/y"), "persona", round)
    }

    #[test]
    fn test_append_only_ordering() {
        let mut convo = Conversation::new(Topic::new("t"), Scenario::Debate);
        convo.push(msg(AgentId::A, 1));
        convo.push(msg(AgentId::B, 1));
        convo.push(msg(AgentId::A, 2));
        assert_eq!(convo.len(), 3);
        assert_eq!(convo.round_messages(1).len(), 2);
        assert_eq!(convo.round_messages(2).len(), 1);
    }

    #[test]
    fn test_last_n() {
        let mut convo = Conversation::new(Topic::new("t"), Scenario::Debate);
        for round in 1..=6 {
            convo.push(msg(AgentId::A, round));
        }
        let tail = convo.last_n(4);
        assert_eq!(tail.len(), 4);
        assert_eq!(tail[0].round, 3);
        assert_eq!(convo.last_n(100).len(), 6);
    }

    #[test]
    fn test_fallback_marking() {
        let m = msg(AgentId::A, 1).with_fallback(Model::new("x/y:fast"));
        assert!(m.fallback_used);
        assert_eq!(m.original_model, Some(Model::new("x/y:fast")));
        assert_eq!(m.model, Some(Model::new("x/y")));
    }

    #[test]
    fn test_human_message() {
        let m = ConversationMessage::human("What about cost?", 2);
        assert_eq!(m.speaker, Speaker::Human);
        assert!(m.model.is_none());
        assert!(m.persona.is_none());
        assert_eq!(m.display_name, "User");
    }
}
