//! Per-turn prompt construction
//!
//! The builder is the only stateful part of the prompt layer: it owns the
//! display-name cache for the current conversation. Everything else is a
//! pure function of the accumulated history, so identical (history, agent,
//! round) inputs always produce identical prompt text.

use crate::agent::entities::AgentConfig;
use crate::config::ExpertSettings;
use crate::conversation::entities::Conversation;
use crate::prompt::display_name::DisplayNameCache;
use crate::prompt::template::ScenarioTemplates;

pub struct PromptBuilder {
    names: DisplayNameCache,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            names: DisplayNameCache::new(),
        }
    }

    /// Builder with a deterministic name cache, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            names: DisplayNameCache::with_seed(seed),
        }
    }

    /// Must be called at the start of every new conversation so display
    /// names are re-drawn independently of prior conversations.
    pub fn reset(&mut self) {
        self.names.reset();
    }

    /// The display name this conversation uses for an agent.
    pub fn display_name(&mut self, agent: &AgentConfig) -> String {
        self.names.name_for(agent.id)
    }

    /// Round-1 prompt. The opening speaker sees only the topic; later
    /// speakers additionally see the prior round-1 messages verbatim.
    pub fn build_initial(&mut self, conversation: &Conversation, agent: &AgentConfig) -> String {
        let name = self.names.name_for(agent.id);
        let prior: Vec<(String, String)> = conversation
            .messages()
            .iter()
            .map(|m| (m.display_name.clone(), m.message.clone()))
            .collect();

        if prior.is_empty() {
            ScenarioTemplates::opening(conversation.scenario(), conversation.topic().content(), &name)
        } else {
            ScenarioTemplates::joining(
                conversation.scenario(),
                conversation.topic().content(),
                &name,
                &prior,
            )
        }
    }

    /// Continuation prompt for rounds 2..N, embedding the full transcript.
    pub fn build_continuation(
        &mut self,
        conversation: &Conversation,
        agent: &AgentConfig,
        round: u32,
        total_rounds: u32,
        style: Option<&ExpertSettings>,
    ) -> String {
        let name = self.names.name_for(agent.id);
        let transcript = ScenarioTemplates::format_transcript(conversation.messages());
        ScenarioTemplates::continuation(
            conversation.scenario(),
            conversation.topic().content(),
            &name,
            &transcript,
            round,
            total_rounds,
            style,
        )
    }

    /// Prompt for replying to a human message already appended to history.
    pub fn build_user_response(
        &mut self,
        conversation: &Conversation,
        agent: &AgentConfig,
        user_message: &str,
    ) -> String {
        let name = self.names.name_for(agent.id);
        let transcript = ScenarioTemplates::format_transcript(conversation.messages());
        ScenarioTemplates::user_response(
            conversation.scenario(),
            conversation.topic().content(),
            &name,
            &transcript,
            user_message,
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
