//! Debate orchestrator use case
//!
//! Drives a conversation round by round: obtains the speaking order from
//! the scheduler, builds each prompt from the accumulated history, performs
//! the gateway call, charges the usage through the accountant, and emits
//! the message to the caller's sink. Turns are strictly sequential; later
//! prompts depend on earlier turns' exact text.

pub mod types;

use crate::config::SessionConfig;
use crate::ports::accounting::UsageAccountant;
use crate::ports::message_sink::MessageSink;
use crate::ports::model_gateway::{ChatRequest, GatewayError, ModelGateway};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::scheduler::TurnScheduler;
use colloquy_domain::{
    AgentConfig, AgentId, Conversation, ConversationMessage, PromptBuilder, RoundState,
    TokenUsage, Topic, TurnOrder,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use self::types::{DebateError, HaltReason, RoundsReport, RunStatus};

/// Outcome of a single turn attempt.
enum TurnResult {
    Emitted(ConversationMessage),
    Halted(HaltReason),
}

/// Top-level coordinator of one debate conversation.
///
/// Holds the conversation state across `start_conversation`,
/// `continue_rounds`, and `respond_to_user_message`. Configuration is
/// frozen at construction; history and usage records are append-only.
pub struct DebateOrchestrator<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    scheduler: TurnScheduler<G>,
    config: SessionConfig,
    accountant: Arc<dyn UsageAccountant>,
    transcript: Arc<dyn TranscriptLogger>,
    builder: PromptBuilder,
    conversation: Conversation,
    completed_rounds: u32,
    exhausted: bool,
    remaining_hint: u64,
}

impl<G: ModelGateway + 'static> DebateOrchestrator<G> {
    pub fn new(
        gateway: Arc<G>,
        config: SessionConfig,
        accountant: Arc<dyn UsageAccountant>,
        topic: Topic,
    ) -> Self {
        let scheduler = TurnScheduler::new(
            Arc::clone(&gateway),
            config.turn_order,
            config.coordinator_model.clone(),
            config.credential.clone(),
        );
        let conversation = Conversation::new(topic, config.scenario);
        Self {
            gateway,
            scheduler,
            config,
            accountant,
            transcript: Arc::new(NoTranscriptLogger),
            builder: PromptBuilder::new(),
            conversation,
            completed_rounds: 0,
            exhausted: false,
            remaining_hint: 0,
        }
    }

    /// Attach a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = logger;
        self
    }

    /// Seed the display-name cache, for deterministic tests.
    pub fn with_prompt_seed(mut self, seed: u64) -> Self {
        self.builder = PromptBuilder::with_seed(seed);
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    /// Execute round 1, emitting each message to the sink as it completes.
    ///
    /// The opening speaker's prompt is seeded only by the topic; later
    /// round-1 speakers see the prior round-1 text verbatim.
    pub async fn start_conversation(
        &mut self,
        sink: &dyn MessageSink,
    ) -> Result<RoundsReport, DebateError> {
        if self.completed_rounds > 0 || !self.conversation.is_empty() {
            return Err(DebateError::AlreadyStarted);
        }
        // Display names are per conversation; re-draw them now.
        self.builder.reset();
        info!(
            topic = %self.conversation.topic(),
            agents = self.config.roster.len(),
            order = %self.config.turn_order,
            "starting conversation"
        );

        let report = self.run_round(1, sink).await?;
        if report.status.is_complete() {
            self.completed_rounds = 1;
        }
        Ok(RoundsReport {
            completed_rounds: self.completed_rounds,
            ..report
        })
    }

    /// Execute rounds 2..N.
    ///
    /// Stops immediately when the ledger reports exhaustion before a turn,
    /// keeping all previously produced messages and reporting the round as
    /// incomplete.
    pub async fn continue_rounds(
        &mut self,
        sink: &dyn MessageSink,
    ) -> Result<RoundsReport, DebateError> {
        if self.completed_rounds == 0 {
            return Err(DebateError::NotStarted);
        }

        let mut produced = Vec::new();
        for round in (self.completed_rounds + 1)..=self.config.rounds {
            let report = self.run_round(round, sink).await?;
            produced.extend(report.messages);
            match report.status {
                RunStatus::Complete => self.completed_rounds = round,
                RunStatus::Halted(reason) => {
                    return Ok(RoundsReport {
                        messages: produced,
                        completed_rounds: self.completed_rounds,
                        status: RunStatus::Halted(reason),
                    });
                }
            }
        }

        Ok(RoundsReport {
            messages: produced,
            completed_rounds: self.completed_rounds,
            status: RunStatus::Complete,
        })
    }

    /// Convenience: round 1 plus all continuation rounds.
    pub async fn run(&mut self, sink: &dyn MessageSink) -> Result<RoundsReport, DebateError> {
        let mut report = self.start_conversation(sink).await?;
        if report.status.is_complete() && self.config.rounds > 1 {
            let rest = self.continue_rounds(sink).await?;
            report.messages.extend(rest.messages);
            report.completed_rounds = rest.completed_rounds;
            report.status = rest.status;
        }
        Ok(report)
    }

    /// Insert a human message mid-conversation and let every active agent
    /// reply once, in fixed A, B, C order regardless of the session's turn
    /// order. Human-addressed replies stay deterministic.
    pub async fn respond_to_user_message(
        &mut self,
        user_message: &str,
        sink: &dyn MessageSink,
    ) -> Result<RoundsReport, DebateError> {
        if self.conversation.is_empty() {
            return Err(DebateError::NotStarted);
        }

        let round = self.completed_rounds.max(1);
        self.conversation
            .push(ConversationMessage::human(user_message, round));
        self.transcript.log(TranscriptEvent::new(
            "user_message",
            json!({ "round": round, "text": user_message }),
        ));

        let mut produced = Vec::new();
        for agent in self.config.roster.agents().to_vec() {
            if self.exhausted {
                return Ok(self.halted(produced, HaltReason::BudgetExhausted {
                    remaining: self.remaining_hint,
                }));
            }
            let prompt = self
                .builder
                .build_user_response(&self.conversation, &agent, user_message);
            match self.execute_turn(&agent, round, prompt, sink).await? {
                TurnResult::Emitted(message) => produced.push(message),
                TurnResult::Halted(reason) => return Ok(self.halted(produced, reason)),
            }
        }

        Ok(RoundsReport {
            messages: produced,
            completed_rounds: self.completed_rounds,
            status: RunStatus::Complete,
        })
    }

    /// One full round under the session's turn-order policy.
    async fn run_round(
        &mut self,
        round: u32,
        sink: &dyn MessageSink,
    ) -> Result<RoundsReport, DebateError> {
        let roster_ids = self.config.roster.ids();
        let mut state = RoundState::new(&roster_ids);
        let mut produced = Vec::new();

        // Popcorn schedules turn by turn; the other policies fix the whole
        // round's order up front.
        let upfront: Option<Vec<AgentId>> = match self.config.turn_order {
            TurnOrder::Popcorn => None,
            _ => Some(self.scheduler.round_order(&roster_ids)),
        };
        let mut position = 0usize;

        while !state.is_complete() {
            if self.exhausted {
                return Ok(self.halted(produced, HaltReason::BudgetExhausted {
                    remaining: self.remaining_hint,
                }));
            }

            let agent_id = match &upfront {
                Some(order) => {
                    let id = order[position];
                    position += 1;
                    id
                }
                None => {
                    let unspoken = self.named_unspoken(&state);
                    self.scheduler
                        .next_speaker(&self.conversation, &unspoken)
                        .await
                }
            };
            state.begin_turn(agent_id)?;

            let agent = self
                .config
                .roster
                .get(agent_id)
                .cloned()
                .ok_or(colloquy_domain::DomainError::AgentNotInRound(agent_id))?;

            let prompt = if round == 1 {
                self.builder.build_initial(&self.conversation, &agent)
            } else {
                self.builder.build_continuation(
                    &self.conversation,
                    &agent,
                    round,
                    self.config.rounds,
                    self.config.expert.as_ref(),
                )
            };

            match self.execute_turn(&agent, round, prompt, sink).await? {
                TurnResult::Emitted(message) => {
                    produced.push(message);
                    state.finish_turn(agent_id)?;
                }
                TurnResult::Halted(reason) => return Ok(self.halted(produced, reason)),
            }
        }

        Ok(RoundsReport {
            messages: produced,
            completed_rounds: self.completed_rounds,
            status: RunStatus::Complete,
        })
    }

    /// One agent turn: gateway call, debit, then emit.
    ///
    /// The debit happens strictly between receiving the gateway response
    /// and delivering to the sink, so a caller never observes a message
    /// whose cost has not been accounted.
    async fn execute_turn(
        &mut self,
        agent: &AgentConfig,
        round: u32,
        prompt: String,
        sink: &dyn MessageSink,
    ) -> Result<TurnResult, DebateError> {
        let request = ChatRequest {
            model: agent.model.clone(),
            persona: agent.persona.clone(),
            prompt,
            response_length: self.config.response_length,
            temperature: self.config.temperature(),
            credential: self.config.credential.clone(),
        };

        let outcome = match self.gateway.complete(request).await {
            Ok(outcome) => outcome,
            Err(GatewayError::Authentication(msg)) => {
                return Err(DebateError::Authentication(msg));
            }
            Err(GatewayError::RateLimited(msg)) => {
                return Ok(TurnResult::Halted(HaltReason::RateLimited {
                    remediation: format!(
                        "Rate limited by the provider: {msg}. Switch to a different API credential and resume the conversation."
                    ),
                }));
            }
            Err(GatewayError::Timeout) => return Ok(TurnResult::Halted(HaltReason::Timeout)),
            Err(e) => {
                return Ok(TurnResult::Halted(HaltReason::Network {
                    detail: e.to_string(),
                }));
            }
        };

        let usage = outcome
            .usage
            .clone()
            .unwrap_or_else(|| TokenUsage::from_counts(0, 0));
        let receipt = self
            .accountant
            .charge(&usage, &outcome.resolved_model)
            .await?;
        self.transcript.log(TranscriptEvent::new(
            "debit",
            json!({
                "agent": agent.id,
                "round": round,
                "model": outcome.resolved_model,
                "success": receipt.success,
                "remaining": receipt.remaining,
                "used": receipt.used,
            }),
        ));

        if !receipt.success {
            self.exhausted = true;
            self.remaining_hint = receipt.remaining;
            warn!(
                agent = %agent.id,
                round,
                remaining = receipt.remaining,
                "debit rejected; suppressing message and halting remaining turns"
            );
            return Ok(TurnResult::Halted(HaltReason::BudgetExhausted {
                remaining: receipt.remaining,
            }));
        }
        if receipt.remaining == 0 {
            // Balance just ran dry; later turns must not start.
            self.exhausted = true;
            self.remaining_hint = 0;
        }

        let display_name = self.builder.display_name(agent);
        let mut message = ConversationMessage::agent(
            agent.id,
            display_name,
            outcome.content,
            outcome.resolved_model.clone(),
            agent.persona.clone(),
            round,
        );
        if outcome.fallback_used {
            message = message.with_fallback(agent.model.clone());
        }

        sink.deliver(&message).await?;
        self.conversation.push(message.clone());
        self.transcript.log(TranscriptEvent::new(
            "message",
            json!({
                "agent": agent.id,
                "display_name": message.display_name,
                "round": round,
                "model": message.model,
                "fallback_used": message.fallback_used,
            }),
        ));

        Ok(TurnResult::Emitted(message))
    }

    fn named_unspoken(&mut self, state: &RoundState) -> Vec<(AgentId, String)> {
        state
            .unspoken()
            .into_iter()
            .filter_map(|id| {
                self.config
                    .roster
                    .get(id)
                    .map(|agent| (id, self.builder.display_name(agent)))
            })
            .collect()
    }

    fn halted(&self, messages: Vec<ConversationMessage>, reason: HaltReason) -> RoundsReport {
        RoundsReport {
            messages,
            completed_rounds: self.completed_rounds,
            status: RunStatus::Halted(reason),
        }
    }
}
