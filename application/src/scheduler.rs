//! Turn scheduler
//!
//! Decides, per round, which agent speaks and in what order, under three
//! policies: fixed sequential, a fresh random permutation per round, and
//! AI-arbitrated popcorn. Popcorn selections are made by a coordinator
//! model whose reply is strictly parsed; any parse failure or call error
//! falls back deterministically to the first unspoken agent so a round can
//! never fail on selection.

use crate::ports::model_gateway::{ApiCredential, ChatRequest, ModelGateway};
use colloquy_domain::{
    AgentId, COORDINATOR_CONTEXT_WINDOW, Conversation, Model, ResponseLength, TurnOrder,
    coordinator_prompt, coordinator_system, parse_speaker_choice,
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TurnScheduler<G> {
    gateway: Arc<G>,
    policy: TurnOrder,
    coordinator_model: Model,
    credential: Option<ApiCredential>,
}

impl<G: ModelGateway> TurnScheduler<G> {
    pub fn new(
        gateway: Arc<G>,
        policy: TurnOrder,
        coordinator_model: Model,
        credential: Option<ApiCredential>,
    ) -> Self {
        Self {
            gateway,
            policy,
            coordinator_model,
            credential,
        }
    }

    pub fn policy(&self) -> TurnOrder {
        self.policy
    }

    /// Upfront speaking order for one round.
    ///
    /// Sequential returns the fixed roster order; Random draws a fresh
    /// permutation for this round only. Popcorn rounds are scheduled turn
    /// by turn via [`next_speaker`](Self::next_speaker) instead, so the
    /// roster order is returned unchanged.
    pub fn round_order(&self, roster: &[AgentId]) -> Vec<AgentId> {
        match self.policy {
            TurnOrder::Sequential | TurnOrder::Popcorn => roster.to_vec(),
            TurnOrder::Random => {
                let mut order = roster.to_vec();
                order.shuffle(&mut rand::rng());
                order
            }
        }
    }

    /// Popcorn selection of the next speaker.
    ///
    /// `unspoken` pairs each remaining agent with its display name, in
    /// fixed roster order; the first entry is the deterministic fallback.
    /// The coordinator is only consulted when there is an actual choice to
    /// make and prior context to make it from.
    pub async fn next_speaker(
        &self,
        conversation: &Conversation,
        unspoken: &[(AgentId, String)],
    ) -> AgentId {
        let ids: Vec<AgentId> = unspoken.iter().map(|(id, _)| *id).collect();
        let fallback = ids[0];

        if ids.len() == 1 || conversation.is_empty() {
            return fallback;
        }

        let recent = conversation.last_n(COORDINATOR_CONTEXT_WINDOW);
        let request = ChatRequest {
            model: self.coordinator_model.clone(),
            persona: coordinator_system().to_string(),
            prompt: coordinator_prompt(recent, unspoken),
            response_length: ResponseLength::Brief,
            temperature: 0.0,
            credential: self.credential.clone(),
        };

        match self.gateway.complete(request).await {
            Ok(outcome) => match parse_speaker_choice(&outcome.content, &ids) {
                Some(choice) => {
                    debug!(agent = %choice, "coordinator selected next speaker");
                    choice
                }
                None => {
                    warn!(
                        reply = %outcome.content,
                        fallback = %fallback,
                        "coordinator reply did not parse; falling back to first unspoken agent"
                    );
                    fallback
                }
            },
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %fallback,
                    "coordinator selection call failed; falling back to first unspoken agent"
                );
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_gateway::{ChatOutcome, GatewayError};
    use async_trait::async_trait;
    use colloquy_domain::{ConversationMessage, Scenario, TokenUsage, Topic};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<u32>,
    }

    impl MockGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for MockGateway {
        async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, GatewayError> {
            *self.calls.lock().unwrap() += 1;
            let content = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok("".to_string()))?;
            Ok(ChatOutcome {
                content,
                usage: Some(TokenUsage::from_counts(5, 5)),
                resolved_model: request.model,
                fallback_used: false,
            })
        }
    }

    fn conversation_with_messages(count: u32) -> Conversation {
        let mut convo = Conversation::new(Topic::new("t"), Scenario::Debate);
        for round in 1..=count {
            convo.push(ConversationMessage::agent(
                AgentId::A,
                "Nova",
                "text",
                Model::new("x/y"),
                "p",
                round,
            ));
        }
        convo
    }

    fn unspoken_all() -> Vec<(AgentId, String)> {
        vec![
            (AgentId::A, "Nova".to_string()),
            (AgentId::B, "Sage".to_string()),
            (AgentId::C, "Juno".to_string()),
        ]
    }

    fn scheduler(policy: TurnOrder, gateway: MockGateway) -> TurnScheduler<MockGateway> {
        TurnScheduler::new(Arc::new(gateway), policy, Model::new("coord/model"), None)
    }

    #[test]
    fn test_sequential_order_is_fixed() {
        let sched = scheduler(TurnOrder::Sequential, MockGateway::new(vec![]));
        let roster = [AgentId::A, AgentId::B, AgentId::C];
        assert_eq!(sched.round_order(&roster), roster.to_vec());
        assert_eq!(sched.round_order(&roster), roster.to_vec());
    }

    #[test]
    fn test_random_order_is_permutation() {
        let sched = scheduler(TurnOrder::Random, MockGateway::new(vec![]));
        let roster = [AgentId::A, AgentId::B, AgentId::C];
        let mut order = sched.round_order(&roster);
        order.sort();
        assert_eq!(order, roster.to_vec());
    }

    #[tokio::test]
    async fn test_popcorn_uses_coordinator_choice() {
        let gateway = MockGateway::new(vec![Ok("C: strongest rebuttal pending".to_string())]);
        let sched = scheduler(TurnOrder::Popcorn, gateway);
        let convo = conversation_with_messages(2);
        let next = sched.next_speaker(&convo, &unspoken_all()).await;
        assert_eq!(next, AgentId::C);
    }

    #[tokio::test]
    async fn test_popcorn_falls_back_on_parse_failure() {
        let gateway = MockGateway::new(vec![Ok("everyone should speak!".to_string())]);
        let sched = scheduler(TurnOrder::Popcorn, gateway);
        let convo = conversation_with_messages(2);
        let next = sched.next_speaker(&convo, &unspoken_all()).await;
        assert_eq!(next, AgentId::A);
    }

    #[tokio::test]
    async fn test_popcorn_falls_back_on_call_error() {
        let gateway = MockGateway::new(vec![Err(GatewayError::Network("reset".to_string()))]);
        let sched = scheduler(TurnOrder::Popcorn, gateway);
        let convo = conversation_with_messages(2);
        let unspoken = vec![
            (AgentId::B, "Sage".to_string()),
            (AgentId::C, "Juno".to_string()),
        ];
        let next = sched.next_speaker(&convo, &unspoken).await;
        assert_eq!(next, AgentId::B);
    }

    #[tokio::test]
    async fn test_popcorn_skips_call_for_single_candidate() {
        let gateway = MockGateway::new(vec![]);
        let sched = scheduler(TurnOrder::Popcorn, gateway);
        let convo = conversation_with_messages(2);
        let unspoken = vec![(AgentId::C, "Juno".to_string())];
        let next = sched.next_speaker(&convo, &unspoken).await;
        assert_eq!(next, AgentId::C);
        assert_eq!(*sched.gateway.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_popcorn_first_turn_has_no_context_and_no_call() {
        let gateway = MockGateway::new(vec![]);
        let sched = scheduler(TurnOrder::Popcorn, gateway);
        let convo = Conversation::new(Topic::new("t"), Scenario::Debate);
        let next = sched.next_speaker(&convo, &unspoken_all()).await;
        assert_eq!(next, AgentId::A);
        assert_eq!(*sched.gateway.calls.lock().unwrap(), 0);
    }
}
