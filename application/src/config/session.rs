//! Resolved per-session configuration
//!
//! All the ad hoc knobs a caller can set (agents, turn order, expert
//! overrides, accounting mode) are resolved into this one structure when
//! the session is created, with documented defaults, and frozen for the
//! run. Nothing is re-derived per call.

use crate::ports::model_gateway::ApiCredential;
use colloquy_domain::{
    AccountingMode, AgentConfig, DomainError, ExpertSettings, Identity, Model, ResponseLength,
    Roster, Scenario, TurnOrder,
};

/// Default sampling temperature when no expert override is present.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Frozen configuration of one debate session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub identity: Identity,
    pub roster: Roster,
    pub scenario: Scenario,
    pub turn_order: TurnOrder,
    pub rounds: u32,
    pub accounting_mode: AccountingMode,
    /// Optional stylistic override; `None` leaves prompts unstyled.
    pub expert: Option<ExpertSettings>,
    pub response_length: ResponseLength,
    /// Model used for popcorn speaker selection.
    pub coordinator_model: Model,
    /// Caller credential; `None` uses the gateway's shared credential.
    pub credential: Option<ApiCredential>,
}

impl SessionConfig {
    /// Create a config with defaults: debate scenario, sequential order,
    /// credit accounting, standard length, no expert override, and the
    /// first agent's model as coordinator.
    pub fn new(identity: Identity, roster: Roster, rounds: u32) -> Result<Self, DomainError> {
        if rounds == 0 {
            return Err(DomainError::InvalidRounds(rounds));
        }
        let coordinator_model = roster.agents()[0].model.clone();
        Ok(Self {
            identity,
            roster,
            scenario: Scenario::default(),
            turn_order: TurnOrder::default(),
            rounds,
            accounting_mode: AccountingMode::default(),
            expert: None,
            response_length: ResponseLength::default(),
            coordinator_model,
            credential: None,
        })
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.turn_order = turn_order;
        self
    }

    pub fn with_accounting_mode(mut self, mode: AccountingMode) -> Self {
        self.accounting_mode = mode;
        self
    }

    pub fn with_expert_settings(mut self, settings: ExpertSettings) -> Self {
        self.expert = Some(settings);
        self
    }

    pub fn with_response_length(mut self, length: ResponseLength) -> Self {
        self.response_length = length;
        self
    }

    pub fn with_coordinator_model(mut self, model: Model) -> Self {
        self.coordinator_model = model;
        self
    }

    pub fn with_credential(mut self, credential: ApiCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sampling temperature for agent turns.
    pub fn temperature(&self) -> f32 {
        self.expert
            .as_ref()
            .map(|e| e.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Agent configs in fixed roster order.
    pub fn agents(&self) -> &[AgentConfig] {
        self.roster.agents()
    }
}
