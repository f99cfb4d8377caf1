//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! are deserialized directly, using domain types where they parse cleanly.
//!
//! Example configuration:
//!
//! ```toml
//! [gateway]
//! base_url = "https://openrouter.ai/api/v1"
//! api_key_env = "OPENROUTER_API_KEY"
//!
//! [session]
//! default_model = "anthropic/claude-sonnet-4"
//! coordinator_model = "openai/gpt-4.1-mini"
//! rounds = 3
//! turn_order = "sequential"
//! scenario = "debate"
//! accounting = "credit"
//!
//! [budget]
//! guest_credits = 10
//! guest_tokens = 50000
//! credit_cost_per_call = 1
//!
//! [pricing."anthropic/claude-sonnet-4"]
//! input_per_million = 3.0
//! output_per_million = 15.0
//! ```

use colloquy_domain::{AccountingMode, ModelPricing, ResponseLength, Scenario, TurnOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub session: FileSessionConfig,
    pub budget: FileBudgetConfig,
    /// Per-model pricing, keyed by model id.
    pub pricing: HashMap<String, FilePricingEntry>,
}

impl FileConfig {
    /// Pricing table in domain form.
    pub fn pricing_table(&self) -> HashMap<String, ModelPricing> {
        self.pricing
            .iter()
            .map(|(model, entry)| {
                (
                    model.clone(),
                    ModelPricing::new(entry.input_per_million, entry.output_per_million),
                )
            })
            .collect()
    }
}

/// `[gateway]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    pub base_url: String,
    /// Environment variable holding the shared API credential.
    pub api_key_env: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
        }
    }
}

/// `[session]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Model used for agents with no explicit model.
    pub default_model: String,
    /// Model for popcorn speaker selection; defaults to the first agent's.
    pub coordinator_model: Option<String>,
    pub rounds: u32,
    pub turn_order: TurnOrder,
    pub scenario: Scenario,
    pub response_length: ResponseLength,
    pub accounting: AccountingMode,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            default_model: "anthropic/claude-sonnet-4".to_string(),
            coordinator_model: None,
            rounds: 3,
            turn_order: TurnOrder::Sequential,
            scenario: Scenario::Debate,
            response_length: ResponseLength::Standard,
            accounting: AccountingMode::Credit,
        }
    }
}

/// `[budget]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBudgetConfig {
    /// Credit allowance for a fresh guest session.
    pub guest_credits: u64,
    /// Token allowance for a fresh guest session in token mode.
    pub guest_tokens: u64,
    /// Flat credit cost of one billable call.
    pub credit_cost_per_call: u64,
}

impl Default for FileBudgetConfig {
    fn default() -> Self {
        Self {
            guest_credits: 10,
            guest_tokens: 50_000,
            credit_cost_per_call: 1,
        }
    }
}

/// One `[pricing."vendor/model"]` entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePricingEntry {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.gateway.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.session.rounds, 3);
        assert_eq!(config.session.turn_order, TurnOrder::Sequential);
        assert_eq!(config.budget.guest_credits, 10);
        assert!(config.pricing.is_empty());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [gateway]
            base_url = "http://localhost:8080/v1"

            [session]
            default_model = "x/y"
            turn_order = "popcorn"
            accounting = "tokens"

            [budget]
            guest_tokens = 1000

            [pricing."x/y"]
            input_per_million = 3.0
            output_per_million = 15.0
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gateway.base_url, "http://localhost:8080/v1");
        // Unset fields keep their defaults.
        assert_eq!(config.gateway.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.session.turn_order, TurnOrder::Popcorn);
        assert_eq!(config.session.accounting, AccountingMode::TokenBudget);
        assert_eq!(config.budget.guest_tokens, 1000);
        assert_eq!(config.budget.guest_credits, 10);

        let pricing = config.pricing_table();
        assert_eq!(pricing["x/y"], ModelPricing::new(3.0, 15.0));
    }
}
