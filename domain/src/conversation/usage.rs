//! Token usage accounting for a single model call

use serde::{Deserialize, Serialize};

/// Per-model USD pricing, expressed per million tokens (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    /// Local cost estimate for a call:
    /// `prompt/1e6 * price_in + completion/1e6 * price_out`
    pub fn estimate(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        prompt_tokens as f64 / 1e6 * self.input_per_million
            + completion_tokens as f64 / 1e6 * self.output_per_million
    }
}

/// Usage of one gateway call (Value Object)
///
/// Produced exactly once per call and consumed exactly once by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub estimated_cost: f64,
}

impl TokenUsage {
    pub fn from_counts(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            estimated_cost: 0.0,
        }
    }

    /// Price the usage locally from a pricing table entry.
    pub fn priced(mut self, pricing: &ModelPricing) -> Self {
        self.estimated_cost = pricing.estimate(self.prompt_tokens, self.completion_tokens);
        self
    }

    /// Override the estimate with a provider-reported cost.
    ///
    /// The provider figure wins over local estimation when both exist.
    pub fn with_reported_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = cost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum() {
        let usage = TokenUsage::from_counts(120, 80);
        assert_eq!(usage.total_tokens, 200);
        assert_eq!(usage.estimated_cost, 0.0);
    }

    #[test]
    fn test_local_estimate() {
        let pricing = ModelPricing::new(3.0, 15.0);
        let usage = TokenUsage::from_counts(1_000_000, 2_000_000).priced(&pricing);
        assert!((usage.estimated_cost - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_reported_cost_wins() {
        let pricing = ModelPricing::new(3.0, 15.0);
        let usage = TokenUsage::from_counts(1_000_000, 0)
            .priced(&pricing)
            .with_reported_cost(0.5);
        assert_eq!(usage.estimated_cost, 0.5);
    }
}
