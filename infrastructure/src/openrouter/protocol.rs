//! Wire types for the OpenRouter-compatible chat-completions API

use colloquy_domain::{Model, ModelPricing, TokenUsage};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the provider to report usage (including cost) on the response.
    pub usage: UsageInclude,
}

#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UsageInclude {
    pub include: bool,
}

/// Response body of `POST /chat/completions`.
///
/// `model` is the id that actually served the request; on provider-side
/// substitution it differs from the id that was asked for.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: String,
    pub choices: Vec<WireChoice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub struct WireChoice {
    pub message: WireChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct WireChoiceMessage {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct WireUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    /// Provider-reported USD cost, when usage reporting is enabled.
    pub cost: Option<f64>,
}

impl WireUsage {
    /// Convert to domain usage. A provider-reported cost wins; otherwise
    /// the pricing table (keyed by the resolved model id) is consulted.
    pub fn into_token_usage(
        self,
        resolved_model: &Model,
        pricing: &HashMap<String, ModelPricing>,
    ) -> TokenUsage {
        let usage = TokenUsage::from_counts(self.prompt_tokens, self.completion_tokens);
        match self.cost {
            Some(cost) => usage.with_reported_cost(cost),
            None => match pricing.get(resolved_model.as_str()) {
                Some(entry) => usage.priced(entry),
                None => usage,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_response_with_cost() {
        let json = r#"{
            "id": "gen-123",
            "model": "x/y",
            "choices": [{"message": {"role": "assistant", "content": "hello"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19, "cost": 0.00042}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.model, "x/y");
        assert_eq!(response.choices[0].message.content, "hello");
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.cost, Some(0.00042));
    }

    #[test]
    fn test_reported_cost_wins_over_pricing_table() {
        let wire = WireUsage {
            prompt_tokens: 1_000_000,
            completion_tokens: 0,
            cost: Some(0.25),
        };
        let mut pricing = HashMap::new();
        pricing.insert("x/y".to_string(), ModelPricing::new(3.0, 15.0));
        let usage = wire.into_token_usage(&Model::new("x/y"), &pricing);
        assert_eq!(usage.estimated_cost, 0.25);
    }

    #[test]
    fn test_pricing_table_used_without_reported_cost() {
        let wire = WireUsage {
            prompt_tokens: 1_000_000,
            completion_tokens: 1_000_000,
            cost: None,
        };
        let mut pricing = HashMap::new();
        pricing.insert("x/y".to_string(), ModelPricing::new(3.0, 15.0));
        let usage = wire.into_token_usage(&Model::new("x/y"), &pricing);
        assert!((usage.estimated_cost - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_unpriced_model_has_zero_estimate() {
        let wire = WireUsage {
            prompt_tokens: 100,
            completion_tokens: 100,
            cost: None,
        };
        let usage = wire.into_token_usage(&Model::new("unknown/model"), &HashMap::new());
        assert_eq!(usage.estimated_cost, 0.0);
        assert_eq!(usage.total_tokens, 200);
    }

    #[test]
    fn test_request_serializes_messages_in_order() {
        let request = ChatCompletionRequest {
            model: "x/y",
            messages: vec![
                WireMessage {
                    role: "system",
                    content: "persona",
                },
                WireMessage {
                    role: "user",
                    content: "prompt",
                },
            ],
            max_tokens: 640,
            temperature: 0.7,
            usage: UsageInclude { include: true },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "prompt");
        assert_eq!(json["usage"]["include"], true);
    }
}
