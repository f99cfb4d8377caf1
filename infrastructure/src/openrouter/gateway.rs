//! OpenRouter chat-completion gateway
//!
//! Thin adapter over an OpenRouter-compatible HTTP API. One `complete` call
//! is exactly one HTTP request: no internal retries, no credential
//! rotation. Provider-side model substitution is detected by comparing the
//! response's model id against the requested one.

use crate::openrouter::protocol::{
    ChatCompletionRequest, ChatCompletionResponse, UsageInclude, WireMessage,
};
use async_trait::async_trait;
use colloquy_application::ports::model_gateway::{
    ApiCredential, ChatOutcome, ChatRequest, GatewayError, ModelGateway,
};
use colloquy_domain::{Model, ModelPricing};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway adapter for OpenRouter-compatible providers.
pub struct OpenRouterGateway {
    client: reqwest::Client,
    base_url: String,
    /// Used when a request carries no caller credential.
    shared_credential: Option<ApiCredential>,
    pricing: HashMap<String, ModelPricing>,
}

impl OpenRouterGateway {
    pub fn new(shared_credential: Option<ApiCredential>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, shared_credential)
    }

    pub fn with_base_url(base_url: impl Into<String>, shared_credential: Option<ApiCredential>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            shared_credential,
            pricing: HashMap::new(),
        }
    }

    /// Attach a pricing table used when the provider reports no cost.
    pub fn with_pricing(mut self, pricing: HashMap<String, ModelPricing>) -> Self {
        self.pricing = pricing;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Map an HTTP error status onto the gateway error taxonomy.
fn map_status(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::Authentication(format!("{status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(body.to_string()),
        StatusCode::REQUEST_TIMEOUT => GatewayError::Timeout,
        s if s.is_server_error() => GatewayError::Network(format!("{status}: {body}")),
        _ => GatewayError::Other(format!("unexpected status {status}: {body}")),
    }
}

/// Convert a parsed response into a gateway outcome, detecting fallback.
fn outcome_from_response(
    requested: &Model,
    response: ChatCompletionResponse,
    pricing: &HashMap<String, ModelPricing>,
) -> Result<ChatOutcome, GatewayError> {
    let resolved_model = Model::try_new(response.model.clone())
        .unwrap_or_else(|| requested.clone());
    let fallback_used = resolved_model != *requested;

    let content = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| GatewayError::InvalidResponse("response carried no choices".to_string()))?;

    let usage = response
        .usage
        .map(|u| u.into_token_usage(&resolved_model, pricing));

    Ok(ChatOutcome {
        content,
        usage,
        resolved_model,
        fallback_used,
    })
}

#[async_trait]
impl ModelGateway for OpenRouterGateway {
    async fn complete(&self, request: ChatRequest) -> Result<ChatOutcome, GatewayError> {
        let credential = request
            .credential
            .as_ref()
            .or(self.shared_credential.as_ref())
            .ok_or_else(|| {
                GatewayError::Authentication("no API credential configured".to_string())
            })?;

        let body = ChatCompletionRequest {
            model: request.model.as_str(),
            messages: vec![
                WireMessage {
                    role: "system",
                    content: &request.persona,
                },
                WireMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.response_length.max_tokens(),
            temperature: request.temperature,
            usage: UsageInclude { include: true },
        };

        debug!(model = %request.model, "sending chat completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(credential.secret())
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        outcome_from_response(&request.model, parsed, &self.pricing)
    }
}
