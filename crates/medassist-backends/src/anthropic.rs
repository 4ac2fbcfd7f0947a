//! Anthropic messages API.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use medassist_contracts::{
    error::{AssistResult, GenerationError},
    session::BackendKind,
};
use medassist_core::traits::Generator;

use crate::{
    config::{GenerationConfig, HostedConfig},
    http::{client, generation_json, generation_send_error, non_empty},
};

pub const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicGenerator {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    client: Client,
}

impl AnthropicGenerator {
    pub fn new(config: &HostedConfig, generation: &GenerationConfig) -> AssistResult<Self> {
        Ok(Self {
            endpoint: config.endpoint.clone().unwrap_or_else(|| ANTHROPIC_ENDPOINT.to_string()),
            model: config.model.clone().unwrap_or_else(|| ANTHROPIC_MODEL.to_string()),
            api_key: config.api_key.clone(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            timeout_secs: config.timeout_secs,
            client: client(config.timeout_secs)?,
        })
    }
}

pub fn build_request(model: &str, temperature: f32, max_tokens: u32, system: &str, user: &str) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "temperature": temperature,
        "system": system,
        "messages": [ { "role": "user", "content": user } ],
    })
}

/// Concatenate the text blocks of a messages response.
pub fn parse_response(body: &Value) -> Result<String, GenerationError> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or(GenerationError::EmptyResponse)?;

    let text: String = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();
    non_empty(&text)
}

impl Generator for AnthropicGenerator {
    fn kind(&self) -> BackendKind {
        BackendKind::Anthropic
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| GenerationError::Unconfigured {
            backend: BackendKind::Anthropic.id().to_string(),
        })?;

        let url = format!("{}/messages", self.endpoint.trim_end_matches('/'));
        debug!(url = %url, model = %self.model, "calling anthropic messages");

        let body = build_request(&self.model, self.temperature, self.max_tokens, system_prompt, user_prompt);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .map_err(|e| generation_send_error(e, self.timeout_secs))?;

        parse_response(&generation_json(response, "anthropic")?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use medassist_contracts::error::GenerationError;

    use super::{build_request, parse_response};

    #[test]
    fn test_request_uses_system_field() {
        let body = build_request("claude", 0.6, 600, "SYSTEM", "USER");
        assert_eq!(body["system"], "SYSTEM");
        assert_eq!(body["messages"][0]["content"], "USER");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["max_tokens"], 600);
    }

    #[test]
    fn test_parse_joins_text_blocks() {
        let body = json!({
            "content": [
                { "type": "text", "text": "Drink water. " },
                { "type": "tool_use", "id": "x" },
                { "type": "text", "text": "Rest." },
            ]
        });
        assert_eq!(parse_response(&body).unwrap(), "Drink water. Rest.");
    }

    #[test]
    fn test_parse_without_text_is_empty() {
        assert_eq!(parse_response(&json!({ "content": [] })), Err(GenerationError::EmptyResponse));
        assert_eq!(parse_response(&json!({})), Err(GenerationError::EmptyResponse));
    }
}
