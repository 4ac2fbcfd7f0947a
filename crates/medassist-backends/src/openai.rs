//! OpenAI-compatible chat completions. Serves both OpenAI and Groq.

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

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";
pub const GROQ_MODEL: &str = "llama-3.1-70b-versatile";

pub struct OpenAiGenerator {
    kind: BackendKind,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    client: Client,
}

impl OpenAiGenerator {
    pub fn openai(config: &HostedConfig, generation: &GenerationConfig) -> AssistResult<Self> {
        Self::new(BackendKind::OpenAi, OPENAI_ENDPOINT, OPENAI_MODEL, config, generation)
    }

    pub fn groq(config: &HostedConfig, generation: &GenerationConfig) -> AssistResult<Self> {
        Self::new(BackendKind::Groq, GROQ_ENDPOINT, GROQ_MODEL, config, generation)
    }

    fn new(
        kind: BackendKind,
        default_endpoint: &str,
        default_model: &str,
        config: &HostedConfig,
        generation: &GenerationConfig,
    ) -> AssistResult<Self> {
        Ok(Self {
            kind,
            endpoint: config.endpoint.clone().unwrap_or_else(|| default_endpoint.to_string()),
            model: config.model.clone().unwrap_or_else(|| default_model.to_string()),
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
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ],
        "temperature": temperature,
        "max_tokens": max_tokens,
    })
}

pub fn parse_response(body: &Value) -> Result<String, GenerationError> {
    let text = body
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(Value::as_str)
        .ok_or(GenerationError::EmptyResponse)?;
    non_empty(text)
}

impl Generator for OpenAiGenerator {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| GenerationError::Unconfigured {
            backend: self.kind.id().to_string(),
        })?;

        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        debug!(backend = %self.kind, url = %url, model = %self.model, "calling chat completions");

        let body = build_request(&self.model, self.temperature, self.max_tokens, system_prompt, user_prompt);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| generation_send_error(e, self.timeout_secs))?;

        parse_response(&generation_json(response, self.kind.id())?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use medassist_contracts::{error::GenerationError, session::BackendKind};
    use medassist_core::traits::Generator;

    use crate::config::{GenerationConfig, HostedConfig};

    use super::{build_request, parse_response, OpenAiGenerator};

    #[test]
    fn test_request_has_system_and_user_messages() {
        let body = build_request("gpt-4o-mini", 0.6, 600, "SYSTEM", "USER");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "SYSTEM");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "USER");
        assert_eq!(body["max_tokens"], 600);
    }

    #[test]
    fn test_parse_first_choice() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "First." } },
                { "message": { "role": "assistant", "content": "Second." } },
            ]
        });
        assert_eq!(parse_response(&body).unwrap(), "First.");
    }

    #[test]
    fn test_parse_without_choices_is_empty() {
        assert_eq!(parse_response(&json!({ "choices": [] })), Err(GenerationError::EmptyResponse));
        assert_eq!(
            parse_response(&json!({ "error": { "message": "bad key" } })),
            Err(GenerationError::EmptyResponse)
        );
    }

    #[test]
    fn test_missing_key_is_unconfigured_without_network() {
        let generator =
            OpenAiGenerator::groq(&HostedConfig::default(), &GenerationConfig::default()).unwrap();
        assert_eq!(generator.kind(), BackendKind::Groq);
        assert_eq!(
            generator.generate("s", "u"),
            Err(GenerationError::Unconfigured { backend: "groq".to_string() })
        );
    }
}
