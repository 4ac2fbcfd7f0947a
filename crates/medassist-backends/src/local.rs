//! Local backend: an Ollama-compatible `/api/generate` endpoint.

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use medassist_contracts::{error::AssistResult, error::GenerationError, session::BackendKind};
use medassist_core::traits::Generator;

use crate::{
    config::LocalConfig,
    http::{client, generation_json, generation_send_error, non_empty},
};

pub struct LocalGenerator {
    config: LocalConfig,
    temperature: f32,
    client: Client,
}

impl LocalGenerator {
    pub fn new(config: LocalConfig, temperature: f32) -> AssistResult<Self> {
        let client = client(config.timeout_secs)?;
        Ok(Self { config, temperature, client })
    }

    fn url(&self) -> String {
        format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'))
    }
}

/// Small local models take the instruction inline, ahead of the question.
pub fn build_request(config: &LocalConfig, temperature: f32, system: &str, user: &str) -> Value {
    json!({
        "model": config.model,
        "prompt": format!("{}\n\n{}", system, user),
        "stream": false,
        "options": {
            "temperature": temperature,
            "top_p": 0.9,
            "repeat_penalty": 1.2,
            "num_predict": config.max_tokens,
        },
    })
}

pub fn parse_response(body: &Value) -> Result<String, GenerationError> {
    let text = body
        .get("response")
        .and_then(Value::as_str)
        .ok_or(GenerationError::EmptyResponse)?;
    non_empty(text)
}

impl Generator for LocalGenerator {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
        let url = self.url();
        debug!(url = %url, model = %self.config.model, "calling local backend");

        let body = build_request(&self.config, self.temperature, system_prompt, user_prompt);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| generation_send_error(e, self.config.timeout_secs))?;

        parse_response(&generation_json(response, "local")?)
    }
}
