//! Shared blocking HTTP plumbing.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use medassist_contracts::error::{AssistError, AssistResult, GenerationError, ServiceError};

/// Build a blocking client with a total request timeout.
pub(crate) fn client(timeout_secs: u64) -> AssistResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AssistError::ConfigError {
            reason: format!("failed to create HTTP client: {}", e),
        })
}

pub(crate) fn generation_send_error(e: reqwest::Error, timeout_secs: u64) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout(timeout_secs)
    } else {
        GenerationError::Http(format!("request failed: {}", e))
    }
}

pub(crate) fn service_send_error(e: reqwest::Error, timeout_secs: u64) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout(timeout_secs)
    } else {
        ServiceError::Http(format!("request failed: {}", e))
    }
}

/// Read a successful generation response as JSON.
pub(crate) fn generation_json(
    response: Response,
    backend: &str,
) -> Result<serde_json::Value, GenerationError> {
    let status = response.status();
    if !status.is_success() {
        return Err(GenerationError::Status { backend: backend.to_string(), status: status.as_u16() });
    }
    response
        .json()
        .map_err(|e| GenerationError::InvalidResponse(format!("failed to parse response: {}", e)))
}

/// Trim generated text, rejecting blank output.
pub(crate) fn non_empty(text: &str) -> Result<String, GenerationError> {
    let text = text.trim();
    if text.is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text.to_string())
    }
}
