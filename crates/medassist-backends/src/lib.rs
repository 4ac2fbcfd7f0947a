//! # medassist-backends
//!
//! Blocking HTTP adapters for every external collaborator of the assistant,
//! and the configuration that wires them.
//!
//! - [`LocalGenerator`]: Ollama-compatible `/api/generate`
//! - [`OpenAiGenerator`]: OpenAI chat completions, also used for Groq
//! - [`AnthropicGenerator`]: Anthropic messages API
//! - [`InfermedicaTriage`]: external triage service
//! - [`OpenFdaLabels`]: openFDA drug-label lookup
//!
//! Adapters never retry. Request bodies are built and responses parsed by
//! free functions so they can be tested without a network.

pub mod anthropic;
pub mod config;
mod http;
pub mod local;
pub mod openai;
pub mod openfda;
pub mod triage_service;

use tracing::info;

use medassist_contracts::{error::AssistResult, session::BackendKind};
use medassist_core::{
    traits::{Generator, LabelLookup, TriageService},
    BackendRouter,
};

pub use anthropic::AnthropicGenerator;
pub use config::{available_backends, AssistantConfig};
pub use local::LocalGenerator;
pub use openai::OpenAiGenerator;
pub use openfda::OpenFdaLabels;
pub use triage_service::InfermedicaTriage;

/// Build the generator for one backend.
pub fn build_generator(kind: BackendKind, config: &AssistantConfig) -> AssistResult<Box<dyn Generator>> {
    let generation = &config.generation;
    Ok(match kind {
        BackendKind::Local => Box::new(LocalGenerator::new(config.local.clone(), generation.temperature)?),
        BackendKind::OpenAi => Box::new(OpenAiGenerator::openai(&config.openai, generation)?),
        BackendKind::Groq => Box::new(OpenAiGenerator::groq(&config.groq, generation)?),
        BackendKind::Anthropic => Box::new(AnthropicGenerator::new(&config.anthropic, generation)?),
    })
}

/// A router holding every available backend, in priority order.
pub fn build_router(config: &AssistantConfig) -> AssistResult<BackendRouter> {
    let mut router = BackendRouter::new();
    for kind in available_backends(config) {
        info!(backend = %kind, label = kind.label(), "generation backend available");
        router.register(build_generator(kind, config)?);
    }
    Ok(router)
}

/// The external triage service, when credentials are configured.
pub fn build_triage_service(config: &AssistantConfig) -> AssistResult<Option<Box<dyn TriageService>>> {
    let service = InfermedicaTriage::from_config(&config.triage_service)?;
    if service.is_some() {
        info!(endpoint = %config.triage_service.endpoint, "external triage service enabled");
    }
    Ok(service.map(|s| Box::new(s) as Box<dyn TriageService>))
}

/// The drug-label lookup, unless disabled.
pub fn build_label_lookup(config: &AssistantConfig) -> AssistResult<Option<Box<dyn LabelLookup>>> {
    if !config.labels.enabled {
        return Ok(None);
    }
    Ok(Some(Box::new(OpenFdaLabels::new(&config.labels)?)))
}
