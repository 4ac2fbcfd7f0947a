//! Assistant configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! document (or no file at all) is a valid configuration. Credentials are
//! never read from the file; `with_env` overlays them from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use medassist_contracts::{
    error::{AssistError, AssistResult},
    session::BackendKind,
};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const INFERMEDICA_APP_ID: &str = "INFERMEDICA_APP_ID";
pub const INFERMEDICA_APP_KEY: &str = "INFERMEDICA_APP_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub generation: GenerationConfig,
    pub local: LocalConfig,
    pub openai: HostedConfig,
    pub anthropic: HostedConfig,
    pub groq: HostedConfig,
    pub triage_service: TriageServiceConfig,
    pub labels: LabelConfig,
    /// Replace the built-in knowledge base.
    pub knowledge_path: Option<PathBuf>,
    /// Replace the built-in triage policy.
    pub triage_policy_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// `"auto"` or a backend id.
    pub backend: String,
    pub temperature: f32,
    /// Output bound for hosted backends.
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { backend: "auto".to_string(), temperature: 0.6, max_tokens: 600 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3.2:1b".to_string(),
            max_tokens: 256,
            timeout_secs: 120,
        }
    }
}

/// Settings shared by the hosted backends. Unset endpoint and model fall
/// back to each provider's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostedConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self { endpoint: None, model: None, timeout_secs: 30, api_key: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageServiceConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    #[serde(skip)]
    pub app_id: Option<String>,
    #[serde(skip)]
    pub app_key: Option<String>,
}

impl Default for TriageServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.infermedica.com/v3/triage".to_string(),
            timeout_secs: 8,
            app_id: None,
            app_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.fda.gov/drug/label.json".to_string(),
            timeout_secs: 8,
        }
    }
}

impl AssistantConfig {
    pub fn from_toml_str(s: &str) -> AssistResult<Self> {
        toml::from_str(s).map_err(|e| AssistError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> AssistResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AssistError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> AssistResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlay credentials from the process environment.
    pub fn with_env(self) -> Self {
        self.with_credentials(|name| std::env::var(name).ok())
    }

    /// Overlay credentials from `lookup`. Blank values count as unset.
    pub fn with_credentials(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        self.openai.api_key = get(OPENAI_API_KEY);
        self.anthropic.api_key = get(ANTHROPIC_API_KEY);
        self.groq.api_key = get(GROQ_API_KEY);
        self.triage_service.app_id = get(INFERMEDICA_APP_ID);
        self.triage_service.app_key = get(INFERMEDICA_APP_KEY);
        self
    }

    /// The explicitly configured backend; `None` for `"auto"`.
    pub fn selected_backend(&self) -> AssistResult<Option<BackendKind>> {
        let id = self.generation.backend.trim();
        if id.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        BackendKind::from_id(id).map(Some).ok_or_else(|| AssistError::ConfigError {
            reason: format!(
                "unknown generation backend '{}' (expected auto, local, openai, anthropic or groq)",
                id
            ),
        })
    }
}

/// Backends usable with this configuration, in selection priority order:
/// the hosted ones whose key is present, then the local one.
pub fn available_backends(config: &AssistantConfig) -> Vec<BackendKind> {
    let hosted = [
        (BackendKind::Groq, &config.groq),
        (BackendKind::OpenAi, &config.openai),
        (BackendKind::Anthropic, &config.anthropic),
    ];
    let mut backends: Vec<BackendKind> = hosted
        .into_iter()
        .filter(|(_, cfg)| cfg.api_key.is_some())
        .map(|(kind, _)| kind)
        .collect();
    backends.push(BackendKind::Local);
    backends
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use medassist_contracts::{error::AssistError, session::BackendKind};

    use super::{available_backends, AssistantConfig};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_empty_document_is_defaults() {
        let config = AssistantConfig::from_toml_str("").unwrap();
        assert_eq!(config.generation.backend, "auto");
        assert!((config.generation.temperature - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.generation.max_tokens, 600);
        assert_eq!(config.local.max_tokens, 256);
        assert_eq!(config.local.timeout_secs, 120);
        assert_eq!(config.openai.timeout_secs, 30);
        assert_eq!(config.triage_service.timeout_secs, 8);
        assert!(config.labels.enabled);
        assert!(config.knowledge_path.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AssistantConfig::from_toml_str(
            r#"
            knowledge_path = "/etc/medassist/knowledge.toml"

            [generation]
            backend = "groq"

            [groq]
            model = "llama-3.3-70b-versatile"

            [labels]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.selected_backend().unwrap(), Some(BackendKind::Groq));
        assert_eq!(config.groq.model.as_deref(), Some("llama-3.3-70b-versatile"));
        assert!(config.groq.endpoint.is_none());
        assert_eq!(config.groq.timeout_secs, 30);
        assert!(!config.labels.enabled);
        assert_eq!(config.labels.timeout_secs, 8);
        assert!(config.knowledge_path.is_some());
    }

    #[test]
    fn test_api_key_in_file_is_ignored() {
        let config = AssistantConfig::from_toml_str(
            r#"
            [openai]
            api_key = "sk-from-file"
            "#,
        );
        // Unknown keys are tolerated but never populate credentials.
        assert!(config.unwrap().openai.api_key.is_none());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        match AssistantConfig::from_toml_str("[generation\nbackend = 1") {
            Err(AssistError::ConfigError { reason }) => assert!(reason.contains("config TOML")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let config =
            AssistantConfig::from_toml_str("[generation]\nbackend = \"mistral\"").unwrap();
        assert!(matches!(config.selected_backend(), Err(AssistError::ConfigError { .. })));
    }

    #[test]
    fn test_available_backends_priority_order() {
        let config = AssistantConfig::default().with_credentials(env(&[
            ("ANTHROPIC_API_KEY", "a"),
            ("OPENAI_API_KEY", "o"),
            ("GROQ_API_KEY", "g"),
        ]));
        assert_eq!(
            available_backends(&config),
            vec![BackendKind::Groq, BackendKind::OpenAi, BackendKind::Anthropic, BackendKind::Local]
        );
    }

    #[test]
    fn test_local_is_always_available() {
        let config = AssistantConfig::default().with_credentials(env(&[("OPENAI_API_KEY", "  ")]));
        assert_eq!(available_backends(&config), vec![BackendKind::Local]);
    }

    #[test]
    fn test_triage_credentials_overlay() {
        let config = AssistantConfig::default().with_credentials(env(&[
            ("INFERMEDICA_APP_ID", "id"),
            ("INFERMEDICA_APP_KEY", "key"),
        ]));
        assert_eq!(config.triage_service.app_id.as_deref(), Some("id"));
        assert_eq!(config.triage_service.app_key.as_deref(), Some("key"));
    }
}
