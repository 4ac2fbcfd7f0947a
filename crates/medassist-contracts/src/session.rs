//! Session identity, chat transcript, and backend selection types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one user session.
///
/// Every journal record written during the session carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the session transcript. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// The generation backends a session can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Small model served by a local inference endpoint.
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
    Groq,
}

impl BackendKind {
    /// Short config/CLI identifier.
    pub fn id(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::OpenAi => "openai",
            BackendKind::Anthropic => "anthropic",
            BackendKind::Groq => "groq",
        }
    }

    /// Human-readable label shown when listing backends.
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Local => "Local (Ollama)",
            BackendKind::OpenAi => "OpenAI (gpt-4o-mini)",
            BackendKind::Anthropic => "Anthropic (Claude 3.5)",
            BackendKind::Groq => "Groq (Llama-3.1-70B)",
        }
    }

    /// Parse a config/CLI identifier; case-insensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "local" => Some(BackendKind::Local),
            "openai" => Some(BackendKind::OpenAi),
            "anthropic" => Some(BackendKind::Anthropic),
            "groq" => Some(BackendKind::Groq),
            _ => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
