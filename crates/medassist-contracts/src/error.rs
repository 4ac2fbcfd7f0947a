//! Error types for the medassist pipeline.
//!
//! `AssistError` covers startup and configuration failures, the only errors
//! allowed to stop the process. `GenerationError` and `ServiceError` are
//! returned by external collaborators and are always recovered by the
//! assistant before a reply is produced.

use thiserror::Error;

/// Startup and wiring errors.
#[derive(Debug, Error)]
pub enum AssistError {
    /// A configuration file is missing, unreadable, or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The knowledge-base document could not be parsed or violates an invariant.
    #[error("knowledge base error: {reason}")]
    KnowledgeError { reason: String },

    /// The triage policy document could not be parsed.
    #[error("triage policy error: {reason}")]
    PolicyError { reason: String },

    /// The event journal could not record an event.
    ///
    /// Never fatal to a reply; the assistant logs it and carries on.
    #[error("journal write failed: {reason}")]
    JournalWriteFailed { reason: String },

    /// Terminal or file I/O failed in the front-end.
    #[error("I/O error: {reason}")]
    Io { reason: String },
}

/// Convenience alias used throughout the medassist crates.
pub type AssistResult<T> = Result<T, AssistError>;

/// Failure of a single generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The backend lacks credentials or an endpoint.
    #[error("backend '{backend}' is not configured")]
    Unconfigured { backend: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("backend '{backend}' answered with HTTP {status}")]
    Status { backend: String, status: u16 },

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("backend returned an empty response")]
    EmptyResponse,

    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    /// No backend is registered with the router at all.
    #[error("no generation backend is available")]
    NoBackend,

    /// Every backend in the attempt order failed.
    #[error("all generation backends failed: {}", attempts.join("; "))]
    Exhausted { attempts: Vec<String> },
}

/// Failure of a best-effort external service (triage, drug labels).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("service answered with HTTP {0}")]
    Status(u16),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}
