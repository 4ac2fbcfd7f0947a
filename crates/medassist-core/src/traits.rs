//! Core trait definitions for the medassist pipeline.
//!
//! These five traits define every seam between the assistant and the world:
//!
//! - `Generator`: untrusted text generation (an LLM backend)
//! - `TriageClassifier`: local, deterministic urgency heuristic
//! - `TriageService`: optional external urgency assessment
//! - `LabelLookup`: optional external drug-label enrichment
//! - `EventSink`: the observability record of every decision
//!
//! The assistant wires them together. External collaborators may fail; the
//! assistant recovers from every failure before a reply is produced.

use medassist_contracts::{
    error::{AssistResult, GenerationError, ServiceError},
    journal::EventRecord,
    knowledge::DrugLabel,
    profile::UserProfile,
    session::{BackendKind, SessionId},
    triage::{TriageLevel, TriageRequest, TriageResult},
};

/// A chat-completion backend.
///
/// Implementations are provider-agnostic: a system instruction plus one user
/// message in, text out. They must not retry; the router owns fallback.
pub trait Generator: Send + Sync {
    /// Which backend this adapter talks to.
    fn kind(&self) -> BackendKind;

    /// Produce a completion for `user_prompt` under `system_prompt`.
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError>;
}

/// The heuristic triage classifier.
///
/// Implementations must be pure functions of their input and must not
/// perform I/O. The assistant calls this whenever the external service is
/// absent or fails.
pub trait TriageClassifier: Send + Sync {
    fn classify(&self, text: &str, profile: &UserProfile) -> TriageResult;
}

/// An external triage service.
pub trait TriageService: Send + Sync {
    /// Ask the service for an urgency level.
    ///
    /// Any error makes the assistant fall back to the heuristic classifier.
    fn assess(&self, request: &TriageRequest) -> Result<TriageLevel, ServiceError>;
}

/// An external drug-label source used for best-effort enrichment.
pub trait LabelLookup: Send + Sync {
    /// Look up the label for `medication` (a canonical name).
    ///
    /// `Ok(None)` means the source has no label for it; errors are journaled
    /// by the assistant and treated the same as `Ok(None)`.
    fn lookup(&self, medication: &str) -> Result<Option<DrugLabel>, ServiceError>;
}

/// The event sink: the append-only observability record.
///
/// Unlike the reply path, a failed write is not fatal; the assistant logs it
/// and continues.
pub trait EventSink: Send + Sync {
    /// Append one record for `session`.
    fn record(&self, session: &SessionId, record: &EventRecord) -> AssistResult<()>;

    /// Mark `session` as ended.
    fn finalize(&self, session: &SessionId) -> AssistResult<()>;
}
