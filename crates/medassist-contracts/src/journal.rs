//! Journal records: the observable trail of one session.
//!
//! The assistant emits one `EventRecord` per notable decision or degraded
//! path. The event sink appends them; records are never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    session::BackendKind,
    triage::{TriageLevel, TriageSource},
};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    MessageReceived,

    TriageDecided {
        level: TriageLevel,
        source: TriageSource,
    },

    /// The reply was replaced by the critical warning.
    EmergencyShortCircuit {
        /// `"triage"` or `"keyword"`, whichever signalled first.
        trigger: String,
    },

    MedicationsMatched {
        names: Vec<String>,
    },

    /// A best-effort external service failed and was skipped.
    ExternalFailure {
        service: String,
        reason: String,
    },

    /// A generation backend failed and the router moved on.
    GenerationFallback {
        from: BackendKind,
        reason: String,
    },

    ReplyDelivered {
        /// The backend that produced the text, absent when none did.
        backend: Option<BackendKind>,
        degraded: bool,
    },
}

/// An immutable journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Index of the user message within the session, starting at 0.
    pub turn: u64,
    pub event: EventKind,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl EventRecord {
    pub fn now(turn: u64, event: EventKind) -> Self {
        Self { turn, event, timestamp: Utc::now() }
    }
}
