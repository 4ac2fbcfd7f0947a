//! Journal entry and sealed log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medassist_contracts::{journal::EventRecord, session::SessionId};

/// One link of a session's hash chain.
///
/// Changing any field, including those of the embedded `record`, breaks
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the session's chain, starting at 0.
    pub sequence: u64,

    pub session_id: SessionId,

    pub record: EventRecord,

    /// Hash of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of one session's journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    pub session_id: SessionId,

    /// All entries in chain order.
    pub entries: Vec<JournalEntry>,

    /// Whether the session was finalized before the export.
    pub ended: bool,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last entry. Empty when the log is empty.
    pub terminal_hash: String,
}
