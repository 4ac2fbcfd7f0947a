//! In-memory implementation of `EventSink`.
//!
//! `InMemoryJournal` keeps one hash chain per session behind a `Mutex`.
//! A finalized session is sealed: later writes to it are rejected.
//!
//! Chains are kept until [`InMemoryJournal::take_sealed`] removes them. A
//! journal shared across many sessions should take each one once it ends.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::Utc;
use tracing::{debug, info};

use medassist_contracts::{
    error::{AssistError, AssistResult},
    journal::EventRecord,
    session::SessionId,
};
use medassist_core::traits::EventSink;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{JournalEntry, SessionLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct Chain {
    pub(crate) entries: Vec<JournalEntry>,
    pub(crate) ended: bool,
}

impl Chain {
    fn last_hash(&self) -> &str {
        self.entries
            .last()
            .map(|e| e.this_hash.as_str())
            .unwrap_or(JournalEntry::GENESIS_HASH)
    }
}

// ── Public journal ────────────────────────────────────────────────────────────

/// An in-memory, append-only event journal.
///
/// Cloning shares the underlying chains, so a caller can keep a handle for
/// export while the assistant owns the boxed sink.
#[derive(Clone, Default)]
pub struct InMemoryJournal {
    pub(crate) chains: Arc<Mutex<HashMap<SessionId, Chain>>>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock still holds consistent chains: every write completes
    /// its push before releasing.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Chain>> {
        self.chains.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot the journal of `session`, if it has written anything.
    pub fn export(&self, session: &SessionId) -> Option<SessionLog> {
        let chains = self.lock();
        chains.get(session).map(|chain| session_log(session, chain))
    }

    /// Export a finalized session and drop its chain.
    ///
    /// Returns `None`, leaving the chain in place, while the session is still
    /// open. Once taken, the session's seal is gone too.
    pub fn take_sealed(&self, session: &SessionId) -> Option<SessionLog> {
        let mut chains = self.lock();
        if !chains.get(session)?.ended {
            return None;
        }
        let chain = chains.remove(session)?;
        debug!(session_id = %session, entry_count = chain.entries.len(), "sealed journal taken");
        Some(session_log(session, &chain))
    }

    /// Sessions with at least one entry or a finalize call.
    pub fn sessions(&self) -> Vec<SessionId> {
        self.lock().keys().cloned().collect()
    }

    /// True when every session's chain verifies.
    pub fn verify_integrity(&self) -> bool {
        self.lock().values().all(|chain| verify_chain(&chain.entries))
    }
}

fn session_log(session: &SessionId, chain: &Chain) -> SessionLog {
    SessionLog {
        session_id: session.clone(),
        entries: chain.entries.clone(),
        ended: chain.ended,
        exported_at: Utc::now(),
        terminal_hash: chain
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default(),
    }
}

// ── EventSink impl ────────────────────────────────────────────────────────────

impl EventSink for InMemoryJournal {
    fn record(&self, session: &SessionId, record: &EventRecord) -> AssistResult<()> {
        let mut chains = self.lock();
        let chain = chains.entry(session.clone()).or_default();

        if chain.ended {
            return Err(AssistError::JournalWriteFailed {
                reason: format!("session {} has already ended", session),
            });
        }

        let sequence = chain.entries.len() as u64;
        let prev_hash = chain.last_hash().to_string();
        let this_hash = hash_entry(session, sequence, record, &prev_hash)?;

        debug!(session_id = %session, sequence, turn = record.turn, "journal entry appended");

        chain.entries.push(JournalEntry {
            sequence,
            session_id: session.clone(),
            record: record.clone(),
            prev_hash,
            this_hash,
        });

        Ok(())
    }

    fn finalize(&self, session: &SessionId) -> AssistResult<()> {
        let mut chains = self.lock();
        let chain = chains.entry(session.clone()).or_default();
        chain.ended = true;

        info!(
            session_id = %session,
            entry_count = chain.entries.len(),
            terminal_hash = %chain.last_hash(),
            "session journal finalized"
        );

        Ok(())
    }
}
