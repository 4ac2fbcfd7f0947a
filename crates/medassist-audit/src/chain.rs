//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. session id as its hyphenated UTF-8 form
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the event record

use sha2::{Digest, Sha256};

use medassist_contracts::{
    error::{AssistError, AssistResult},
    journal::EventRecord,
    session::SessionId,
};

use crate::entry::JournalEntry;

/// Compute the SHA-256 hash of one journal entry.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(
    session: &SessionId,
    sequence: u64,
    record: &EventRecord,
    prev_hash: &str,
) -> AssistResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| AssistError::JournalWriteFailed {
        reason: format!("event record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(session.to_string().as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify one session's chain.
///
/// Valid when every entry links to its predecessor (or the genesis hash),
/// sequences count up from 0, and every stored hash matches the recomputed
/// one. An empty chain is valid.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH.to_string();

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&entry.session_id, entry.sequence, &entry.record, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
