//! # medassist-audit
//!
//! Append-only, SHA-256 hash-chained event journal for medassist sessions.
//!
//! ## Overview
//!
//! Every event the assistant records is wrapped in a `JournalEntry` linked to
//! the previous entry of the same session by its SHA-256 hash. Editing any
//! entry breaks the chain and is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medassist_audit::InMemoryJournal;
//!
//! let journal = InMemoryJournal::new();
//! let assistant = Assistant::new(knowledge, triage, router, Box::new(journal.clone()));
//! // ... respond(...) ...
//! assert!(journal.verify_integrity());
//! let log = journal.export(session.id());
//! ```

pub mod chain;
pub mod entry;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use entry::{JournalEntry, SessionLog};
pub use memory::InMemoryJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────
