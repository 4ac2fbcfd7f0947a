//! # medassist-core
//!
//! The response pipeline for the medassist health assistant.
//!
//! This crate provides:
//! - The collaborator traits (`Generator`, `TriageClassifier`,
//!   `TriageService`, `LabelLookup`, `EventSink`)
//! - The `BackendRouter` that owns backend selection and fallback order
//! - The `Assistant` that answers user messages for a caller-owned `Session`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medassist_core::{Assistant, BackendRouter, Session};
//!
//! let assistant = Assistant::new(knowledge, classifier, router, journal);
//! let mut session = Session::default();
//! let reply = assistant.respond(&mut session, "I have a headache");
//! ```

pub mod assistant;
pub mod prompts;
pub mod router;
pub mod session;
pub mod traits;

pub use assistant::Assistant;
pub use router::{BackendRouter, RouteOutcome, FALLBACK_BACKEND};
pub use session::Session;
