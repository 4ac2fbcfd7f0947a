//! # medassist-knowledge
//!
//! The static medication, symptom, and wellness knowledge base, and the text
//! heuristics that run over it.
//!
//! ## Overview
//!
//! [`KnowledgeBase`] loads its tables from a TOML document (the embedded
//! `data/knowledge.toml` by default) and exposes:
//!
//! - entity matching: [`KnowledgeBase::find_medications`],
//!   [`KnowledgeBase::find_symptoms`], [`KnowledgeBase::find_wellness`];
//! - the direct emergency check, [`KnowledgeBase::is_emergency`];
//! - pairwise interaction checks, [`KnowledgeBase::check_interaction`];
//! - rendering of context fragments in [`advice`].
//!
//! Every routine normalizes its input with [`normalize`] first and is a pure
//! function of the loaded tables.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use medassist_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin()?;
//! let meds = kb.find_medications("I take Tylenol and Advil");
//! let report = kb.check_interaction("aspirin", "ibuprofen");
//! ```

pub mod advice;
pub mod base;
pub mod interaction;
pub mod matcher;
pub mod normalize;

pub use advice::{medication_details, profile_alerts, symptom_advice, wellness_advice, DISCLAIMER};
pub use base::{AliasCollision, KnowledgeBase};
pub use interaction::SAME_MEDICATION;
pub use normalize::{capitalize, normalize};

// ── Tests ─────────────────────────────────────────────────────────────────────
