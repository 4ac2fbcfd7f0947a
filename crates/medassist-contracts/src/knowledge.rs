//! Knowledge-base record types.
//!
//! Records are deserialized once from the knowledge TOML document and are
//! read-only for the life of the process.

use serde::{Deserialize, Serialize};

/// A medication entry keyed by its canonical lowercase name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    /// Canonical lowercase name, unique across the table.
    pub name: String,
    /// Brand or alternate names that resolve to `name`.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub uses: String,
    /// Stored for completeness; never rendered to the user.
    pub dosage_adult: String,
    /// Stored for completeness; never rendered to the user.
    pub dosage_pediatric: String,
    pub warnings: String,
    #[serde(default)]
    pub contraindications: String,
    pub side_effects: String,
    /// Other medication names or free-text substances this one interacts with.
    #[serde(default)]
    pub interactions: Vec<String>,
    pub category: String,
}

impl MedicationRecord {
    /// Iterate the canonical name followed by every alias.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// A symptom entry keyed by its lowercase phrase (e.g. "stomach pain").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub name: String,
    /// Ordered from most to least common.
    pub possible_causes: Vec<String>,
    pub recommendations: String,
    pub red_flags: String,
}

/// A general wellness topic keyed by a single lowercase word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessTopic {
    pub topic: String,
    pub advice: String,
}

/// Free-text fields from an external drug-label lookup.
///
/// An empty string means the label did not carry that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugLabel {
    pub purpose: String,
    pub indications: String,
    pub warnings: String,
    pub contraindications: String,
    pub adverse_reactions: String,
}

/// Outcome of a pairwise interaction check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// True when any interaction rule fired.
    pub found: bool,
    /// User-facing text, always terminated by the disclaimer.
    pub message: String,
}
