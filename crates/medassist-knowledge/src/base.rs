//! Knowledge-base loading and lookup.
//!
//! `KnowledgeBase` is built once from a TOML document (the embedded
//! `data/knowledge.toml` or a file with the same schema) and is read-only
//! afterwards. Every name, alias, keyword, and topic is normalized at load so
//! the matchers can compare against normalized user text directly.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use medassist_contracts::{
    error::{AssistError, AssistResult},
    knowledge::{MedicationRecord, SymptomRecord, WellnessTopic},
};

use crate::normalize::normalize;

/// The built-in knowledge document.
const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge.toml");

/// On-disk shape of a knowledge document.
#[derive(Debug, Deserialize)]
struct KnowledgeDocument {
    emergency_keywords: Vec<String>,
    medications: Vec<MedicationRecord>,
    #[serde(default)]
    symptoms: Vec<SymptomRecord>,
    #[serde(default)]
    wellness: Vec<WellnessTopic>,
}

/// A term shared by more than one medication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub term: String,
    /// Canonical names owning the term, in declaration order.
    pub owners: Vec<String>,
}

/// Read-only medication, symptom, wellness, and emergency tables.
#[derive(Debug)]
pub struct KnowledgeBase {
    pub(crate) medications: Vec<MedicationRecord>,
    pub(crate) symptoms: Vec<SymptomRecord>,
    pub(crate) wellness: Vec<WellnessTopic>,
    pub(crate) emergency_keywords: Vec<String>,
    /// Whole-word pattern per name and alias, paired with the owning
    /// medication's index.
    pub(crate) term_patterns: Vec<(usize, Regex)>,
}

impl KnowledgeBase {
    /// Load the embedded knowledge document.
    pub fn builtin() -> AssistResult<Self> {
        Self::from_toml_str(BUILTIN_KNOWLEDGE)
    }

    /// Parse `s` as a knowledge document.
    ///
    /// Returns `AssistError::KnowledgeError` if the TOML is malformed, a
    /// medication has an empty name, or two medications share a canonical
    /// name. Alias collisions are logged but accepted.
    pub fn from_toml_str(s: &str) -> AssistResult<Self> {
        let doc: KnowledgeDocument = toml::from_str(s).map_err(|e| AssistError::KnowledgeError {
            reason: format!("failed to parse knowledge TOML: {}", e),
        })?;
        Self::from_document(doc)
    }

    /// Read the file at `path` and parse it as a knowledge document.
    pub fn from_file(path: &Path) -> AssistResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AssistError::KnowledgeError {
            reason: format!("failed to read knowledge file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn from_document(doc: KnowledgeDocument) -> AssistResult<Self> {
        let mut medications = doc.medications;
        let mut seen = HashSet::new();

        for med in &mut medications {
            med.name = normalize(&med.name);
            if med.name.is_empty() {
                return Err(AssistError::KnowledgeError {
                    reason: "medication with an empty name".to_string(),
                });
            }
            if !seen.insert(med.name.clone()) {
                return Err(AssistError::KnowledgeError {
                    reason: format!("duplicate medication '{}'", med.name),
                });
            }
            med.aliases = med.aliases.iter().map(|a| normalize(a)).filter(|a| !a.is_empty()).collect();
            med.interactions = med.interactions.iter().map(|i| normalize(i)).collect();
        }

        let mut term_patterns = Vec::new();
        for (idx, med) in medications.iter().enumerate() {
            for term in med.terms() {
                let pattern = format!(r"\b{}\b", regex::escape(term));
                let re = Regex::new(&pattern).map_err(|e| AssistError::KnowledgeError {
                    reason: format!("invalid match pattern for '{}': {}", term, e),
                })?;
                term_patterns.push((idx, re));
            }
        }

        let mut symptoms = doc.symptoms;
        for symptom in &mut symptoms {
            symptom.name = normalize(&symptom.name);
        }
        let mut wellness = doc.wellness;
        for topic in &mut wellness {
            topic.topic = normalize(&topic.topic);
        }
        let emergency_keywords = doc
            .emergency_keywords
            .iter()
            .map(|k| normalize(k))
            .filter(|k| !k.is_empty())
            .collect();

        let kb = Self {
            medications,
            symptoms,
            wellness,
            emergency_keywords,
            term_patterns,
        };

        for collision in kb.alias_collisions() {
            warn!(
                term = %collision.term,
                owners = ?collision.owners,
                "medication term shared by several records; exact matches report all owners"
            );
        }

        debug!(
            medications = kb.medications.len(),
            symptoms = kb.symptoms.len(),
            wellness = kb.wellness.len(),
            emergency_keywords = kb.emergency_keywords.len(),
            "knowledge base loaded"
        );

        Ok(kb)
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    pub fn medications(&self) -> &[MedicationRecord] {
        &self.medications
    }

    pub fn symptoms(&self) -> &[SymptomRecord] {
        &self.symptoms
    }

    pub fn wellness_topics(&self) -> &[WellnessTopic] {
        &self.wellness
    }

    pub fn emergency_keywords(&self) -> &[String] {
        &self.emergency_keywords
    }

    /// Canonical names in sorted order, for pickers and listings.
    pub fn medication_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.medications.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Look up a medication by canonical name.
    pub fn medication(&self, name: &str) -> Option<&MedicationRecord> {
        let name = normalize(name);
        self.medications.iter().find(|m| m.name == name)
    }

    /// Resolve a canonical name or alias to its record.
    ///
    /// Canonical names take precedence; among aliases the first-declared
    /// owner wins.
    pub fn resolve(&self, term: &str) -> Option<&MedicationRecord> {
        let term = normalize(term);
        self.medications
            .iter()
            .find(|m| m.name == term)
            .or_else(|| self.medications.iter().find(|m| m.aliases.contains(&term)))
    }

    /// Terms (names or aliases) owned by more than one medication.
    pub fn alias_collisions(&self) -> Vec<AliasCollision> {
        let mut owners: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for med in &self.medications {
            for term in med.terms() {
                let entry = owners.entry(term).or_default();
                if !entry.contains(&med.name) {
                    entry.push(med.name.clone());
                }
            }
        }
        owners
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(term, owners)| AliasCollision { term: term.to_string(), owners })
            .collect()
    }
}
