//! Triage rule types and policy schema.
//!
//! A `TriagePolicy` is deserialized from TOML and holds an ordered list of
//! `TriageRule`s. Rules are evaluated in declaration order; the first
//! matching rule decides the level.

use serde::{Deserialize, Serialize};

use medassist_contracts::triage::TriageLevel;
use medassist_knowledge::KnowledgeBase;

/// What a rule looks for in the message.
///
/// Example in TOML:
/// ```toml
/// matcher = "keywords"
/// matcher = "emergency-keywords"
/// matcher = "known-symptoms"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Matcher {
    /// Any phrase listed in the rule's own `keywords`.
    Keywords,
    /// Any emergency keyword from the knowledge base.
    EmergencyKeywords,
    /// Any symptom name from the knowledge base.
    KnownSymptoms,
}

/// A single triage rule loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageRule {
    /// Stable identifier used in logs.
    pub id: String,

    #[serde(default)]
    pub description: String,

    pub matcher: Matcher,

    /// Lowercase phrases, matched as substrings. Required for
    /// `matcher = "keywords"`, ignored otherwise.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// The level this rule produces when it matches.
    pub level: TriageLevel,
}

impl TriageRule {
    /// Return true if `text` (already normalized) triggers this rule.
    pub fn matches(&self, text: &str, knowledge: &KnowledgeBase) -> bool {
        match self.matcher {
            Matcher::Keywords => self.keywords.iter().any(|k| text.contains(k.as_str())),
            Matcher::EmergencyKeywords => knowledge.is_emergency(text),
            Matcher::KnownSymptoms => knowledge.mentions_known_symptom(text),
        }
    }
}

/// The top-level structure deserialized from a TOML triage policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagePolicy {
    /// Ordered list of rules. First match wins.
    pub rules: Vec<TriageRule>,
}
