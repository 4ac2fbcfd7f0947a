//! Entity matching over normalized user text.
//!
//! Matching is exact first, fuzzy second:
//!
//! - Medications: whole-word match on every name and alias; only when that
//!   finds nothing at all, each token longer than 3 characters is compared
//!   against every name and alias by normalized Levenshtein similarity.
//! - Symptoms: substring match on every phrase; only when that finds nothing,
//!   each token is fuzzy-compared against the phrases.
//!
//! The fallback is all-or-nothing. A message with one exact hit and one
//! misspelled, different medication reports only the exact hit.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;
use tracing::debug;

use medassist_contracts::knowledge::{SymptomRecord, WellnessTopic};

use crate::{
    base::KnowledgeBase,
    normalize::{normalize, tokens},
};

/// Minimum similarity for a fuzzy match.
pub const FUZZY_CUTOFF: f64 = 0.8;

/// Tokens this short never take part in fuzzy medication matching.
const MIN_FUZZY_MEDICATION_LEN: usize = 4;

/// Return the single best candidate scoring at least `FUZZY_CUTOFF`.
///
/// Ties keep the earliest candidate.
pub fn closest_match<'a, I>(word: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = normalized_levenshtein(word, candidate);
        if score < FUZZY_CUTOFF {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

impl KnowledgeBase {
    /// Find canonical names of every medication mentioned in `text`.
    pub fn find_medications(&self, text: &str) -> BTreeSet<String> {
        let text = normalize(text);
        let mut found = BTreeSet::new();

        for (idx, pattern) in &self.term_patterns {
            if pattern.is_match(&text) {
                found.insert(self.medications[*idx].name.clone());
            }
        }

        if !found.is_empty() {
            debug!(matches = ?found, "exact medication matches");
            return found;
        }

        // Term → canonical name; the first-declared owner keeps a shared term.
        let mut dictionary: Vec<(&str, &str)> = Vec::new();
        for med in &self.medications {
            for term in med.terms() {
                if !dictionary.iter().any(|(t, _)| *t == term) {
                    dictionary.push((term, med.name.as_str()));
                }
            }
        }

        for word in tokens(&text) {
            if word.chars().count() < MIN_FUZZY_MEDICATION_LEN {
                continue;
            }
            if let Some(term) = closest_match(word, dictionary.iter().map(|(t, _)| *t)) {
                if let Some((_, canonical)) = dictionary.iter().find(|(t, _)| *t == term) {
                    debug!(word = %word, term = %term, canonical = %canonical, "fuzzy medication match");
                    found.insert((*canonical).to_string());
                }
            }
        }

        found
    }

    /// Find symptoms mentioned in `text`, in table order for exact matches
    /// and token order for fuzzy ones. Empty when nothing matched.
    pub fn find_symptoms(&self, text: &str) -> Vec<&SymptomRecord> {
        let text = normalize(text);

        let exact: Vec<&SymptomRecord> = self
            .symptoms
            .iter()
            .filter(|s| text.contains(s.name.as_str()))
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let mut found: Vec<&SymptomRecord> = Vec::new();
        for word in tokens(&text) {
            let Some(name) = closest_match(word, self.symptoms.iter().map(|s| s.name.as_str())) else {
                continue;
            };
            if found.iter().any(|s| s.name == name) {
                continue;
            }
            if let Some(record) = self.symptoms.iter().find(|s| s.name == name) {
                debug!(word = %word, symptom = %name, "fuzzy symptom match");
                found.push(record);
            }
        }
        found
    }

    /// Wellness topics mentioned in `text`, in table order.
    pub fn find_wellness(&self, text: &str) -> Vec<&WellnessTopic> {
        let text = normalize(text);
        self.wellness
            .iter()
            .filter(|w| text.contains(w.topic.as_str()))
            .collect()
    }

    /// The first emergency keyword contained in `text`, if any.
    pub fn emergency_keyword(&self, text: &str) -> Option<&str> {
        let text = normalize(text);
        self.emergency_keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }

    /// True when `text` contains any emergency keyword.
    pub fn is_emergency(&self, text: &str) -> bool {
        self.emergency_keyword(text).is_some()
    }

    /// True when `text` contains any known symptom phrase verbatim.
    pub fn mentions_known_symptom(&self, text: &str) -> bool {
        let text = normalize(text);
        self.symptoms.iter().any(|s| text.contains(s.name.as_str()))
    }
}
