//! Keyword triage classifier.
//!
//! `KeywordTriage` loads a `TriagePolicy` from a TOML string or file and
//! implements the `TriageClassifier` trait from medassist-core.
//!
//! Evaluation algorithm:
//!
//! 1. Normalize the message.
//! 2. Iterate rules in declaration order; the first rule that matches
//!    decides the level.
//! 3. If no rule matched → `Unknown`.

use std::{path::Path, sync::Arc};

use tracing::debug;

use medassist_contracts::{
    error::{AssistError, AssistResult},
    profile::UserProfile,
    triage::{TriageLevel, TriageResult},
};
use medassist_core::traits::TriageClassifier;
use medassist_knowledge::{normalize, KnowledgeBase};

use crate::rule::{Matcher, TriagePolicy};

/// The policy compiled into the binary.
pub const BUILTIN_POLICY: &str = include_str!("../policies/triage.toml");

/// A `TriageClassifier` that reads its tiers from a TOML document.
///
/// ```rust,ignore
/// use medassist_triage::KeywordTriage;
///
/// let triage = KeywordTriage::from_file(Path::new("policies/triage.toml"), knowledge)?;
/// ```
#[derive(Debug)]
pub struct KeywordTriage {
    policy: TriagePolicy,
    knowledge: Arc<KnowledgeBase>,
}

impl KeywordTriage {
    /// The embedded default policy.
    pub fn builtin(knowledge: Arc<KnowledgeBase>) -> AssistResult<Self> {
        Self::from_toml_str(BUILTIN_POLICY, knowledge)
    }

    /// Parse `s` as TOML and build a `KeywordTriage`.
    ///
    /// Returns `AssistError::PolicyError` if the TOML is malformed or a
    /// `keywords` rule lists no keywords.
    pub fn from_toml_str(s: &str, knowledge: Arc<KnowledgeBase>) -> AssistResult<Self> {
        let mut policy: TriagePolicy = toml::from_str(s).map_err(|e| AssistError::PolicyError {
            reason: format!("failed to parse triage policy TOML: {}", e),
        })?;

        for rule in &mut policy.rules {
            if rule.matcher == Matcher::Keywords && rule.keywords.is_empty() {
                return Err(AssistError::PolicyError {
                    reason: format!("rule '{}' uses the keywords matcher but lists none", rule.id),
                });
            }
            for keyword in &mut rule.keywords {
                *keyword = normalize(keyword);
            }
        }

        debug!(rules = policy.rules.len(), "triage policy loaded");
        Ok(Self { policy, knowledge })
    }

    /// Read the file at `path` and parse it as a triage policy.
    pub fn from_file(path: &Path, knowledge: Arc<KnowledgeBase>) -> AssistResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AssistError::PolicyError {
            reason: format!("failed to read triage policy '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents, knowledge)
    }

    pub fn policy(&self) -> &TriagePolicy {
        &self.policy
    }
}

impl TriageClassifier for KeywordTriage {
    /// The profile does not influence the heuristic tiers.
    fn classify(&self, text: &str, _profile: &UserProfile) -> TriageResult {
        let text = normalize(text);

        for rule in &self.policy.rules {
            if rule.matches(&text, &self.knowledge) {
                debug!(rule_id = %rule.id, level = %rule.level, "triage rule matched");
                return TriageResult::heuristic(rule.level);
            }
        }

        debug!("no triage rule matched");
        TriageResult::heuristic(TriageLevel::Unknown)
    }
}
