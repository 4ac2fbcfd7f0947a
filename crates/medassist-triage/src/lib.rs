//! # medassist-triage
//!
//! A TOML-driven keyword triage classifier.
//!
//! ## Overview
//!
//! [`KeywordTriage`] implements the
//! [`TriageClassifier`](medassist_core::traits::TriageClassifier) trait.
//! Tiers are declared in a TOML policy, evaluated in order, and the first
//! matching tier decides the level. No match yields `unknown`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use medassist_triage::KeywordTriage;
//!
//! let triage = KeywordTriage::builtin(knowledge.clone())?;
//! // Pass `triage` to `medassist_core::Assistant::new(...)`.
//! ```

pub mod engine;
pub mod rule;

pub use engine::{KeywordTriage, BUILTIN_POLICY};
pub use rule::{Matcher, TriagePolicy, TriageRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use medassist_contracts::{
        error::AssistError,
        profile::UserProfile,
        triage::{TriageLevel, TriageSource},
    };
    use medassist_core::traits::TriageClassifier;
    use medassist_knowledge::KnowledgeBase;

    use crate::KeywordTriage;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn knowledge() -> Arc<KnowledgeBase> {
        Arc::new(KnowledgeBase::builtin().unwrap())
    }

    fn level(triage: &KeywordTriage, text: &str) -> TriageLevel {
        triage.classify(text, &UserProfile::default()).level
    }

    // ── 1. built-in tiers ─────────────────────────────────────────────────────

    #[test]
    fn test_builtin_policy_loads() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        let ids: Vec<&str> = triage.policy().rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["emergency-keyword", "serious-sign", "known-symptom"]);
    }

    #[test]
    fn test_emergency_keyword_is_emergency() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        assert_eq!(level(&triage, "I think I'm having a HEART ATTACK"), TriageLevel::Emergency);
    }

    /// "chest pain" is both an emergency keyword and a serious sign; the
    /// emergency tier is declared first.
    #[test]
    fn test_emergency_tier_precedes_serious_signs() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        assert_eq!(level(&triage, "sharp chest pain"), TriageLevel::Emergency);
    }

    /// A known symptom alongside an emergency keyword never lowers the level.
    #[test]
    fn test_emergency_tier_precedes_known_symptoms() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        assert_eq!(level(&triage, "chest pain and a headache"), TriageLevel::Emergency);
        assert_eq!(level(&triage, "fever after an overdose"), TriageLevel::Emergency);
        assert_eq!(level(&triage, "cough, sore throat, now fainting"), TriageLevel::Emergency);
    }

    #[test]
    fn test_serious_sign_is_doctor_visit() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        assert_eq!(level(&triage, "a severe headache"), TriageLevel::DoctorVisit);
        assert_eq!(level(&triage, "there is blood in my cough"), TriageLevel::DoctorVisit);
        assert_eq!(level(&triage, "High fever since yesterday"), TriageLevel::DoctorVisit);
    }

    #[test]
    fn test_known_symptom_is_self_care() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        let result = triage.classify("mild headache today", &UserProfile::default());
        assert_eq!(result.level, TriageLevel::SelfCare);
        assert_eq!(result.source, TriageSource::Heuristic);
    }

    #[test]
    fn test_no_match_is_unknown() {
        let triage = KeywordTriage::builtin(knowledge()).unwrap();
        assert_eq!(level(&triage, "what is a healthy breakfast?"), TriageLevel::Unknown);
        assert_eq!(level(&triage, ""), TriageLevel::Unknown);
    }

    // ── 2. custom policies ────────────────────────────────────────────────────

    #[test]
    fn test_custom_policy_first_match_wins() {
        let toml = r#"
            [[rules]]
            id = "rash"
            matcher = "keywords"
            keywords = ["Rash"]
            level = "self_care"

            [[rules]]
            id = "spreading"
            matcher = "keywords"
            keywords = ["spreading"]
            level = "doctor_visit"
        "#;

        let triage = KeywordTriage::from_toml_str(toml, knowledge()).unwrap();
        // Keywords are normalized at load time.
        assert_eq!(level(&triage, "a spreading rash"), TriageLevel::SelfCare);
        assert_eq!(level(&triage, "it keeps spreading"), TriageLevel::DoctorVisit);
        // No emergency tier in this policy.
        assert_eq!(level(&triage, "chest pain"), TriageLevel::Unknown);
    }

    #[test]
    fn test_empty_policy_is_always_unknown() {
        let triage = KeywordTriage::from_toml_str("rules = []", knowledge()).unwrap();
        assert_eq!(level(&triage, "overdose"), TriageLevel::Unknown);
    }

    #[test]
    fn test_keywords_rule_without_keywords_is_rejected() {
        let toml = r#"
            [[rules]]
            id = "empty"
            matcher = "keywords"
            level = "doctor_visit"
        "#;

        match KeywordTriage::from_toml_str(toml, knowledge()) {
            Err(AssistError::PolicyError { reason }) => {
                assert!(reason.contains("'empty'"), "unexpected reason: {reason}");
            }
            other => panic!("expected PolicyError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_unknown_matcher_is_rejected() {
        let toml = r#"
            [[rules]]
            id = "bad"
            matcher = "regex"
            level = "self_care"
        "#;

        assert!(matches!(
            KeywordTriage::from_toml_str(toml, knowledge()),
            Err(AssistError::PolicyError { .. })
        ));
    }

    #[test]
    fn test_missing_policy_file_is_error() {
        let result = KeywordTriage::from_file(
            std::path::Path::new("/nonexistent/triage.toml"),
            knowledge(),
        );
        assert!(matches!(result, Err(AssistError::PolicyError { .. })));
    }
}
