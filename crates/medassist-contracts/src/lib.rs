//! # medassist-contracts
//!
//! Shared types, records, and error contracts for the medassist workspace.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod journal;
pub mod knowledge;
pub mod profile;
pub mod session;
pub mod triage;

#[cfg(test)]
mod tests {
    use super::*;
    use error::{AssistError, GenerationError, ServiceError};
    use journal::{EventKind, EventRecord};
    use profile::UserProfile;
    use session::{BackendKind, ChatRole, ChatTurn, SessionId};
    use triage::{TriageLevel, TriageRequest, TriageResult, TriageSource};

    // ── UserProfile ──────────────────────────────────────────────────────────

    #[test]
    fn profile_defaults_to_guest() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "Guest");
        assert_eq!(profile.age, 30);
        assert!(profile.conditions.is_empty());
    }

    #[test]
    fn profile_age_is_clamped() {
        let mut profile = UserProfile::default();
        profile.set_age(250);
        assert_eq!(profile.age, 120);
        profile.set_age(7);
        assert_eq!(profile.age, 7);
    }

    #[test]
    fn zero_age_reports_default_to_services() {
        let mut profile = UserProfile::default();
        profile.set_age(0);
        assert_eq!(profile.effective_age(), 30);
    }

    // ── TriageLevel ──────────────────────────────────────────────────────────

    #[test]
    fn service_labels_map_onto_levels() {
        assert_eq!(TriageLevel::from_service_label("emergency_ambulance"), TriageLevel::Emergency);
        assert_eq!(TriageLevel::from_service_label("emergency"), TriageLevel::Emergency);
        assert_eq!(TriageLevel::from_service_label("consultation_24"), TriageLevel::DoctorVisit);
        assert_eq!(TriageLevel::from_service_label("consultation"), TriageLevel::DoctorVisit);
        assert_eq!(TriageLevel::from_service_label("Self_Care"), TriageLevel::SelfCare);
        assert_eq!(TriageLevel::from_service_label(""), TriageLevel::Unknown);
        assert_eq!(TriageLevel::from_service_label("whatever"), TriageLevel::Unknown);
    }

    #[test]
    fn triage_level_serializes_snake_case() {
        let json = serde_json::to_string(&TriageLevel::DoctorVisit).unwrap();
        assert_eq!(json, "\"doctor_visit\"");
        assert_eq!(TriageLevel::SelfCare.to_string(), "self_care");
    }

    #[test]
    fn triage_result_constructors_set_source() {
        assert_eq!(TriageResult::heuristic(TriageLevel::Unknown).source, TriageSource::Heuristic);
        assert_eq!(TriageResult::external(TriageLevel::SelfCare).source, TriageSource::External);
    }

    #[test]
    fn triage_request_body_shape() {
        let body = serde_json::to_value(TriageRequest::for_age(42)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "age": { "value": 42 }, "sex": "female", "evidence": [] })
        );
    }

    // ── Session types ────────────────────────────────────────────────────────

    #[test]
    fn session_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| SessionId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn chat_turn_constructors() {
        assert_eq!(ChatTurn::user("hi").role, ChatRole::User);
        assert_eq!(ChatTurn::assistant("hello").role, ChatRole::Assistant);
    }

    #[test]
    fn backend_ids_parse_back() {
        for kind in [BackendKind::Local, BackendKind::OpenAi, BackendKind::Anthropic, BackendKind::Groq] {
            assert_eq!(BackendKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(BackendKind::from_id("OpenAI"), Some(BackendKind::OpenAi));
        assert_eq!(BackendKind::from_id("gemini"), None);
    }

    // ── Journal records ──────────────────────────────────────────────────────

    #[test]
    fn event_record_tags_kind() {
        let record = EventRecord::now(
            3,
            EventKind::ExternalFailure {
                service: "drug-labels".to_string(),
                reason: "timeout".to_string(),
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["turn"], 3);
        assert_eq!(json["event"]["kind"], "external_failure");
        assert_eq!(json["event"]["service"], "drug-labels");
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_config_error_display() {
        let err = AssistError::ConfigError { reason: "missing file".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing file"));
    }

    #[test]
    fn error_knowledge_error_display() {
        let err = AssistError::KnowledgeError { reason: "duplicate medication 'aspirin'".to_string() };
        assert!(err.to_string().contains("duplicate medication 'aspirin'"));
    }

    #[test]
    fn generation_exhausted_lists_attempts() {
        let err = GenerationError::Exhausted {
            attempts: vec!["groq: HTTP 500".to_string(), "local: timeout".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("groq: HTTP 500"));
        assert!(msg.contains("local: timeout"));
    }

    #[test]
    fn service_status_display() {
        assert_eq!(ServiceError::Status(503).to_string(), "service answered with HTTP 503");
    }
}
