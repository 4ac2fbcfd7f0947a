//! The assistant: the per-message response pipeline.
//!
//! Every user message runs through:
//!
//!   Triage → Emergency gate → Context → Generate (with fallback) → Wrap → Journal
//!
//! The emergency gate is absolute: when triage or the keyword check signals
//! an emergency, the reply is the fixed critical warning and neither the
//! knowledge base nor any generation backend is consulted.

use std::sync::Arc;

use tracing::{debug, info, warn};

use medassist_contracts::{
    error::GenerationError,
    journal::{EventKind, EventRecord},
    knowledge::{DrugLabel, InteractionReport},
    profile::UserProfile,
    session::{BackendKind, ChatTurn, SessionId},
    triage::{TriageLevel, TriageRequest, TriageResult},
};
use medassist_knowledge::{
    medication_details, symptom_advice, wellness_advice, KnowledgeBase, DISCLAIMER,
};

use crate::{
    prompts::{
        risk_banner, user_prompt, CRITICAL_WARNING, MASTER_PROMPT, MODEL_UNAVAILABLE,
        MULTI_MEDICATION_HINT, UNABLE_TO_GENERATE,
    },
    router::BackendRouter,
    session::Session,
    traits::{EventSink, LabelLookup, TriageClassifier, TriageService},
};

/// Service names used in `external_failure` journal events.
pub const TRIAGE_SERVICE: &str = "triage";
pub const LABEL_SERVICE: &str = "drug_label";

/// The assistant owns the knowledge base and every collaborator.
///
/// It holds no per-user state; callers pass a `Session` into each call.
pub struct Assistant {
    knowledge: Arc<KnowledgeBase>,
    classifier: Box<dyn TriageClassifier>,
    triage_service: Option<Box<dyn TriageService>>,
    labels: Option<Box<dyn LabelLookup>>,
    router: BackendRouter,
    events: Box<dyn EventSink>,
}

impl Assistant {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        classifier: Box<dyn TriageClassifier>,
        router: BackendRouter,
        events: Box<dyn EventSink>,
    ) -> Self {
        Self {
            knowledge,
            classifier,
            triage_service: None,
            labels: None,
            router,
            events,
        }
    }

    /// Consult `service` before the heuristic classifier.
    pub fn with_triage_service(mut self, service: Box<dyn TriageService>) -> Self {
        self.triage_service = Some(service);
        self
    }

    /// Enrich medication details with labels from `labels`.
    pub fn with_label_lookup(mut self, labels: Box<dyn LabelLookup>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn router(&self) -> &BackendRouter {
        &self.router
    }

    /// Classify the urgency of `text` for the session's profile.
    ///
    /// Never fails: an unavailable external service falls back to the
    /// heuristic classifier.
    pub fn triage(&self, session: &Session, text: &str) -> TriageResult {
        self.classify(session.id(), session.turn_count(), text, &session.profile)
    }

    /// The detail block for one medication (canonical name or alias), with
    /// label enrichment and alerts for the session's profile.
    pub fn medication_details(&self, session: &Session, name: &str) -> Option<String> {
        self.details_for(session.id(), session.turn_count(), name, &session.profile)
    }

    /// Check two medications for known interactions.
    pub fn check_interaction(&self, med_a: &str, med_b: &str) -> InteractionReport {
        self.knowledge.check_interaction(med_a, med_b)
    }

    /// Answer one user message and append both turns to the transcript.
    pub fn respond(&self, session: &mut Session, text: &str) -> String {
        let turn = session.begin_turn();
        let session_id = session.id().clone();

        debug!(session_id = %session_id, turn, chars = text.len(), "message received");
        self.journal(&session_id, turn, EventKind::MessageReceived);
        session.push(ChatTurn::user(text));

        // ── Step 1: Triage ───────────────────────────────────────────────────
        let triage = self.classify(&session_id, turn, text, &session.profile);
        self.journal(
            &session_id,
            turn,
            EventKind::TriageDecided { level: triage.level, source: triage.source },
        );

        // ── Step 2: Emergency gate ───────────────────────────────────────────
        //
        // Nothing below this block runs for an emergency.
        let trigger = if triage.level == TriageLevel::Emergency {
            Some("triage")
        } else if self.knowledge.is_emergency(text) {
            Some("keyword")
        } else {
            None
        };

        if let Some(trigger) = trigger {
            warn!(session_id = %session_id, turn, trigger, "emergency detected, generation skipped");
            self.journal(
                &session_id,
                turn,
                EventKind::EmergencyShortCircuit { trigger: trigger.to_string() },
            );
            return self.deliver(session, turn, CRITICAL_WARNING.to_string(), None, false);
        }

        // ── Step 3: Context ──────────────────────────────────────────────────
        let mut fragments: Vec<String> = Vec::new();

        if let Some(advice) = symptom_advice(&self.knowledge.find_symptoms(text)) {
            fragments.push(advice);
        }
        if let Some(advice) = wellness_advice(&self.knowledge.find_wellness(text)) {
            fragments.push(advice);
        }

        let medications = self.knowledge.find_medications(text);
        if !medications.is_empty() {
            self.journal(
                &session_id,
                turn,
                EventKind::MedicationsMatched { names: medications.iter().cloned().collect() },
            );
        }
        for name in &medications {
            if let Some(details) = self.details_for(&session_id, turn, name, &session.profile) {
                fragments.push(details);
            }
        }

        if matches!(triage.level, TriageLevel::SelfCare | TriageLevel::DoctorVisit) {
            fragments.push(format!("Triage Level: {}", triage.level));
        }

        let context = fragments
            .into_iter()
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        // ── Step 4: Generate ─────────────────────────────────────────────────
        let prompt = user_prompt(text, &context);
        let outcome = self.router.generate(session.backend(), MASTER_PROMPT, &prompt);

        for (from, error) in &outcome.failures {
            self.journal(
                &session_id,
                turn,
                EventKind::GenerationFallback { from: *from, reason: error.to_string() },
            );
        }

        let (mut body, backend) = match outcome.result {
            Ok((kind, generated)) => (generated, Some(kind)),
            Err(GenerationError::NoBackend) => {
                warn!(session_id = %session_id, turn, "no generation backend available");
                (MODEL_UNAVAILABLE.to_string(), None)
            }
            Err(e) => {
                warn!(session_id = %session_id, turn, error = %e, "generation exhausted");
                (UNABLE_TO_GENERATE.to_string(), None)
            }
        };
        let degraded = backend.is_none() || !outcome.failures.is_empty();

        // ── Step 5: Wrap ─────────────────────────────────────────────────────
        if medications.len() > 1 {
            body.push_str(MULTI_MEDICATION_HINT);
        }
        let reply = format!("{}{}\n\n---\n{}", risk_banner(triage.level), body, DISCLAIMER);

        self.deliver(session, turn, reply, backend, degraded)
    }

    /// Journal the end of `session`.
    pub fn end_session(&self, session: &Session) {
        if let Err(e) = self.events.finalize(session.id()) {
            warn!(session_id = %session.id(), error = %e, "failed to finalize journal");
        }
        info!(session_id = %session.id(), turns = session.turn_count(), "session ended");
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn classify(
        &self,
        session_id: &SessionId,
        turn: u64,
        text: &str,
        profile: &UserProfile,
    ) -> TriageResult {
        if let Some(service) = &self.triage_service {
            let request = TriageRequest::for_age(profile.effective_age());
            match service.assess(&request) {
                Ok(level) => {
                    debug!(session_id = %session_id, turn, level = %level, "external triage");
                    return TriageResult::external(level);
                }
                Err(e) => {
                    warn!(session_id = %session_id, turn, error = %e, "triage service failed, using heuristic");
                    self.journal(
                        session_id,
                        turn,
                        EventKind::ExternalFailure {
                            service: TRIAGE_SERVICE.to_string(),
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        let result = self.classifier.classify(text, profile);
        debug!(session_id = %session_id, turn, level = %result.level, "heuristic triage");
        result
    }

    fn details_for(
        &self,
        session_id: &SessionId,
        turn: u64,
        name: &str,
        profile: &UserProfile,
    ) -> Option<String> {
        let record = self.knowledge.resolve(name)?;
        let label = self.label_for(session_id, turn, &record.name);
        Some(medication_details(record, label.as_ref(), Some(profile)))
    }

    fn label_for(&self, session_id: &SessionId, turn: u64, name: &str) -> Option<DrugLabel> {
        let labels = self.labels.as_ref()?;
        match labels.lookup(name) {
            Ok(label) => label,
            Err(e) => {
                debug!(session_id = %session_id, turn, medication = %name, error = %e, "label lookup failed");
                self.journal(
                    session_id,
                    turn,
                    EventKind::ExternalFailure {
                        service: LABEL_SERVICE.to_string(),
                        reason: e.to_string(),
                    },
                );
                None
            }
        }
    }

    fn deliver(
        &self,
        session: &mut Session,
        turn: u64,
        reply: String,
        backend: Option<BackendKind>,
        degraded: bool,
    ) -> String {
        session.push(ChatTurn::assistant(reply.clone()));
        self.journal(session.id(), turn, EventKind::ReplyDelivered { backend, degraded });
        reply
    }

    /// Journal writes never fail the reply.
    fn journal(&self, session_id: &SessionId, turn: u64, event: EventKind) {
        let record = EventRecord::now(turn, event);
        if let Err(e) = self.events.record(session_id, &record) {
            warn!(session_id = %session_id, turn, error = %e, "journal write failed");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
