//! Triage classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse urgency classification of a user message.
///
/// Drives banner selection only; `Emergency` additionally short-circuits
/// generation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    Emergency,
    DoctorVisit,
    SelfCare,
    Unknown,
}

impl TriageLevel {
    /// The snake_case label used in prompts and journal entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Emergency => "emergency",
            TriageLevel::DoctorVisit => "doctor_visit",
            TriageLevel::SelfCare => "self_care",
            TriageLevel::Unknown => "unknown",
        }
    }

    /// Map a level label returned by an external triage service.
    ///
    /// Accepts both this crate's labels and the service's finer-grained
    /// consultation/ambulance labels. Anything unrecognized is `Unknown`.
    pub fn from_service_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "emergency" | "emergency_ambulance" => TriageLevel::Emergency,
            "doctor_visit" | "consultation" | "consultation_24" => TriageLevel::DoctorVisit,
            "self_care" => TriageLevel::SelfCare,
            _ => TriageLevel::Unknown,
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a triage decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageSource {
    Heuristic,
    External,
}

/// A transient triage decision. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    pub source: TriageSource,
}

impl TriageResult {
    pub fn heuristic(level: TriageLevel) -> Self {
        Self { level, source: TriageSource::Heuristic }
    }

    pub fn external(level: TriageLevel) -> Self {
        Self { level, source: TriageSource::External }
    }
}

/// The request body sent to an external triage service.
///
/// `sex` is a fixed placeholder and `evidence` is always empty; the service
/// is consulted with demographics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub age: TriageAge,
    pub sex: String,
    pub evidence: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAge {
    pub value: u32,
}

impl TriageRequest {
    pub fn for_age(age: u32) -> Self {
        Self {
            age: TriageAge { value: age },
            sex: "female".to_string(),
            evidence: Vec::new(),
        }
    }
}
