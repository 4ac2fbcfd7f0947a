//! Rendering of knowledge-base records into context fragments.
//!
//! Fragments are plain text handed to the generation backend as grounding,
//! and shown verbatim by the medication browser.

use medassist_contracts::{
    knowledge::{DrugLabel, MedicationRecord, SymptomRecord, WellnessTopic},
    profile::UserProfile,
};

use crate::normalize::{capitalize, normalize};

/// Appended to every reply and every interaction report.
pub const DISCLAIMER: &str = "⚠️ **DISCLAIMER:** This AI assistant provides general health and medication information only. \
It is **NOT** a substitute for professional medical advice, diagnosis, or treatment. \
Dosages mentioned are standard guidelines and may not apply to you. \
Always consult a qualified healthcare professional before making decisions about medications.";

/// Maximum characters of each drug-label field surfaced to the user.
pub const LABEL_FIELD_LIMIT: usize = 400;

/// Ages strictly below this (and above zero) trigger the pediatric alert.
const CHILD_AGE_LIMIT: u32 = 12;

/// (condition keyword, warning keyword, alert).
const CONDITION_ALERTS: &[(&str, &str, &str)] = &[
    ("liver", "liver", "Health Alert: Use caution given your history of liver issues."),
    ("kidney", "kidney", "Health Alert: Use caution given your history of kidney issues."),
    ("ulcer", "stomach", "Health Alert: This medication can affect the stomach."),
];

/// Render advice for each matched symptom. `None` when `symptoms` is empty.
pub fn symptom_advice(symptoms: &[&SymptomRecord]) -> Option<String> {
    if symptoms.is_empty() {
        return None;
    }
    let mut out = String::new();
    for symptom in symptoms {
        out.push_str(&format!("Symptom: {}\n", capitalize(&symptom.name)));
        out.push_str(&format!("Possible Causes: {}\n", symptom.possible_causes.join(", ")));
        out.push_str(&format!("Home Care: {}\n", symptom.recommendations));
        out.push_str(&format!("Red Flags: {}\n\n", symptom.red_flags));
    }
    Some(out)
}

/// Render advice for each matched wellness topic. `None` when empty.
pub fn wellness_advice(topics: &[&WellnessTopic]) -> Option<String> {
    if topics.is_empty() {
        return None;
    }
    Some(
        topics
            .iter()
            .map(|t| format!("Wellness Topic - {}: {}\n", capitalize(&t.topic), t.advice))
            .collect(),
    )
}

/// Personalized alerts for `record` given the user's profile.
///
/// A child alert fires for ages in `1..12`; condition alerts fire when the
/// profile's conditions and the record's warnings both mention the paired
/// keyword.
pub fn profile_alerts(record: &MedicationRecord, profile: &UserProfile) -> Vec<String> {
    let mut alerts = Vec::new();

    if profile.age > 0 && profile.age < CHILD_AGE_LIMIT {
        alerts.push(format!(
            "This medication may not be suitable for children (Age: {}).",
            profile.age
        ));
    }

    let conditions = normalize(&profile.conditions);
    let warnings = record.warnings.to_lowercase();
    for (condition, warning, alert) in CONDITION_ALERTS {
        if conditions.contains(*condition) && warnings.contains(*warning) {
            alerts.push((*alert).to_string());
        }
    }

    alerts
}

fn truncated(field: &str) -> String {
    let head: String = field.chars().take(LABEL_FIELD_LIMIT).collect();
    format!("{head}...")
}

/// Render the detail block for one medication.
///
/// Dosage fields are deliberately left out. `label` adds the external
/// drug-label fields; `profile` adds personalized alerts.
pub fn medication_details(
    record: &MedicationRecord,
    label: Option<&DrugLabel>,
    profile: Option<&UserProfile>,
) -> String {
    let mut info = format!(
        "Medication: {}\nCategory: {}\nUses: {}\nWarnings: {}\nContraindications: {}\nPossible Side Effects: {}\n",
        capitalize(&record.name),
        if record.category.is_empty() { "Unknown" } else { record.category.as_str() },
        record.uses,
        record.warnings,
        if record.contraindications.is_empty() { "None listed" } else { record.contraindications.as_str() },
        record.side_effects,
    );

    if let Some(label) = label {
        if !label.purpose.is_empty() {
            info.push_str(&format!("\nFDA Purpose: {}\n", label.purpose));
        }
        let fields = [
            ("FDA Indications", &label.indications),
            ("FDA Warnings", &label.warnings),
            ("FDA Contraindications", &label.contraindications),
            ("FDA Adverse Reactions", &label.adverse_reactions),
        ];
        for (heading, value) in fields {
            if !value.is_empty() {
                info.push_str(&format!("{}: {}\n", heading, truncated(value)));
            }
        }
    }

    info.push_str("\nA healthcare professional can decide whether this medicine is appropriate for you.\n");

    if let Some(profile) = profile {
        let alerts = profile_alerts(record, profile);
        if !alerts.is_empty() {
            info.push_str("\nPersonalized Alerts based on your profile:\n");
            for alert in alerts {
                info.push_str(&format!("- {alert}\n"));
            }
        }
    }

    info
}
