//! Fixed texts: the system prompt, prompt templates, and reply wrappers.

use medassist_contracts::triage::TriageLevel;

/// System instruction sent with every generation request.
pub const MASTER_PROMPT: &str = "You are an AI Health Navigator and Clinical Guidance Assistant.\n\
Provide accurate, evidence-based medical information. Explain symptoms, conditions, and treatments in simple language. \
Help users understand severity and next steps. Support informed decision-making.\n\
Strict rules:\n\
1) Do NOT diagnose diseases.\n\
2) Do NOT prescribe medications or dosages.\n\
3) Do NOT claim to replace a doctor.\n\
4) Always recommend professional medical consultation when risk exists.\n\
5) Use conditional, safety-aware language.\n\
Allowed: symptom explanation; possible causes (non-diagnostic); risk awareness; lifestyle and preventive advice; \
medicine purpose, side effects, and warnings (no dosage); informational interpretation of medical reports.\n\
Emergency handling: If symptoms suggest emergency, immediately advise seeking emergency medical care and do not continue normal conversation.\n\
Tone: calm, professional, reassuring, clear.\n\
Output: clear headings, bullet points where helpful, short readable explanations, end with a medical safety note.\n";

/// Returned instead of any generated text when an emergency is signalled.
pub const CRITICAL_WARNING: &str = "🚨 **CRITICAL WARNING** 🚨\n\n\
Your query contains keywords indicating a potential medical emergency. \
**Please call emergency services (911 or local equivalent) immediately.**\n\
Do not rely on this assistant for life-threatening situations.";

/// Appended when the message mentions more than one known medication.
pub const MULTI_MEDICATION_HINT: &str = "\n\n💡 **Note:** You mentioned multiple medications. \
Use the interaction checker (`medassist interaction <a> <b>`) for safety.";

/// Reply body when every attempted backend failed.
pub const UNABLE_TO_GENERATE: &str = "I am unable to generate a response at this moment.";

/// Reply body when no backend is registered.
pub const MODEL_UNAVAILABLE: &str = "AI model is currently unavailable.";

/// Build the user prompt, grounding the question in `context` when present.
pub fn user_prompt(question: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "Answer the following health question safely, briefly and clearly. \
             Do not diagnose or prescribe. \
             Question: {question} \
             Answer:"
        )
    } else {
        format!(
            "Use the following medical context to provide safe guidance and explanations without diagnosing or prescribing. \
             If the context is insufficient, provide general safety-aware advice. \
             Context: {context} \
             Patient Question: {question} \
             Answer:"
        )
    }
}

/// The banner prepended to a reply. Empty for `Emergency`, which never
/// reaches the wrapper.
pub fn risk_banner(level: TriageLevel) -> &'static str {
    match level {
        TriageLevel::DoctorVisit => "⚠️ Risk Level: Doctor visit recommended.\n\n",
        TriageLevel::SelfCare => "ℹ️ Risk Level: Self-care appropriate with monitoring.\n\n",
        TriageLevel::Unknown => {
            "ℹ️ Risk Level: Unable to determine; consider professional advice if concerned.\n\n"
        }
        TriageLevel::Emergency => "",
    }
}
