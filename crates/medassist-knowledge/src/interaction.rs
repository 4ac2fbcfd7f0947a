//! Pairwise medication interaction checks.
//!
//! Three independent rules, concatenated in order:
//!
//! 1. `b` is listed in `a`'s interaction set.
//! 2. `a` is listed in `b`'s interaction set (skipped when the sentence is
//!    already present).
//! 3. Both share a category.
//!
//! An unknown medication on either side short-circuits to a "no data" message.
//! Two spellings of the same medication are refused before any rule runs.
//! Every other message ends with the disclaimer.

use tracing::debug;

use medassist_contracts::knowledge::InteractionReport;

use crate::{
    advice::DISCLAIMER,
    base::KnowledgeBase,
    normalize::{capitalize, normalize},
};

/// Returned when both inputs resolve to the same medication.
pub const SAME_MEDICATION: &str = "Please select two different medications.";

impl KnowledgeBase {
    /// Check two medications (canonical names or aliases) for known interactions.
    pub fn check_interaction(&self, med_a: &str, med_b: &str) -> InteractionReport {
        let raw_a = normalize(med_a);
        let raw_b = normalize(med_b);

        let (Some(a), Some(b)) = (self.resolve(&raw_a), self.resolve(&raw_b)) else {
            debug!(med_a = %raw_a, med_b = %raw_b, "interaction check on unknown medication");
            return InteractionReport {
                found: false,
                message: format!(
                    "I don't have full interaction details for '{}' and '{}'. \
                     Please consult a pharmacist or doctor.\n\n{}",
                    raw_a, raw_b, DISCLAIMER
                ),
            };
        };

        if a.name == b.name {
            debug!(med = %a.name, "interaction check against itself");
            return InteractionReport { found: false, message: SAME_MEDICATION.to_string() };
        }

        let mut details: Vec<String> = Vec::new();

        if a.interactions.contains(&b.name) || a.interactions.contains(&raw_b) {
            details.push(format!("{} is known to interact with {}.", capitalize(&a.name), b.name));
        }

        if b.interactions.contains(&a.name) || b.interactions.contains(&raw_a) {
            let msg = format!("{} is known to interact with {}.", capitalize(&b.name), a.name);
            if !details.contains(&msg) {
                details.push(msg);
            }
        }

        if a.category == b.category {
            details.push(format!(
                "Both medications are in the '{}' category. Taking them together may increase side effects.",
                a.category
            ));
        }

        debug!(med_a = %a.name, med_b = %b.name, rules_fired = details.len(), "interaction check");

        if details.is_empty() {
            InteractionReport {
                found: false,
                message: format!(
                    "No specific known interaction found between **{}** and **{}** in my database.\n\
                     However, always confirm with a professional.\n\n{}",
                    capitalize(&a.name),
                    capitalize(&b.name),
                    DISCLAIMER
                ),
            }
        } else {
            InteractionReport {
                found: true,
                message: format!(
                    "**⚠️ Potential Interaction Detected:**\n\n{}\n\n\
                     **Recommendation:** Consult your healthcare provider before combining these.\n\n{}",
                    details.join("\n"),
                    DISCLAIMER
                ),
            }
        }
    }
}
