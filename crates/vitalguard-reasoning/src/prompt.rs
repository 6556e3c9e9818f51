//! Guardrail prompt construction.
//!
//! The system instruction states the deterministic [`SafetyLabel`] as fact
//! and selects the tone of the reply from the measured HRV, so the generator
//! is never asked for a narrative that contradicts the classification.
//!
//! The directive pivots on `hrv < 50` while the label treats 50 as
//! moderate strain; at exactly 50 ms the label is `MODERATE STRAIN` and the
//! directive is the wellness summary. Both are kept as-is.

use vitalguard_core::models::labels::SafetyLabel;
use vitalguard_core::models::prompt::{ClinicalPrompt, Directive};
use vitalguard_core::models::vitals::VitalSigns;

/// HRV (ms) below which the generator is asked for a severe warning.
pub const SEVERE_DIRECTIVE_HRV_BELOW: f64 = 50.0;

const SEVERE_TASK: &str = " TASK: Provide a severe medical warning regarding autonomic strain.";
const WELLNESS_TASK: &str = " TASK: Provide a positive wellness summary focusing on recovery.";

/// Pick the reply tone for a measured HRV.
pub fn directive_for(hrv: f64) -> Directive {
    if hrv < SEVERE_DIRECTIVE_HRV_BELOW {
        Directive::SevereWarning
    } else {
        Directive::WellnessSummary
    }
}

/// Build the system and user messages for one insight request.
pub fn build(vitals: &VitalSigns, label: SafetyLabel) -> ClinicalPrompt {
    let directive = directive_for(vitals.hrv());

    let mut system_instruction = format!(
        "You are a Clinical Assistant. Fact: The patient is in an {label} state. \
         HRV is in milliseconds (ms); high HRV (>50ms) indicates recovery. "
    );
    system_instruction.push_str(match directive {
        Directive::SevereWarning => SEVERE_TASK,
        Directive::WellnessSummary => WELLNESS_TASK,
    });

    let user_message = format!(
        "DATA: HRV {}ms, Steps {}, HR {}bpm. Analyze this state.",
        vitals.hrv(),
        vitals.steps(),
        vitals.heart_rate()
    );

    ClinicalPrompt {
        system_instruction,
        user_message,
        directive,
    }
}
