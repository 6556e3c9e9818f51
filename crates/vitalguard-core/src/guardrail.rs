//! Deterministic classification rules.
//!
//! These thresholds are the safety contract of the pipeline: the prompt sent
//! to the generative model and the exported report both carry the label
//! computed here, never a model-derived one.
//!
//! The rules are order-based comparisons, so they are total over every `f64`
//! and every step count. Range enforcement lives in
//! [`VitalSigns::new`](crate::models::vitals::VitalSigns::new).

use crate::models::labels::{ActivityLabel, GuardrailLabels, SafetyLabel};
use crate::models::vitals::VitalSigns;

/// Below this HRV (ms) the patient is in critical strain.
pub const CRITICAL_HRV_BELOW: f64 = 30.0;

/// Up to and including this HRV (ms) the patient is in moderate strain.
pub const MODERATE_HRV_MAX: f64 = 50.0;

/// Step counts above this are high activity.
pub const ACTIVE_STEPS_ABOVE: u32 = 2000;

pub fn classify(hrv: f64) -> SafetyLabel {
    if hrv < CRITICAL_HRV_BELOW {
        SafetyLabel::CriticalStrain
    } else if hrv <= MODERATE_HRV_MAX {
        SafetyLabel::ModerateStrain
    } else {
        SafetyLabel::OptimalRecovery
    }
}

pub fn classify_activity(steps: u32) -> ActivityLabel {
    if steps > ACTIVE_STEPS_ABOVE {
        ActivityLabel::HighActive
    } else {
        ActivityLabel::LightSedentary
    }
}

/// Classify both readings of `vitals`.
pub fn assess_labels(vitals: &VitalSigns) -> GuardrailLabels {
    GuardrailLabels {
        safety: classify(vitals.hrv()),
        activity: classify_activity(vitals.steps()),
    }
}
