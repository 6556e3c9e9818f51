use vitalguard_core::models::vitals::VitalSigns;

/// Column order the stress model was trained with.
pub const FEATURE_NAMES: [&str; 3] = ["heart_rate", "hrv", "steps"];

/// One model input row, in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow(pub [f64; 3]);

impl FeatureRow {
    pub fn from_vitals(vitals: &VitalSigns) -> Self {
        Self([vitals.heart_rate(), vitals.hrv(), f64::from(vitals.steps())])
    }

    pub fn values(&self) -> &[f64; 3] {
        &self.0
    }
}

/// A binary classifier that can report class probabilities.
pub trait ProbabilityModel: Send + Sync {
    /// Probabilities of `[negative, positive]` for one row.
    fn predict_proba(&self, row: &FeatureRow) -> [f64; 2];
}
