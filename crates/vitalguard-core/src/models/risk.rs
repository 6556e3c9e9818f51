use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Stress-risk probability for one evaluation, as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskEstimate {
    pub probability_percent: f64,
}

impl RiskEstimate {
    /// Scale a positive-class probability in `[0, 1]` to a percentage.
    ///
    /// Values outside the unit interval are clamped, so the estimate always
    /// lies in `[0, 100]`. Returns `None` for non-finite input.
    pub fn from_probability(probability: f64) -> Option<Self> {
        if !probability.is_finite() {
            return None;
        }
        Some(Self {
            probability_percent: probability.clamp(0.0, 1.0) * 100.0,
        })
    }

    /// One-decimal display form, e.g. `"42.3%"`.
    pub fn display_percent(&self) -> String {
        format!("{:.1}%", self.probability_percent)
    }
}
