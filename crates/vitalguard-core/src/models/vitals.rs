use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Inclusive input range for one wearable reading, with the value the
/// dashboard controls start at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl VitalRange {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn check(&self, field: &'static str, value: f64) -> Result<f64, CoreError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(CoreError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// The accepted ranges for every reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalBounds {
    pub heart_rate: VitalRange,
    pub hrv: VitalRange,
    pub steps: VitalRange,
}

impl VitalBounds {
    pub const STANDARD: VitalBounds = VitalBounds {
        heart_rate: VitalRange {
            min: 50.0,
            max: 150.0,
            default: 75.0,
        },
        hrv: VitalRange {
            min: 10.0,
            max: 100.0,
            default: 48.0,
        },
        steps: VitalRange {
            min: 0.0,
            max: 10_000.0,
            default: 1457.0,
        },
    };
}

/// One set of wearable readings captured from the dashboard controls.
///
/// Values can only be created through [`VitalSigns::new`] (or deserialized,
/// which goes through the same checks), so every instance lies inside
/// [`VitalBounds::STANDARD`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "RawVitals")]
#[ts(export)]
pub struct VitalSigns {
    /// Heart rate in beats per minute.
    heart_rate: f64,
    /// Heart-rate variability in milliseconds.
    hrv: f64,
    /// Hourly step count.
    steps: u32,
}

impl VitalSigns {
    pub fn new(heart_rate: f64, hrv: f64, steps: u32) -> Result<Self, CoreError> {
        let bounds = VitalBounds::STANDARD;
        let heart_rate = bounds.heart_rate.check("heart_rate", heart_rate)?;
        let hrv = bounds.hrv.check("hrv", hrv)?;
        bounds.steps.check("steps", f64::from(steps))?;
        Ok(Self {
            heart_rate,
            hrv,
            steps,
        })
    }

    pub fn heart_rate(&self) -> f64 {
        self.heart_rate
    }

    pub fn hrv(&self) -> f64 {
        self.hrv
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            heart_rate: 75.0,
            hrv: 48.0,
            steps: 1457,
        }
    }
}

/// Unvalidated wire shape of [`VitalSigns`].
#[derive(Debug, Deserialize)]
struct RawVitals {
    heart_rate: f64,
    hrv: f64,
    steps: u32,
}

impl TryFrom<RawVitals> for VitalSigns {
    type Error = CoreError;

    fn try_from(raw: RawVitals) -> Result<Self, Self::Error> {
        VitalSigns::new(raw.heart_rate, raw.hrv, raw.steps)
    }
}
