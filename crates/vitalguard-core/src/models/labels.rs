use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Deterministic strain category derived from HRV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SafetyLabel {
    #[serde(rename = "CRITICAL STRAIN")]
    CriticalStrain,
    #[serde(rename = "MODERATE STRAIN")]
    ModerateStrain,
    #[serde(rename = "OPTIMAL RECOVERY")]
    OptimalRecovery,
}

impl SafetyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalStrain => "CRITICAL STRAIN",
            Self::ModerateStrain => "MODERATE STRAIN",
            Self::OptimalRecovery => "OPTIMAL RECOVERY",
        }
    }

    /// The status banner shown next to the risk metric.
    pub fn alert(&self) -> SafetyAlert {
        let (severity, color, message) = match self {
            Self::CriticalStrain => (
                AlertSeverity::Error,
                "red",
                format!("🚨 ALERT: {self} detected. Immediate rest advised."),
            ),
            Self::ModerateStrain => (
                AlertSeverity::Warning,
                "orange",
                format!("⚠️ NOTICE: {self}. Monitor recovery trends."),
            ),
            Self::OptimalRecovery => (
                AlertSeverity::Success,
                "green",
                format!("✅ STATUS: {self}. Physiological state is stable."),
            ),
        };
        SafetyAlert {
            severity,
            color: color.to_string(),
            message,
        }
    }
}

impl fmt::Display for SafetyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level derived from the hourly step count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ActivityLabel {
    #[serde(rename = "HIGH/ACTIVE")]
    HighActive,
    #[serde(rename = "LIGHT/SEDENTARY")]
    LightSedentary,
}

impl ActivityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighActive => "HIGH/ACTIVE",
            Self::LightSedentary => "LIGHT/SEDENTARY",
        }
    }
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AlertSeverity {
    Error,
    Warning,
    Success,
}

/// Immediate visual feedback for a [`SafetyLabel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SafetyAlert {
    pub severity: AlertSeverity,
    pub color: String,
    pub message: String,
}

/// Both guardrail labels for one set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuardrailLabels {
    pub safety: SafetyLabel,
    pub activity: ActivityLabel,
}
