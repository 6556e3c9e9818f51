use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which tone the generator is instructed to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Directive {
    /// Severe medical warning regarding autonomic strain.
    SevereWarning,
    /// Positive wellness summary focusing on recovery.
    WellnessSummary,
}

/// The instructions sent to the generative model for one insight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalPrompt {
    pub system_instruction: String,
    pub user_message: String,
    pub directive: Directive,
}
