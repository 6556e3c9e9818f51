//! FHIR `DiagnosticReport` resource, restricted to the fields the dashboard
//! exports.
//!
//! Field declaration order is the serialized key order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const RESOURCE_TYPE: &str = "DiagnosticReport";
pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const CARDIOVASCULAR_RISK_CODE: &str = "81223-0";
pub const CARDIOVASCULAR_RISK_DISPLAY: &str = "Cardiovascular risk report";
pub const SUBJECT_REFERENCE: &str = "Patient/example-user";
pub const PERFORMER_DISPLAY: &str = "Llama-3.2 Clinical AI Assistant";
pub const SAFETY_LABEL_EXTENSION_URL: &str = "http://example.org/safety-label";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClinicalReport {
    pub resource_type: String,
    pub status: ReportStatus,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub effective_date_time: jiff::Timestamp,
    pub issued: jiff::Timestamp,
    pub performer: Vec<Performer>,
    pub conclusion: String,
    pub extension: Vec<Extension>,
}

impl ClinicalReport {
    /// The `valueString` of the safety-label extension, if present.
    pub fn safety_label_value(&self) -> Option<&str> {
        self.extension
            .iter()
            .find(|ext| ext.url == SAFETY_LABEL_EXTENSION_URL)
            .map(|ext| ext.value_string.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ReportStatus {
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Reference {
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Performer {
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Extension {
    pub url: String,
    pub value_string: String,
}
