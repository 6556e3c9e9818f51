//! Mapping a guardrail label and generated note into a FHIR
//! `DiagnosticReport`, and the downloadable JSON form of it.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use vitalguard_core::models::labels::SafetyLabel;
use vitalguard_core::models::note::ClinicalNote;
use vitalguard_core::models::report::{
    CARDIOVASCULAR_RISK_CODE, CARDIOVASCULAR_RISK_DISPLAY, ClinicalReport, CodeableConcept,
    Coding, Extension, LOINC_SYSTEM, PERFORMER_DISPLAY, Performer, RESOURCE_TYPE, Reference,
    ReportStatus, SAFETY_LABEL_EXTENSION_URL, SUBJECT_REFERENCE,
};

use crate::error::ExportError;

pub const REPORT_MIME_TYPE: &str = "application/json";

/// Build the report for one generated note.
///
/// `timestamp` is used for both `effectiveDateTime` and `issued`. The safety
/// label travels in an extension next to the narrative so a receiving system
/// can cross-check one against the other.
pub fn assemble(
    label: SafetyLabel,
    note: &ClinicalNote,
    timestamp: jiff::Timestamp,
) -> ClinicalReport {
    ClinicalReport {
        resource_type: RESOURCE_TYPE.to_string(),
        status: ReportStatus::Final,
        code: CodeableConcept {
            coding: vec![Coding {
                system: LOINC_SYSTEM.to_string(),
                code: CARDIOVASCULAR_RISK_CODE.to_string(),
                display: CARDIOVASCULAR_RISK_DISPLAY.to_string(),
            }],
        },
        subject: Reference {
            reference: SUBJECT_REFERENCE.to_string(),
        },
        effective_date_time: timestamp,
        issued: timestamp,
        performer: vec![Performer {
            display: PERFORMER_DISPLAY.to_string(),
        }],
        conclusion: note.as_str().to_string(),
        extension: vec![Extension {
            url: SAFETY_LABEL_EXTENSION_URL.to_string(),
            value_string: label.as_str().to_string(),
        }],
    }
}

/// Indented JSON (four spaces), keys in resource order.
pub fn serialize(report: &ClinicalReport) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    report.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ExportError::Encoding(e.to_string()))
}

pub fn parse(json: &str) -> Result<ClinicalReport, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// `clinical_report_<YYYYMMDD>`, dated in UTC. Shared by every export format.
pub fn export_file_stem(timestamp: jiff::Timestamp) -> String {
    format!("clinical_report_{}", timestamp.strftime("%Y%m%d"))
}

/// `clinical_report_<YYYYMMDD>.json`.
pub fn export_file_name(timestamp: jiff::Timestamp) -> String {
    format!("{}.json", export_file_stem(timestamp))
}

/// A report ready to hand to a download button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportExport {
    pub file_name: String,
    pub mime_type: String,
    pub body: String,
}

impl ReportExport {
    pub fn from_report(report: &ClinicalReport) -> Result<Self, ExportError> {
        let export = Self {
            file_name: export_file_name(report.issued),
            mime_type: REPORT_MIME_TYPE.to_string(),
            body: serialize(report)?,
        };

        info!(
            file_name = export.file_name.as_str(),
            bytes = export.body.len(),
            "clinical report exported"
        );

        Ok(export)
    }
}
