//! The two user-triggered flows.
//!
//! [`assess`] runs on every slider change: guardrail labels plus the risk
//! score, each surfaced independently. [`generate_insight`] runs on the
//! insight button: prompt, generation, report. It is all-or-nothing: the
//! report is only assembled from a successfully generated note.

use std::future::{Future, pending};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use vitalguard_core::guardrail::assess_labels;
use vitalguard_core::models::labels::{ActivityLabel, SafetyAlert, SafetyLabel};
use vitalguard_core::models::note::ClinicalNote;
use vitalguard_core::models::prompt::Directive;
use vitalguard_core::models::report::ClinicalReport;
use vitalguard_core::models::vitals::VitalSigns;
use vitalguard_export::error::ExportError;
use vitalguard_export::fhir::{ReportExport, assemble};
use vitalguard_reasoning::backend::ChatBackend;
use vitalguard_reasoning::client::ReasoningClient;
use vitalguard_reasoning::error::ReasoningError;
use vitalguard_reasoning::prompt;
use vitalguard_risk::scorer::RiskScorer;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Reasoning(#[from] ReasoningError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Risk branch result: a score, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RiskOutcome {
    Estimate {
        probability_percent: f64,
        /// One-decimal form for the metric tile, e.g. `"42.3%"`.
        display: String,
    },
    Unavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub vitals: VitalSigns,
    pub safety_label: SafetyLabel,
    pub activity_label: ActivityLabel,
    pub alert: SafetyAlert,
    pub risk: RiskOutcome,
}

/// Classify `vitals` and score their stress risk.
///
/// A model failure only blanks the risk section; the labels are always
/// returned.
pub async fn assess(scorer: &RiskScorer, vitals: VitalSigns) -> Assessment {
    let labels = assess_labels(&vitals);

    let risk = match scorer.score(&vitals).await {
        Ok(estimate) => RiskOutcome::Estimate {
            probability_percent: estimate.probability_percent,
            display: estimate.display_percent(),
        },
        Err(e) => {
            warn!(error = %e, "risk scoring unavailable");
            RiskOutcome::Unavailable {
                error: e.to_string(),
            }
        }
    };

    Assessment {
        vitals,
        safety_label: labels.safety,
        activity_label: labels.activity,
        alert: labels.safety.alert(),
        risk,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub safety_label: SafetyLabel,
    pub prompt_directive: Directive,
    pub note: ClinicalNote,
    pub report: ClinicalReport,
    pub export: ReportExport,
}

/// Generate a guardrail-constrained clinical note and its FHIR report.
pub async fn generate_insight<B: ChatBackend>(
    client: &ReasoningClient<B>,
    vitals: VitalSigns,
    issued_at: jiff::Timestamp,
) -> Result<Insight, PipelineError> {
    generate_insight_until(client, vitals, issued_at, pending()).await
}

/// [`generate_insight`], abandoned with [`ReasoningError::Cancelled`] once
/// `cancel` completes.
pub async fn generate_insight_until<B, C>(
    client: &ReasoningClient<B>,
    vitals: VitalSigns,
    issued_at: jiff::Timestamp,
    cancel: C,
) -> Result<Insight, PipelineError>
where
    B: ChatBackend,
    C: Future<Output = ()>,
{
    let label = assess_labels(&vitals).safety;
    let prompt = prompt::build(&vitals, label);

    let note = client.generate_until(&prompt, cancel).await?;

    let report = assemble(label, &note, issued_at);
    let export = ReportExport::from_report(&report)?;

    info!(
        label = label.as_str(),
        directive = ?prompt.directive,
        file_name = export.file_name.as_str(),
        "clinical insight generated"
    );

    Ok(Insight {
        safety_label: label,
        prompt_directive: prompt.directive,
        note,
        report,
        export,
    })
}
