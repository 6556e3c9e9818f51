use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::IntoResponse;

use vitalguard_core::models::report::ClinicalReport;
use vitalguard_core::models::vitals::VitalSigns;
use vitalguard_export::docx::{DOCX_MIME_TYPE, report_docx as render_docx};
use vitalguard_export::fhir::export_file_stem;
use vitalguard_export::styles::DocumentStyles;
use vitalguard_reasoning::backend::ChatBackend;

use crate::error::ApiError;
use crate::pipeline::{self, Insight};
use crate::state::AppState;

/// Insight button: generate the clinical note and its FHIR report.
///
/// Abandoned with 504 once `insight_deadline` passes. If the caller
/// disconnects, the handler future is dropped and the outstanding generation
/// request with it.
pub async fn generate<B: ChatBackend + 'static>(
    State(state): State<AppState<B>>,
    payload: Result<Json<VitalSigns>, JsonRejection>,
) -> Result<Json<Insight>, ApiError> {
    let Json(vitals) = payload?;
    let insight = pipeline::generate_insight_until(
        &state.reasoning,
        vitals,
        jiff::Timestamp::now(),
        tokio::time::sleep(state.insight_deadline),
    )
    .await?;
    Ok(Json(insight))
}

/// Render a previously generated report as a DOCX narrative.
pub async fn report_docx(
    payload: Result<Json<ClinicalReport>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(report) = payload?;
    let bytes = render_docx(&report, &DocumentStyles::default())?;
    let disposition = format!(
        "attachment; filename=\"{}.docx\"",
        export_file_stem(report.issued)
    );

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
