use serde::Serialize;
use tera::{Context, Tera};

use vitalguard_core::models::report::ClinicalReport;

use crate::error::ExportError;

const TEMPLATE_NAME: &str = "clinical_impression.md";

/// Markdown subset understood by [`crate::docx::generate_docx`].
pub const CLINICAL_IMPRESSION_TEMPLATE: &str = "\
# Medical Documentation (HL7 FHIR)

**Safety Label:** {{ safety_label }}

**Issued:** {{ issued }}

**Performer:** {{ performer }}

## Clinical Impression

{{ conclusion }}

---

Logic Verified by Guardrails
";

#[derive(Serialize)]
struct NarrativeContext<'a> {
    safety_label: &'a str,
    issued: String,
    performer: String,
    conclusion: &'a str,
}

/// Render the human-readable narrative of a report.
pub fn render_narrative(report: &ClinicalReport) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, CLINICAL_IMPRESSION_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let narrative = NarrativeContext {
        safety_label: report.safety_label_value().unwrap_or("UNLABELLED"),
        issued: report.issued.to_string(),
        performer: report
            .performer
            .iter()
            .map(|p| p.display.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        conclusion: &report.conclusion,
    };

    let context = Context::from_serialize(&narrative)?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}
