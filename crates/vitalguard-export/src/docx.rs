use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use vitalguard_core::models::report::ClinicalReport;

use crate::error::ExportError;
use crate::render::render_narrative;
use crate::styles::DocumentStyles;

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Render `report` as a narrative Word document.
pub fn report_docx(
    report: &ClinicalReport,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let rendered = render_narrative(report)?;
    generate_docx(&rendered, styles)
}

/// Convert narrative Markdown into DOCX bytes.
///
/// Supported lines: `# ` and `## ` headings, `---` separators, and body
/// paragraphs with `**bold**` spans. Generated notes often carry their own
/// `*` bullets; those are kept as plain text.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles, styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles, styles.heading2_size));

    for line in rendered.lines() {
        let trimmed = line.trim();
        let paragraph = if trimmed.is_empty() || trimmed == "---" {
            Paragraph::new()
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            Paragraph::new()
                .style("Heading2")
                .add_run(Run::new().add_text(text))
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(text))
        } else {
            inline_runs(trimmed, styles)
                .into_iter()
                .fold(Paragraph::new().align(AlignmentType::Left), |p, run| {
                    p.add_run(run)
                })
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, styles: &DocumentStyles, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .fonts(RunFonts::new().ascii(&styles.heading_font))
        .size(size_pt * 2) // half-points
        .bold()
}

/// Split `text` on `**` markers; odd segments are bold.
fn inline_runs(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let closed = text.matches("**").count() % 2 == 0;
    let segments: Vec<&str> = if closed {
        text.split("**").collect()
    } else {
        vec![text]
    };

    segments
        .into_iter()
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| {
            let run = Run::new()
                .add_text(segment)
                .size(styles.body_size * 2)
                .fonts(RunFonts::new().ascii(&styles.body_font));
            if i % 2 == 1 { run.bold() } else { run }
        })
        .collect()
}
