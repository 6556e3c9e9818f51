use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("report is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
