use serde::{Deserialize, Serialize};

/// Typography for the DOCX narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub body_font: String,
    pub heading_font: String,

    /// Body text size in points.
    pub body_size: usize,
    pub heading1_size: usize,
    pub heading2_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            heading1_size: 16,
            heading2_size: 13,
        }
    }
}
