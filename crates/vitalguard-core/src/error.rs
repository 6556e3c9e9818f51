use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("clinical note is empty")]
    EmptyNote,
}
