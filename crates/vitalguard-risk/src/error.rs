use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("risk model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("risk model returned a non-finite probability: {0}")]
    InvalidOutput(f64),
}
