use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("no inference credential configured")]
    AuthenticationMissing,

    #[error("clinical note generation failed: {0}")]
    GenerationFailed(String),

    #[error("clinical note generation was cancelled")]
    Cancelled,
}

/// Failure of a single request to the generation service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {message}")]
    Transport { message: String, transient: bool },

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl BackendError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { transient, .. } => *transient,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Timeout(_) => true,
            Self::ResponseParse(_) | Self::Client(_) => false,
        }
    }
}
