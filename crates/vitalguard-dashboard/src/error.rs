use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vitalguard_export::error::ExportError;
use vitalguard_reasoning::error::ReasoningError;

use crate::config::TOKEN_VAR;
use crate::pipeline::PipelineError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    CredentialMissing,
    GenerationFailed(String),
    Cancelled,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::CredentialMissing => (
                StatusCode::PRECONDITION_FAILED,
                format!("Missing Hugging Face Token. Please set {TOKEN_VAR} in your environment."),
            ),
            ApiError::GenerationFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Cancelled => (
                StatusCode::GATEWAY_TIMEOUT,
                "clinical note generation did not finish in time".to_string(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ReasoningError> for ApiError {
    fn from(e: ReasoningError) -> Self {
        match e {
            ReasoningError::AuthenticationMissing => ApiError::CredentialMissing,
            ReasoningError::GenerationFailed(msg) => ApiError::GenerationFailed(msg),
            ReasoningError::Cancelled => ApiError::Cancelled,
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Reasoning(e) => e.into(),
            PipelineError::Export(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
