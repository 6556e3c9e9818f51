//! vitalguard-dashboard library root.
//!
//! The HTTP surface behind the dashboard: one handler per user action.
//! Moving a slider posts to `/assessment` (labels + risk score); the
//! "Generate Clinical Insight" button posts to `/insight` (prompt, note,
//! FHIR report).

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use vitalguard_reasoning::backend::ChatBackend;

pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the dashboard router over `state`.
pub fn router<B: ChatBackend + 'static>(state: AppState<B>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/vitals/bounds", get(routes::vitals::bounds))
        .route("/assessment", post(routes::assessment::assess::<B>))
        .route("/insight", post(routes::insight::generate::<B>))
        .route("/report/docx", post(routes::insight::report_docx))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
