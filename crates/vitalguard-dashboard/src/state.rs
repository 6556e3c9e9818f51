use std::sync::Arc;
use std::time::Duration;

use vitalguard_reasoning::backend::HttpChatBackend;
use vitalguard_reasoning::client::ReasoningClient;
use vitalguard_risk::scorer::RiskScorer;

use crate::config::DashboardConfig;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<B = HttpChatBackend> {
    pub scorer: Arc<RiskScorer>,
    pub reasoning: Arc<ReasoningClient<B>>,
    /// Server-side limit on one `/insight` request.
    pub insight_deadline: Duration,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            reasoning: Arc::clone(&self.reasoning),
            insight_deadline: self.insight_deadline,
        }
    }
}

impl AppState {
    /// Wire the scorer and HTTP reasoning client from `config`.
    ///
    /// The model artifact is not read here; it is loaded on the first
    /// assessment.
    pub fn from_config(config: &DashboardConfig) -> eyre::Result<Self> {
        let backend = HttpChatBackend::new(config.inference_url.clone())?;
        Ok(Self {
            scorer: Arc::new(RiskScorer::from_path(config.model_path.clone())),
            reasoning: Arc::new(ReasoningClient::new(
                backend,
                config.hf_token.clone(),
                config.reasoning_config(),
            )),
            insight_deadline: config.insight_deadline,
        })
    }
}
