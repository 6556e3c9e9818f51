#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vitalguard_dashboard::state::AppState;
use vitalguard_reasoning::backend::{ChatBackend, ChatRequest};
use vitalguard_reasoning::client::{ReasoningClient, ReasoningConfig};
use vitalguard_reasoning::error::BackendError;
use vitalguard_risk::scorer::RiskScorer;

pub const MODEL_FIXTURE: &str =
    include_str!("../../../vitalguard-risk/tests/fixtures/stress_model.json");

/// In-memory generation service.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Result<String, BackendError>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    stall: bool,
}

impl FakeBackend {
    pub fn replying(reply: &str) -> Self {
        Self::with_replies(vec![Ok(reply.to_string())])
    }

    pub fn with_replies(replies: Vec<Result<String, BackendError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    /// A service that accepts requests and never answers.
    pub fn stalled() -> Self {
        Self {
            stall: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChatBackend for FakeBackend {
    async fn complete(&self, request: &ChatRequest, _token: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if self.stall {
            std::future::pending::<()>().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Generated clinical note.".to_string()))
    }
}

pub fn write_model(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("stress_model.json");
    std::fs::write(&path, MODEL_FIXTURE).unwrap();
    path
}

pub fn reasoning(
    backend: Arc<FakeBackend>,
    token: Option<&str>,
) -> ReasoningClient<Arc<FakeBackend>> {
    let config = ReasoningConfig {
        retry_backoff: Duration::from_millis(1),
        ..ReasoningConfig::default()
    };
    ReasoningClient::new(backend, token.map(str::to_string), config)
}

pub fn state(
    scorer: RiskScorer,
    backend: Arc<FakeBackend>,
    token: Option<&str>,
) -> AppState<Arc<FakeBackend>> {
    state_with_deadline(scorer, backend, token, Duration::from_secs(30))
}

pub fn state_with_deadline(
    scorer: RiskScorer,
    backend: Arc<FakeBackend>,
    token: Option<&str>,
    insight_deadline: Duration,
) -> AppState<Arc<FakeBackend>> {
    AppState {
        scorer: Arc::new(scorer),
        reasoning: Arc::new(reasoning(backend, token)),
        insight_deadline,
    }
}
