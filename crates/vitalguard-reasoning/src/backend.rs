//! Transport to an OpenAI-compatible chat-completions endpoint.
//!
//! The default endpoint is the Hugging Face inference router, which serves
//! `meta-llama/Llama-3.2-1B-Instruct` behind the standard
//! `/v1/chat/completions` request shape:
//!
//! ```text
//! POST {endpoint}
//! Authorization: Bearer <token>
//! { "model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}],
//!   "max_tokens": 450, "temperature": 0.1 }
//! ```
//!
//! The reply text is `choices[0].message.content`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::BackendError;

pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/v1/chat/completions";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body carried into a [`BackendError::Status`].
const MAX_ERROR_BODY: usize = 512;

// ── Types ────────────────────────────────────────────────────────────────────

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The request body sent to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Something that can run one chat completion.
///
/// `token` is the bearer credential; implementations must not log it.
pub trait ChatBackend: Send + Sync {
    fn complete(
        &self,
        request: &ChatRequest,
        token: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

impl<T: ChatBackend> ChatBackend for &T {
    fn complete(
        &self,
        request: &ChatRequest,
        token: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send {
        (**self).complete(request, token)
    }
}

impl<T: ChatBackend> ChatBackend for Arc<T> {
    fn complete(
        &self,
        request: &ChatRequest,
        token: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send {
        (**self).complete(request, token)
    }
}

// ── HTTP implementation ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// [`ChatBackend`] over HTTPS using `reqwest`.
///
/// Only the connect phase has its own timeout; the overall request budget is
/// enforced by [`ReasoningClient`](crate::client::ReasoningClient).
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl ChatBackend for HttpChatBackend {
    async fn complete(&self, request: &ChatRequest, token: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport {
                transient: e.is_connect() || e.is_timeout(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| BackendError::ResponseParse(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            info!(
                model = request.model.as_str(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion token usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::ResponseParse("no message in response".to_string()))
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
