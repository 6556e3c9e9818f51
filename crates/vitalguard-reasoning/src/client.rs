use std::future::{Future, pending};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use vitalguard_core::models::note::ClinicalNote;
use vitalguard_core::models::prompt::ClinicalPrompt;

use crate::backend::{ChatBackend, ChatMessage, ChatRequest, ChatRole, HttpChatBackend};
use crate::error::{BackendError, ReasoningError};

pub const DEFAULT_MODEL_ID: &str = "meta-llama/Llama-3.2-1B-Instruct";

/// Enough output budget that clinical notes are not cut off mid-sentence.
pub const MAX_OUTPUT_TOKENS: u32 = 450;

/// Near-deterministic phrasing for clinical text.
pub const TEMPERATURE: f32 = 0.1;

/// Decoding and retry settings for [`ReasoningClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Budget for one attempt, including reading the reply.
    pub timeout: Duration,
    /// Extra attempts after a transient failure.
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl ReasoningConfig {
    /// Worst-case wall time of one `generate` call: every attempt runs to
    /// its timeout, with a backoff between attempts.
    pub fn retry_budget(&self) -> Duration {
        self.timeout * (self.max_retries + 1) + self.retry_backoff * self.max_retries
    }

    /// The request body for `prompt`.
    pub fn request_for(&self, prompt: &ClinicalPrompt) -> ChatRequest {
        ChatRequest {
            model: self.model_id.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: prompt.system_instruction.clone(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.user_message.clone(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Sends guardrail prompts to the generation service.
pub struct ReasoningClient<B = HttpChatBackend> {
    backend: B,
    credential: Option<String>,
    config: ReasoningConfig,
}

impl<B: ChatBackend> ReasoningClient<B> {
    /// `credential` is the bearer token; `None` or a blank string makes every
    /// call fail with [`ReasoningError::AuthenticationMissing`].
    pub fn new(backend: B, credential: Option<String>, config: ReasoningConfig) -> Self {
        Self {
            backend,
            credential,
            config,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.token().is_some()
    }

    /// Generate a clinical note for `prompt`.
    pub async fn generate(&self, prompt: &ClinicalPrompt) -> Result<ClinicalNote, ReasoningError> {
        self.generate_until(prompt, pending()).await
    }

    /// Generate a clinical note, giving up with [`ReasoningError::Cancelled`]
    /// as soon as `cancel` completes.
    pub async fn generate_until<C>(
        &self,
        prompt: &ClinicalPrompt,
        cancel: C,
    ) -> Result<ClinicalNote, ReasoningError>
    where
        C: Future<Output = ()>,
    {
        let token = self.token().ok_or(ReasoningError::AuthenticationMissing)?;
        let request = self.config.request_for(prompt);
        let model_id = self.config.model_id.as_str();

        tokio::pin!(cancel);
        let timeout = self.config.timeout;

        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            info!(model_id, attempt, directive = ?prompt.directive, "requesting clinical note");

            let outcome = tokio::select! {
                biased;
                _ = &mut cancel => {
                    warn!(model_id, attempt, "clinical note generation cancelled");
                    return Err(ReasoningError::Cancelled);
                }
                result = tokio::time::timeout(timeout, self.backend.complete(&request, token)) => {
                    result
                }
            };

            let failure = match outcome {
                Ok(Ok(text)) => {
                    let note = ClinicalNote::new(text).map_err(|_| {
                        error!(model_id, attempt, "generation service returned an empty note");
                        ReasoningError::GenerationFailed(
                            "service returned an empty note".to_string(),
                        )
                    })?;
                    info!(
                        model_id,
                        attempt,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "clinical note generated"
                    );
                    return Ok(note);
                }
                Ok(Err(e)) => e,
                Err(_) => BackendError::Timeout(timeout),
            };

            if !failure.is_transient() || attempt > self.config.max_retries {
                error!(model_id, attempt, error = %failure, "clinical note generation failed");
                return Err(ReasoningError::GenerationFailed(failure.to_string()));
            }

            warn!(model_id, attempt, error = %failure, "transient generation failure, retrying");

            tokio::select! {
                biased;
                _ = &mut cancel => return Err(ReasoningError::Cancelled),
                _ = tokio::time::sleep(self.config.retry_backoff) => {}
            }
        }
    }

    fn token(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
