use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use vitalguard_reasoning::backend::DEFAULT_ENDPOINT;
use vitalguard_reasoning::client::{DEFAULT_MODEL_ID, ReasoningConfig};

pub const TOKEN_VAR: &str = "HF_TOKEN";
pub const MODEL_PATH_VAR: &str = "VITALGUARD_MODEL_PATH";
pub const INFERENCE_URL_VAR: &str = "VITALGUARD_INFERENCE_URL";
pub const MODEL_ID_VAR: &str = "VITALGUARD_MODEL_ID";
pub const TIMEOUT_VAR: &str = "VITALGUARD_TIMEOUT_SECS";
pub const MAX_RETRIES_VAR: &str = "VITALGUARD_MAX_RETRIES";
pub const INSIGHT_DEADLINE_VAR: &str = "VITALGUARD_INSIGHT_DEADLINE_SECS";
pub const BIND_VAR: &str = "VITALGUARD_BIND";
pub const LOG_JSON_VAR: &str = "VITALGUARD_LOG_JSON";

const DEFAULT_MODEL_PATH: &str = "stress_model.json";
const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 2;
/// Added to the retry budget when no insight deadline is configured.
const INSIGHT_DEADLINE_SLACK: Duration = Duration::from_secs(10);

/// Runtime configuration, read once at start-up and passed to the scorer
/// and reasoning client constructors.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Bearer token for the inference service. Absent is allowed: only the
    /// insight path needs it.
    pub hf_token: Option<String>,
    pub model_path: PathBuf,
    pub inference_url: String,
    pub model_id: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Wall-clock limit for one insight request, across all retries.
    pub insight_deadline: Duration,
    pub bind: SocketAddr,
    pub log_json: bool,
}

impl DashboardConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_secs = match var(TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| eyre::eyre!("{TIMEOUT_VAR}={raw} is not a number of seconds: {e}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(eyre::eyre!("{TIMEOUT_VAR} must be greater than zero"));
        }

        let max_retries = match var(MAX_RETRIES_VAR) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| eyre::eyre!("{MAX_RETRIES_VAR}={raw} is not a retry count: {e}"))?,
            None => DEFAULT_MAX_RETRIES,
        };

        let timeout = Duration::from_secs(timeout_secs);
        let retry_budget = ReasoningConfig {
            timeout,
            max_retries,
            ..ReasoningConfig::default()
        }
        .retry_budget();

        // The deadline must leave room for the last retry to time out on its
        // own, so a hung service ends in 502 rather than 504.
        let insight_deadline = match var(INSIGHT_DEADLINE_VAR) {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    eyre::eyre!("{INSIGHT_DEADLINE_VAR}={raw} is not a number of seconds: {e}")
                })?;
                let deadline = Duration::from_secs(secs);
                if deadline < retry_budget {
                    return Err(eyre::eyre!(
                        "{INSIGHT_DEADLINE_VAR}={secs} is shorter than the retry budget of {:.1}s",
                        retry_budget.as_secs_f64()
                    ));
                }
                deadline
            }
            None => retry_budget + INSIGHT_DEADLINE_SLACK,
        };

        let bind_raw = var(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("{BIND_VAR}={bind_raw} is not a socket address: {e}"))?;

        let log_json = matches!(var(LOG_JSON_VAR).as_deref(), Some("1" | "true" | "yes"));

        Ok(Self {
            hf_token: var(TOKEN_VAR),
            model_path: PathBuf::from(
                var(MODEL_PATH_VAR).unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            ),
            inference_url: var(INFERENCE_URL_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model_id: var(MODEL_ID_VAR).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            timeout,
            max_retries,
            insight_deadline,
            bind,
            log_json,
        })
    }

    pub fn reasoning_config(&self) -> ReasoningConfig {
        ReasoningConfig {
            model_id: self.model_id.clone(),
            timeout: self.timeout,
            max_retries: self.max_retries,
            ..ReasoningConfig::default()
        }
    }

    /// Redacted view, safe to log.
    pub fn info(&self) -> ConfigInfo {
        ConfigInfo {
            model_path: self.model_path.display().to_string(),
            inference_url: self.inference_url.clone(),
            model_id: self.model_id.clone(),
            timeout_secs: self.timeout.as_secs(),
            max_retries: self.max_retries,
            insight_deadline_secs: self.insight_deadline.as_secs(),
            bind: self.bind.to_string(),
            token_hint: self.hf_token.as_deref().map(redact_token),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub model_path: String,
    pub inference_url: String,
    pub model_id: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub insight_deadline_secs: u64,
    pub bind: String,
    pub token_hint: Option<String>,
}

fn redact_token(token: &str) -> String {
    if token.len() <= 8 || !token.is_ascii() {
        return "****".to_string();
    }
    let prefix = &token[..4];
    let suffix = &token[token.len() - 4..];
    format!("{prefix}...{suffix}")
}
