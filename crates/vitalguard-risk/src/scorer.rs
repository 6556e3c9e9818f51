use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use vitalguard_core::models::risk::RiskEstimate;
use vitalguard_core::models::vitals::VitalSigns;

use crate::error::RiskError;
use crate::features::{FeatureRow, ProbabilityModel};
use crate::xgboost::GradientBoostedModel;

/// Stress-risk scorer backed by a lazily loaded, process-shared model.
///
/// The model is initialized on the first call to [`RiskScorer::score`] and
/// reused for the lifetime of the scorer. Concurrent first calls wait on the
/// same initialization. A failed load is not cached, so a missing artifact
/// can be fixed without restarting.
pub struct RiskScorer {
    model_path: Option<PathBuf>,
    model: OnceCell<Arc<dyn ProbabilityModel>>,
}

impl RiskScorer {
    /// A scorer that loads an XGBoost JSON artifact from `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: Some(path.into()),
            model: OnceCell::new(),
        }
    }

    /// A scorer over an already loaded model.
    pub fn with_model(model: Arc<dyn ProbabilityModel>) -> Self {
        Self {
            model_path: None,
            model: OnceCell::new_with(Some(model)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Estimate the stress-risk probability for one set of readings.
    pub async fn score(&self, vitals: &VitalSigns) -> Result<RiskEstimate, RiskError> {
        let model = self.model().await?;
        let row = FeatureRow::from_vitals(vitals);
        let [_, positive] = model.predict_proba(&row);

        let estimate =
            RiskEstimate::from_probability(positive).ok_or(RiskError::InvalidOutput(positive))?;

        debug!(
            probability_percent = estimate.probability_percent,
            "scored stress risk"
        );

        Ok(estimate)
    }

    async fn model(&self) -> Result<&Arc<dyn ProbabilityModel>, RiskError> {
        self.model
            .get_or_try_init(|| async {
                let path = self.model_path.as_deref().ok_or_else(|| {
                    RiskError::ModelUnavailable("no model artifact configured".to_string())
                })?;
                load_model(path).await
            })
            .await
    }
}

async fn load_model(path: &Path) -> Result<Arc<dyn ProbabilityModel>, RiskError> {
    let started = Instant::now();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "stress model artifact unreadable");
        RiskError::ModelUnavailable(format!("failed to read {}: {e}", path.display()))
    })?;

    let model = GradientBoostedModel::from_json_slice(&bytes).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "stress model artifact rejected");
    })?;

    info!(
        path = %path.display(),
        trees = model.tree_count(),
        duration_ms = started.elapsed().as_millis() as u64,
        "stress model loaded"
    );

    Ok(Arc::new(model))
}
