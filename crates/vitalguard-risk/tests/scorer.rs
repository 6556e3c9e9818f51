use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vitalguard_core::models::vitals::VitalSigns;
use vitalguard_risk::error::RiskError;
use vitalguard_risk::features::{FeatureRow, ProbabilityModel};
use vitalguard_risk::scorer::RiskScorer;

const FIXTURE: &str = include_str!("fixtures/stress_model.json");

fn write_fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("stress_model.json");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

/// Returns a fixed positive probability and counts calls.
struct FixedModel {
    positive: f64,
    calls: AtomicUsize,
}

impl ProbabilityModel for FixedModel {
    fn predict_proba(&self, _row: &FeatureRow) -> [f64; 2] {
        self.calls.fetch_add(1, Ordering::SeqCst);
        [1.0 - self.positive, self.positive]
    }
}

#[tokio::test]
async fn scores_from_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = RiskScorer::from_path(write_fixture(&dir));
    assert!(!scorer.is_loaded());

    let vitals = VitalSigns::new(80.0, 25.0, 500).unwrap();
    let estimate = scorer.score(&vitals).await.unwrap();
    let expected = 100.0 / (1.0 + (-2.1f64).exp());
    assert!((estimate.probability_percent - expected).abs() < 1e-9);
    assert!(scorer.is_loaded());
}

#[tokio::test]
async fn model_is_loaded_once_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);
    let scorer = RiskScorer::from_path(&path);

    let vitals = VitalSigns::default();
    let first = scorer.score(&vitals).await.unwrap();

    // The artifact is no longer needed once loaded.
    std::fs::remove_file(&path).unwrap();
    let second = scorer.score(&vitals).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = RiskScorer::from_path(dir.path().join("absent.json"));

    let err = scorer.score(&VitalSigns::default()).await.unwrap_err();
    assert!(matches!(err, RiskError::ModelUnavailable(_)));
    assert!(!scorer.is_loaded());
}

#[tokio::test]
async fn failed_load_is_retried_on_next_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stress_model.json");
    let scorer = RiskScorer::from_path(&path);

    assert!(scorer.score(&VitalSigns::default()).await.is_err());

    std::fs::write(&path, FIXTURE).unwrap();
    assert!(scorer.score(&VitalSigns::default()).await.is_ok());
}

#[tokio::test]
async fn corrupt_artifact_is_model_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stress_model.json");
    std::fs::write(&path, "{\"learner\": {}}").unwrap();

    let err = RiskScorer::from_path(&path)
        .score(&VitalSigns::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RiskError::ModelUnavailable(_)));
}

#[tokio::test]
async fn estimate_stays_within_percentage_bounds_over_valid_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = RiskScorer::from_path(write_fixture(&dir));

    for hr in [50.0, 75.0, 99.0, 100.0, 150.0] {
        for hrv in [10.0, 29.0, 30.0, 50.0, 100.0] {
            for steps in [0, 2000, 10_000] {
                let vitals = VitalSigns::new(hr, hrv, steps).unwrap();
                let estimate = scorer.score(&vitals).await.unwrap();
                assert!(
                    (0.0..=100.0).contains(&estimate.probability_percent),
                    "{estimate:?} for {vitals:?}"
                );
            }
        }
    }
}

#[tokio::test]
async fn preloaded_model_output_is_clamped() {
    let model = Arc::new(FixedModel {
        positive: 1.2,
        calls: AtomicUsize::new(0),
    });
    let scorer = RiskScorer::with_model(model.clone());
    assert!(scorer.is_loaded());

    let estimate = scorer.score(&VitalSigns::default()).await.unwrap();
    assert_eq!(estimate.probability_percent, 100.0);
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_finite_output_is_rejected() {
    let scorer = RiskScorer::with_model(Arc::new(FixedModel {
        positive: f64::NAN,
        calls: AtomicUsize::new(0),
    }));

    let err = scorer.score(&VitalSigns::default()).await.unwrap_err();
    assert!(matches!(err, RiskError::InvalidOutput(_)));
}

#[tokio::test]
async fn concurrent_first_calls_share_one_model() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = Arc::new(RiskScorer::from_path(write_fixture(&dir)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let scorer = scorer.clone();
            tokio::spawn(async move { scorer.score(&VitalSigns::default()).await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
