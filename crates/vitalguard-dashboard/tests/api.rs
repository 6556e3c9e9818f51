mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{FakeBackend, state, state_with_deadline, write_model};
use vitalguard_dashboard::router;
use vitalguard_export::docx::DOCX_MIME_TYPE;
use vitalguard_export::fhir::export_file_stem;
use vitalguard_reasoning::error::BackendError;
use vitalguard_risk::scorer::RiskScorer;

fn app(dir: &tempfile::TempDir, backend: Arc<FakeBackend>, token: Option<&str>) -> Router {
    let scorer = RiskScorer::from_path(write_model(dir));
    router(state(scorer, backend, token))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir, Arc::default(), None)
        .oneshot(get("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn bounds_expose_slider_ranges_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir, Arc::default(), None)
        .oneshot(get("/vitals/bounds"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["bounds"]["hrv"]["min"], json!(10.0));
    assert_eq!(body["bounds"]["steps"]["max"], json!(10000.0));
    assert_eq!(body["defaults"]["heart_rate"], json!(75.0));
    assert_eq!(body["defaults"]["steps"], json!(1457));
}

#[tokio::test]
async fn assessment_returns_labels_and_risk() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir, Arc::default(), None)
        .oneshot(post_json(
            "/assessment",
            json!({ "heart_rate": 80.0, "hrv": 25.0, "steps": 500 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["safety_label"], "CRITICAL STRAIN");
    assert_eq!(body["activity_label"], "LIGHT/SEDENTARY");
    let percent = body["risk"]["probability_percent"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percent));
    assert_eq!(body["risk"]["display"], format!("{percent:.1}%"));
}

#[tokio::test]
async fn out_of_range_vitals_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(&dir, Arc::default(), None)
        .oneshot(post_json(
            "/assessment",
            json!({ "heart_rate": 80.0, "hrv": 5.0, "steps": 500 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn insight_returns_report_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FakeBackend::replying("Recovery is on track."));
    let response = app(&dir, backend.clone(), Some("hf_test"))
        .oneshot(post_json(
            "/insight",
            json!({ "heart_rate": 70.0, "hrv": 60.0, "steps": 5000 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["safety_label"], "OPTIMAL RECOVERY");
    assert_eq!(body["prompt_directive"], "wellness_summary");
    assert_eq!(body["report"]["resourceType"], "DiagnosticReport");
    assert_eq!(body["report"]["conclusion"], "Recovery is on track.");
    assert_eq!(body["export"]["mime_type"], "application/json");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn insight_without_token_is_a_precondition_failure() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FakeBackend::default());
    let response = app(&dir, backend.clone(), None)
        .oneshot(post_json(
            "/insight",
            json!({ "heart_rate": 75.0, "hrv": 48.0, "steps": 1457 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("HF_TOKEN"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn insight_generation_failure_is_a_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FakeBackend::with_replies(vec![Err(BackendError::Status {
        status: 401,
        body: "invalid token".to_string(),
    })]));
    let response = app(&dir, backend, Some("hf_test"))
        .oneshot(post_json(
            "/insight",
            json!({ "heart_rate": 75.0, "hrv": 48.0, "steps": 1457 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(json_body(response).await.get("report").is_none());
}

#[tokio::test]
async fn insight_past_its_deadline_is_a_gateway_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FakeBackend::stalled());
    let scorer = RiskScorer::from_path(write_model(&dir));
    let app = router(state_with_deadline(
        scorer,
        backend.clone(),
        Some("hf_test"),
        Duration::from_millis(50),
    ));

    let response = app
        .oneshot(post_json(
            "/insight",
            json!({ "heart_rate": 75.0, "hrv": 48.0, "steps": 1457 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(json_body(response).await.get("report").is_none());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn report_docx_downloads_a_word_document() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FakeBackend::replying("**Rest** and hydrate."));
    let app = app(&dir, backend, Some("hf_test"));

    let insight = app
        .clone()
        .oneshot(post_json(
            "/insight",
            json!({ "heart_rate": 120.0, "hrv": 20.0, "steps": 100 }),
        ))
        .await
        .unwrap();
    let report = json_body(insight).await["report"].clone();
    let issued: jiff::Timestamp = report["issued"].as_str().unwrap().parse().unwrap();

    let response = app.oneshot(post_json("/report/docx", report)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        DOCX_MIME_TYPE
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        disposition,
        format!("attachment; filename=\"{}.docx\"", export_file_stem(issued))
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}
