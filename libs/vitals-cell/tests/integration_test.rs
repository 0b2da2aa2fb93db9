// =====================================================================================
// VITALS CELL INTEGRATION TESTS
// =====================================================================================

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_config::AppConfig;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};
use vitals_cell::{vitals_routes, InMemoryVitalsRepository, VitalsHandlers, VitalsRepository};

struct TestApp {
    router: Router,
    config: Arc<AppConfig>,
    repository: Arc<InMemoryVitalsRepository>,
}

impl TestApp {
    fn new() -> Self {
        let config = TestConfig::default().to_arc();
        let repository = Arc::new(InMemoryVitalsRepository::new(config.vitals_history_limit));
        let handlers = Arc::new(VitalsHandlers::with_repository(config.clone(), repository.clone()));

        Self {
            router: vitals_routes(handlers),
            config,
            repository,
        }
    }

    async fn send(&self, method: &str, uri: &str, user: Option<&TestUser>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, JwtTestUtils::bearer(user, &self.config));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

fn reading(heart_rate: f64, blood_pressure: &str) -> Value {
    json!({
        "heart_rate": heart_rate,
        "blood_pressure": blood_pressure,
        "blood_sugar": 90,
        "oxygen_level": 98,
        "temperature": 36.8
    })
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app.send("POST", "/assess", None, Some(reading(72.0, "120/80"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_assess_endpoint_classifies_without_storing() {
    let app = TestApp::new();
    let patient = TestUser::patient("patient@example.com");

    let (status, body) = app.send("POST", "/assess", Some(&patient), Some(reading(72.0, "120/80"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stable");

    let (_, body) = app.send("POST", "/assess", Some(&patient), Some(reading(105.0, "120/80"))).await;
    assert_eq!(body["status"], "needs_review");
    assert_eq!(body["findings"][0]["sign"], "heart_rate");

    let (_, body) = app.send("POST", "/assess", Some(&patient), Some(reading(95.0, "120/80"))).await;
    assert_eq!(body["status"], "improving");

    let (_, body) = app.send("POST", "/assess", Some(&patient), Some(Value::Null)).await;
    assert_eq!(body["status"], "unknown");

    let (_, body) = app.send("POST", "/assess", Some(&patient), Some(reading(72.0, "120 over 80"))).await;
    assert_eq!(body["status"], "invalid");
    assert!(body["error"].as_str().is_some());

    assert!(app.repository.latest(&patient.id).await.is_none());
}

#[tokio::test]
async fn test_patient_records_and_reads_own_vitals() {
    let app = TestApp::new();
    let patient = TestUser::patient("patient@example.com");

    let (_, body) = app.send("GET", &format!("/patients/{}/status", patient.id), Some(&patient), None).await;
    assert_eq!(body["status"], "unknown");

    let (status, body) = app
        .send("POST", &format!("/patients/{}/readings", patient.id), Some(&patient), Some(reading(72.0, "120/80")))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment"]["status"], "stable");
    assert!(body["alert"].is_null());

    app.send("POST", &format!("/patients/{}/readings", patient.id), Some(&patient), Some(reading(95.0, "120/80")))
        .await;

    let (_, body) = app.send("GET", &format!("/patients/{}/status", patient.id), Some(&patient), None).await;
    assert_eq!(body["status"], "improving");
    assert_eq!(body["label"], "Improving");

    let (status, body) = app
        .send("GET", &format!("/patients/{}/readings?limit=1", patient.id), Some(&patient), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["readings"][0]["reading"]["heart_rate"], 95.0);

    let (status, _) = app
        .send("GET", &format!("/patients/{}/readings?limit=0", patient.id), Some(&patient), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patient_cannot_touch_another_patient() {
    let app = TestApp::new();
    let patient = TestUser::patient("patient@example.com");
    let other = TestUser::patient("other@example.com");

    let (status, _) = app
        .send("POST", &format!("/patients/{}/readings", other.id), Some(&patient), Some(reading(72.0, "120/80")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("GET", &format!("/alerts?patient_id={}", other.id), Some(&patient), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_concerning_reading_raises_alert_for_doctor() {
    let app = TestApp::new();
    let patient = TestUser::patient("patient@example.com");
    let doctor = TestUser::doctor("doctor@example.com");

    let (_, body) = app
        .send("POST", &format!("/patients/{}/readings", patient.id), Some(&doctor), Some(reading(130.0, "150/95")))
        .await;
    assert_eq!(body["assessment"]["status"], "needs_review");
    let alert_id = body["alert"]["alert_id"].as_str().unwrap().to_string();

    // The patient sees their own alert, the doctor sees everyone's.
    let (_, body) = app.send("GET", "/alerts", Some(&patient), None).await;
    assert_eq!(body["total"], 1);
    let (_, body) = app.send("GET", "/alerts", Some(&doctor), None).await;
    assert_eq!(body["alerts"][0]["alert_id"], alert_id.as_str());

    let (status, _) = app.send("POST", &format!("/alerts/{}/acknowledge", alert_id), Some(&patient), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("POST", &format!("/alerts/{}/acknowledge", alert_id), Some(&doctor), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);
    assert_eq!(body["acknowledged_by"], doctor.id.as_str());

    let (status, _) = app.send("POST", &format!("/alerts/{}/acknowledge", alert_id), Some(&doctor), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.send("GET", "/alerts", Some(&doctor), None).await;
    assert_eq!(body["total"], 0);

    let (status, body) = app.send("DELETE", &format!("/patients/{}/alerts", patient.id), Some(&doctor), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], 1);
}

#[tokio::test]
async fn test_unknown_alert_is_not_found() {
    let app = TestApp::new();
    let admin = TestUser::admin("admin@example.com");

    let (status, _) = app
        .send("POST", "/alerts/00000000-0000-4000-8000-000000000000/acknowledge", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
