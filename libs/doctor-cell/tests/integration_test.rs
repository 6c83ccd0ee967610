use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use assert_matches::assert_matches;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::{AddDoctorRequest, DoctorError};
use doctor_cell::router::doctor_routes;
use doctor_cell::services::ledger::SlotLedgerService;
use doctor_cell::services::onboarding::DoctorOnboardingService;
use shared_database::store::StoreClient;
use shared_models::common::Address;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

// A 1x1 transparent PNG.
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn add_doctor_request() -> AddDoctorRequest {
    AddDoctorRequest {
        name: "Dr. New".to_string(),
        email: "new.doctor@example.com".to_string(),
        password: "long-enough-password".to_string(),
        speciality: "Dermatologist".to_string(),
        degree: "MBBS".to_string(),
        experience: "2 Years".to_string(),
        about: "Skin specialist".to_string(),
        fees: 60,
        address: Address::default(),
        image: format!("data:image/png;base64,{}", TINY_PNG_BASE64),
    }
}

#[tokio::test]
async fn public_listing_excludes_ledger_and_credentials() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::doctor_row(&doctor_id, "Dr. Test", 50, true, json!({}))
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let app = doctor_routes(Arc::new(config));

    let request = Request::builder()
        .method("GET")
        .uri("/list")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], true);
    let doctor = &body["doctors"][0];
    assert_eq!(doctor["available"], true);
    assert!(doctor.get("password_hash").is_none());
    assert!(doctor.get("slots_booked").is_none());
}

#[tokio::test]
async fn add_doctor_uploads_image_and_inserts_document() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/doctors/.*\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::doctor_row(&doctor_id, "Dr. New", 60, true, json!({}))
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let onboarding = DoctorOnboardingService::new(&config);

    let snapshot = onboarding.add_doctor(add_doctor_request()).await.unwrap();
    assert_eq!(snapshot.name, "Dr. New");
}

#[tokio::test]
async fn add_doctor_rejects_blank_required_field() {
    let config = TestConfig::default().to_app_config();
    let onboarding = DoctorOnboardingService::new(&config);

    let mut request = add_doctor_request();
    request.speciality = "   ".to_string();

    let result = onboarding.add_doctor(request).await;
    assert_matches!(result, Err(DoctorError::MissingDetails));
}

#[tokio::test]
async fn add_doctor_duplicate_email_is_a_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/doctors/.*\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let onboarding = DoctorOnboardingService::new(&config);

    let result = onboarding.add_doctor(add_doctor_request()).await;
    assert_matches!(result, Err(DoctorError::EmailTaken));
}

#[tokio::test]
async fn reserve_checks_availability_before_the_rpc() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "available": false }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/rpc/reserve_slot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let ledger = SlotLedgerService::new(Arc::new(StoreClient::new(&config)));

    let result = ledger.reserve(doctor_id, "2024-01-10", "10:00").await;
    assert_matches!(
        result,
        Err(doctor_cell::models::LedgerError::DoctorUnavailable)
    );
}
