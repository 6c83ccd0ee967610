use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use profile_cell::router::profile_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, TestUser};

// A 1x1 transparent PNG.
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn create_test_app(config: AppConfig) -> Router {
    profile_routes(Arc::new(config))
}

async fn send(
    app: Router,
    method_str: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method_str)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json");

    let request = match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json_body)
}

#[tokio::test]
async fn get_profile_returns_document_without_credentials() {
    let mock_server = MockServer::start().await;
    let user = TestUser::user("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": user.id,
            "name": "Test User",
            "email": user.email,
            "image": "",
            "phone": "555-0100",
            "address": { "line1": "1 Main St", "line2": "" },
            "gender": "",
            "dob": ""
        }])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let token = user.token(&config.jwt_secret);
    let app = create_test_app(config);

    let (status, body) = send(app, "GET", "/profile", &token, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user_data"]["phone"], "555-0100");
    assert!(body["user_data"].get("password_hash").is_none());
}

#[tokio::test]
async fn get_profile_unknown_user_is_not_found() {
    let mock_server = MockServer::start().await;
    let user = TestUser::user("patient@example.com");

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let token = user.token(&config.jwt_secret);
    let app = create_test_app(config);

    let (status, body) = send(app, "GET", "/profile", &token, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn update_profile_requires_name() {
    let config = TestConfig::default().to_app_config();
    let user = TestUser::user("patient@example.com");
    let token = user.token(&config.jwt_secret);
    let app = create_test_app(config);

    let (status, body) = send(
        app,
        "POST",
        "/update-profile",
        &token,
        Some(json!({ "name": "  ", "phone": "555-0100" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name is required");
}

#[tokio::test]
async fn update_profile_writes_fields_in_one_patch() {
    let mock_server = MockServer::start().await;
    let user = TestUser::user("patient@example.com");

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": user.id,
            "name": "Renamed User",
            "email": user.email,
            "image": "",
            "phone": "555-0199",
            "address": { "line1": "2 Side St", "line2": "" },
            "gender": "",
            "dob": "1990-01-01"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let token = user.token(&config.jwt_secret);
    let app = create_test_app(config);

    let (status, body) = send(
        app,
        "POST",
        "/update-profile",
        &token,
        Some(json!({
            "name": "Renamed User",
            "phone": "555-0199",
            "dob": "1990-01-01",
            "address": { "line1": "2 Side St", "line2": "" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated");
    assert_eq!(body["user_data"]["name"], "Renamed User");
}

#[tokio::test]
async fn update_profile_uploads_avatar_before_patching() {
    let mock_server = MockServer::start().await;
    let user = TestUser::user("patient@example.com");

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/images/avatars/.*\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": user.id,
            "name": "Test User",
            "email": user.email,
            "image": format!("{}/storage/v1/object/public/images/avatars/a.png", mock_server.uri()),
            "phone": "",
            "address": { "line1": "", "line2": "" },
            "gender": "",
            "dob": ""
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let token = user.token(&config.jwt_secret);
    let app = create_test_app(config);

    let (status, body) = send(
        app,
        "POST",
        "/update-profile",
        &token,
        Some(json!({
            "name": "Test User",
            "image": format!("data:image/png;base64,{}", TINY_PNG_BASE64)
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["user_data"]["image"]
        .as_str()
        .unwrap()
        .contains("/storage/v1/object/public/images/avatars/"));
}
