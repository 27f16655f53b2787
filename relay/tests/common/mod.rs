#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use confession_relay::AppState;
use confession_relay::RelayConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use serde_json::json;
use tower::ServiceExt;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

pub const SPREADSHEET_ID: &str = "sheet-123";
const TEST_KEY_PEM: &str = include_str!("../fixtures/service_account_key.pem");

/// Relay with no spreadsheet settings at all.
pub fn unconfigured() -> Router {
    confession_relay::router(AppState::new(RelayConfig::default()))
}

/// Relay whose spreadsheet and token endpoint both point at `server`.
pub fn configured(server: &MockServer) -> Router {
    configured_with(server, RelayConfig::default())
}

pub fn configured_with(server: &MockServer, base: RelayConfig) -> Router {
    let credentials = json!({
        "type": "service_account",
        "client_email": "relay@test-project.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
        "token_uri": format!("{}/token", server.uri()),
    });
    let config = RelayConfig {
        credentials_json: Some(credentials.to_string()),
        spreadsheet_id: Some(SPREADSHEET_ID.to_string()),
        sheets_api_base: server.uri(),
        ..base
    };
    let state = AppState::new(config);
    assert!(state.integration.is_ready(), "{:?}", state.integration);
    confession_relay::router(state)
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3599,
            "token_type": "Bearer",
        })))
        .mount(server)
        .await;
}

pub fn post_json(body: &str) -> Request<Body> {
    Request::post("/submit-response")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// Rows the mock spreadsheet received, in request order.
pub async fn appended_rows(server: &MockServer) -> Vec<Vec<String>> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path().ends_with(":append"))
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            serde_json::from_value::<Vec<Vec<String>>>(body["values"].clone())
                .unwrap()
                .remove(0)
        })
        .collect()
}
