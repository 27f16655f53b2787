#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Best-effort append across candidate sheet names. Whatever the spreadsheet
//! does, the submitter always gets a 200.

mod common;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use common::appended_rows;
use common::configured;
use common::configured_with;
use common::mount_token;
use common::post_json;
use common::send;
use confession_protocol::messages;
use confession_relay::RelayConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path_regex;

fn missing_tab(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_json(json!({
        "error": {
            "code": 400,
            "message": format!("Unable to parse range: {name}!A:E"),
            "status": "INVALID_ARGUMENT"
        }
    }))
}

fn appended(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "spreadsheetId": common::SPREADSHEET_ID,
        "tableRange": format!("{name}!A1:E3"),
        "updates": {
            "updatedRange": format!("{name}!A4:E4"),
            "updatedRows": 1
        }
    }))
}

async fn mount_append(server: &MockServer, sheet: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path_regex(format!(r"/values/{sheet}%21A%3AE:append$")))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn every_candidate_missing_still_acknowledges() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    for sheet in ["result_cr", "Sheet1", "responses", "data"] {
        mount_append(&server, sheet, missing_tab(sheet), 1).await;
    }

    let (status, body) = send(configured(&server), post_json(r#"{"choice":"yes"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, messages::ACK_YES);
    assert_eq!(appended_rows(&server).await.len(), 4);
}

#[tokio::test]
async fn falls_through_to_the_first_existing_sheet() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_append(&server, "result_cr", missing_tab("result_cr"), 1).await;
    mount_append(&server, "Sheet1", appended("Sheet1"), 1).await;
    mount_append(&server, "responses", appended("responses"), 0).await;
    mount_append(&server, "data", appended("data"), 0).await;

    let request = Request::post("/submit-response")
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "Mozilla/5.0 (iPhone)")
        .body(Body::from(r#"{"choice":"no","feedback":"Cho em thêm thời gian"}"#))
        .unwrap();
    let (status, body) = send(configured(&server), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, messages::ACK_NO);

    let rows = appended_rows(&server).await;
    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert_eq!(
        row[1..],
        [
            "no".to_string(),
            "Cho em thêm thời gian".to_string(),
            "203.0.113.7".to_string(),
            "Mozilla/5.0 (iPhone)".to_string(),
        ]
    );
}

#[tokio::test]
async fn permission_error_stops_after_one_attempt() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    let forbidden = ResponseTemplate::new(403).set_body_json(json!({
        "error": {
            "code": 403,
            "message": "The caller does not have permission",
            "status": "PERMISSION_DENIED"
        }
    }));
    mount_append(&server, "result_cr", forbidden, 1).await;
    mount_append(&server, "Sheet1", appended("Sheet1"), 0).await;

    let (status, body) = send(configured(&server), post_json(r#"{"choice":"yes"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, messages::ACK_YES);
}

#[tokio::test]
async fn token_failure_is_not_the_submitters_problem() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("^/token$"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    let (status, body) = send(configured(&server), post_json(r#"{"choice":"no"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, messages::ACK_NO);
    assert!(appended_rows(&server).await.is_empty());
}

#[tokio::test]
async fn single_configured_sheet_is_the_only_target() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_append(&server, "answers", missing_tab("answers"), 1).await;
    mount_append(&server, "result_cr", appended("result_cr"), 0).await;

    let config = RelayConfig {
        sheet_names: vec!["answers".to_string()],
        ..RelayConfig::default()
    };
    let (status, _) = send(
        configured_with(&server, config),
        post_json(r#"{"choice":"yes"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
