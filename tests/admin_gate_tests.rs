mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn admin_route_without_token_returns_401() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/api/v1/admin/messages/stats"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn garbage_token_returns_401() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/delete"))
        .bearer_auth("not.a.jwt")
        .json(&json!({ "ids": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn token_for_someone_else_returns_403() {
    let app = TestApp::spawn().await;
    let token = app.token_for("intruder@example.com");

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/delete"))
        .bearer_auth(token)
        .json(&json!({ "ids": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn admin_token_reaches_the_handler() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/delete"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "ids": ["not-a-uuid", "  "] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("No valid message identifiers"));
}

#[actix_rt::test]
async fn oversized_bulk_request_is_rejected() {
    let app = TestApp::spawn().await;
    let ids: Vec<String> = (0..501).map(|_| uuid::Uuid::new_v4().to_string()).collect();

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/status"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "ids": ids, "status": "read" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn malformed_message_id_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/api/v1/admin/messages/12345"))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn unknown_status_value_is_rejected_as_json_error() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/status"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "ids": [uuid::Uuid::new_v4()], "status": "archived" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn public_routes_need_no_token() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.client
        .get(app.url("/api/v1/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
}

#[actix_rt::test]
async fn percent_encoded_admin_path_is_still_gated() {
    let app = TestApp::spawn().await;

    for path in ["/api/v1/%61dmin/health", "/api/v1/%61dmin/messages/stats", "/api/v1/admi%6E/dashboard"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} was not gated", path);
        let body: Value = response.json().await.unwrap();
        assert!(body.get("host").is_none());
    }
}

#[actix_rt::test]
async fn health_report_needs_the_admin_token() {
    let app = TestApp::spawn().await;

    let anonymous = app.client.get(app.url("/api/v1/admin/health")).send().await.unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let wrong_subject = app.client
        .get(app.url("/api/v1/%61dmin/health"))
        .bearer_auth(app.token_for("intruder@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_subject.status(), StatusCode::FORBIDDEN);

    // the lazy pool never connects, so an authorised report is degraded
    let admin = app.client
        .get(app.url("/api/v1/admin/health"))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = admin.json().await.unwrap();
    assert_eq!(body["database"], "Unavailable");
}
