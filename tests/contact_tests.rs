mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn invalid_submission_returns_400_with_field_errors() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.url("/api/v1/contact"))
        .json(&json!({ "name": "  ", "email": "not-an-email", "message": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"message"));
}

#[actix_rt::test]
async fn submissions_past_the_hourly_limit_get_429() {
    let app = TestApp::spawn_with(|config| config.contact.rate_limit_per_hour = 2).await;
    let body = json!({ "name": "", "email": "spam@example.com", "message": "" });

    for _ in 0..2 {
        let response = app.client
            .post(app.url("/api/v1/contact"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app.client
        .post(app.url("/api/v1/contact"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
