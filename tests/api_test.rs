use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

use snipbin::api::models::{SnippetCreatedResponse, SnippetResponse, SnippetSummary};
use snipbin::api::router;
use snipbin::api::state::AppState;
use snipbin::config::Config;
use snipbin::store::FjallSnippetStore;

/// Creates a minimal config for testing, bypassing file-based loading.
fn create_test_config() -> Config {
    let config_toml = r#"
[server]
bind_addr = "127.0.0.1:8080"
store_path = "unused-in-tests"

[server.api]
max_payload_bytes = "4KB"
default_latest_limit = 10
max_latest_limit = 20
    "#;

    toml::from_str(config_toml).expect("Failed to parse test config")
}

/// Builds a test app with an isolated fjall store.
fn build_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FjallSnippetStore::open(temp_dir.path().join("snippets"))
        .expect("Failed to open test store");

    let state = AppState::new(create_test_config(), store);
    (router(state), temp_dir)
}

fn post_snippet(payload: Value) -> Request<Body> {
    Request::builder()
        .uri("/api/snippets")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, payload: Value) -> String {
    let response = app.clone().oneshot(post_snippet(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: SnippetCreatedResponse =
        serde_json::from_value(response_json(response).await).unwrap();
    created.id
}

#[tokio::test]
async fn create_snippet_returns_fresh_id() {
    let (app, _temp) = build_test_app();

    let id = create(&app, json!({"content": "fn main() {}"})).await;
    assert!(!id.is_empty());
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

#[tokio::test]
async fn create_requires_json_content_type() {
    let (app, _temp) = build_test_app();

    let request = Request::builder()
        .uri("/api/snippets")
        .method("POST")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"content": "x"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (app, _temp) = build_test_app();

    let request = Request::builder()
        .uri("/api/snippets")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn create_rejects_negative_budgets() {
    let (app, _temp) = build_test_app();

    let response = app
        .clone()
        .oneshot(post_snippet(
            json!({"content": "x", "time_budget_seconds": -1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "INVALID_BUDGET");

    let response = app
        .oneshot(post_snippet(json!({"content": "x", "view_budget": -3})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "INVALID_BUDGET");
}

#[tokio::test]
async fn create_rejects_empty_content() {
    let (app, _temp) = build_test_app();

    let response = app.oneshot(post_snippet(json!({"content": ""}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["code"], "EMPTY_CONTENT");
}

#[tokio::test]
async fn create_rejects_oversized_payload() {
    let (app, _temp) = build_test_app();

    // Config caps the payload at 4KB.
    let response = app
        .oneshot(post_snippet(json!({"content": "x".repeat(8 * 1024)})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response_json(response).await["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn get_missing_snippet_is_404() {
    let (app, _temp) = build_test_app();

    let response = app.oneshot(get("/api/snippets/no-such-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unrestricted_snippet_reads_forever_without_budget_figures() {
    let (app, _temp) = build_test_app();
    let id = create(&app, json!({"content": "no strings attached"})).await;

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(get(&format!("/api/snippets/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["content"], "no strings attached");
        assert!(body.get("views_remaining").is_none());
        assert!(body.get("time_remaining_seconds").is_none());
    }
}

#[tokio::test]
async fn view_budget_exhausts_over_http() {
    let (app, _temp) = build_test_app();
    let id = create(&app, json!({"content": "twice only", "view_budget": 2})).await;

    for expected_remaining in [1, 0] {
        let response = app
            .clone()
            .oneshot(get(&format!("/api/snippets/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let snippet: SnippetResponse =
            serde_json::from_value(response_json(response).await).unwrap();
        assert_eq!(snippet.content, "twice only");
        assert_eq!(snippet.views_remaining, Some(expected_remaining));
    }

    let response = app
        .oneshot(get(&format!("/api/snippets/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn time_restricted_snippet_reports_time_remaining() {
    let (app, _temp) = build_test_app();
    let id = create(
        &app,
        json!({"content": "ticking", "time_budget_seconds": 600}),
    )
    .await;

    let response = app
        .oneshot(get(&format!("/api/snippets/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snippet: SnippetResponse = serde_json::from_value(response_json(response).await).unwrap();
    let remaining = snippet.time_remaining_seconds.unwrap();
    assert!(remaining <= 600 && remaining > 590, "got {remaining}");
    assert_eq!(snippet.views_remaining, None);
}

#[tokio::test]
async fn latest_orders_newest_first_and_excludes_restricted() {
    let (app, _temp) = build_test_app();

    let mut unrestricted_ids = Vec::new();
    for i in 0..15 {
        unrestricted_ids.push(create(&app, json!({"content": format!("open {i}")})).await);
        if i % 3 == 0 {
            create(
                &app,
                json!({"content": format!("hidden {i}"), "view_budget": 1}),
            )
            .await;
        }
    }

    let response = app.oneshot(get("/api/snippets/latest")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summaries: Vec<SnippetSummary> =
        serde_json::from_value(response_json(response).await).unwrap();
    assert_eq!(summaries.len(), 10);

    // The 10 most recently created unrestricted snippets, newest first.
    let expected: Vec<String> = unrestricted_ids.iter().rev().take(10).cloned().collect();
    let actual: Vec<String> = summaries.iter().map(|s| s.id.clone()).collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn latest_limit_is_honored_and_clamped() {
    let (app, _temp) = build_test_app();

    for i in 0..25 {
        create(&app, json!({"content": format!("snippet {i}")})).await;
    }

    let response = app
        .clone()
        .oneshot(get("/api/snippets/latest?limit=5"))
        .await
        .unwrap();
    let summaries: Vec<SnippetSummary> =
        serde_json::from_value(response_json(response).await).unwrap();
    assert_eq!(summaries.len(), 5);

    // Config caps the limit at 20.
    let response = app
        .oneshot(get("/api/snippets/latest?limit=9999"))
        .await
        .unwrap();
    let summaries: Vec<SnippetSummary> =
        serde_json::from_value(response_json(response).await).unwrap();
    assert_eq!(summaries.len(), 20);
}

#[tokio::test]
async fn health_reports_components_and_version() {
    let (app, _temp) = build_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["store"], "healthy");
    assert!(!body["version"].as_str().unwrap().is_empty());
}
