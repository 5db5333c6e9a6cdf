//! API Integration Tests
//!
//! Drive the router in-process with a static extraction engine.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use openie_api::{create_router, AppState};
use openie_core::{config::AppConfig, Extraction, ExtractionEngine};
use openie_extractor::{PatternEngine, StaticEngine};
use serde_json::Value;
use tower::ServiceExt;

fn obama() -> Extraction {
    Extraction::new("Obama", "gave", vec!["a speech".to_string()]).with_confidence(0.8)
}

fn app_with(engine: StaticEngine) -> Router {
    create_router(Arc::new(AppState::new(AppConfig::default(), Arc::new(engine))))
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Echoes the decoded input back as the subject
struct EchoEngine;

#[async_trait]
impl ExtractionEngine for EchoEngine {
    async fn extract(&self, text: &str) -> openie_core::Result<Vec<Extraction>> {
        Ok(vec![Extraction::new(text, "echo", vec![])])
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Takes longer than any test timeout
struct SlowEngine;

#[async_trait]
impl ExtractionEngine for SlowEngine {
    async fn extract(&self, _text: &str) -> openie_core::Result<Vec<Extraction>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![])
    }

    fn name(&self) -> &str {
        "slow"
    }
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

// =============================================================================
// GET extraction
// =============================================================================

#[tokio::test]
async fn test_get_extracts_relations() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app
        .oneshot(request("GET", "/?text=Obama%20gave%20a%20speech"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json; charset=utf-8"
    );

    let body = body_bytes(response).await;
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"[{"confidence":0.8,"context":"","negated":0,"passive":0,"string":"(Obama; gave; a speech)","rel":"gave","arg1":"Obama","arg2s":["a speech"]}]"#
    );
}

#[tokio::test]
async fn test_get_with_no_extractions_returns_empty_array() {
    let app = app_with(StaticEngine::empty());

    let response = app.oneshot(request("GET", "/?text=Hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"[]");
}

#[tokio::test]
async fn test_path_is_ignored() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app
        .oneshot(request("GET", "/some/other/path?text=x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json[0]["rel"], "gave");
}

#[tokio::test]
async fn test_only_first_text_value_is_used() {
    let app = create_router(Arc::new(AppState::new(
        AppConfig::default(),
        Arc::new(PatternEngine::new().unwrap()),
    )));

    let response = app
        .oneshot(request(
            "GET",
            "/?text=The+dog+bit+the+man.&text=Obama+gave+a+speech.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let extractions = json.as_array().unwrap();
    assert_eq!(extractions.len(), 1);
    assert_eq!(extractions[0]["arg1"], "The dog");
    assert_eq!(extractions[0]["rel"], "bit");
    assert_eq!(extractions[0]["arg2s"][0], "the man");
}

#[tokio::test]
async fn test_fields_are_escaped() {
    let tricky = Extraction::new(r#"He said "hi""#, "was", vec!["back\\slash".to_string()]);
    let app = app_with(StaticEngine::new(vec![tricky]));

    let response = app.oneshot(request("GET", "/?text=x")).await.unwrap();

    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json[0]["arg1"], r#"He said "hi""#);
    assert_eq!(json[0]["arg2s"][0], "back\\slash");
}

#[tokio::test]
async fn test_bare_text_parameter_is_empty_input() {
    let app = app_with(StaticEngine::empty());

    let response = app.oneshot(request("GET", "/?text")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"[]");
}

// =============================================================================
// GET errors
// =============================================================================

#[tokio::test]
async fn test_missing_text_parameter() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app.oneshot(request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["code"], "MISSING_PARAMETER");
}

#[tokio::test]
async fn test_other_parameters_without_text() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app.oneshot(request("GET", "/?q=Obama")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_escape_is_400() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app.oneshot(request("GET", "/?text=%zz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_utf8_text_is_decoded_lossily() {
    let app = create_router(Arc::new(AppState::new(
        AppConfig::default(),
        Arc::new(EchoEngine),
    )));

    // Well-formed escapes, but not UTF-8
    let response = app
        .oneshot(request("GET", "/?text=caf%C3%A9%E0%A4"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json[0]["arg1"], "café\u{FFFD}");
}

#[tokio::test]
async fn test_slow_extraction_times_out() {
    let mut config = AppConfig::default();
    config.server.request_timeout_secs = 1;
    let app = create_router(Arc::new(AppState::new(config, Arc::new(SlowEngine))));

    let response = app.oneshot(request("GET", "/?text=x")).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_engine_failure_is_500() {
    let app = app_with(StaticEngine::failing("model not loaded"));

    let response = app.oneshot(request("GET", "/?text=x")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["code"], "EXTRACTION_ERROR");
    assert_eq!(json["details"], "model not loaded");
}

// =============================================================================
// OPTIONS and other methods
// =============================================================================

#[tokio::test]
async fn test_options_lists_allowed_methods() {
    let app = app_with(StaticEngine::new(vec![obama()]));

    let response = app.oneshot(request("OPTIONS", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ALLOW], "GET,OPTIONS");
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_method_names_are_case_insensitive() {
    let app = app_with(StaticEngine::new(vec![obama()]));
    let response = app
        .oneshot(request("get", "/?text=Obama"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json[0]["rel"], "gave");

    let app = app_with(StaticEngine::new(vec![obama()]));
    let response = app.oneshot(request("options", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ALLOW], "GET,OPTIONS");

    let app = app_with(StaticEngine::new(vec![obama()]));
    let response = app.oneshot(request("post", "/?text=Obama")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unsupported_methods_are_405() {
    for method in ["POST", "PUT", "DELETE", "PATCH", "HEAD"] {
        let app = app_with(StaticEngine::new(vec![obama()]));

        let response = app
            .oneshot(request(method, "/?text=Obama"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(response.headers()[header::ALLOW], "GET,OPTIONS");
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_requests_are_counted() {
    let state = Arc::new(AppState::new(
        AppConfig::default(),
        Arc::new(StaticEngine::empty()),
    ));

    for method in ["GET", "OPTIONS", "POST"] {
        let response = create_router(state.clone())
            .oneshot(request(method, "/?text=x"))
            .await
            .unwrap();
        assert!(response.status().as_u16() < 500);
    }

    assert_eq!(state.get_request_count(), 3);
}
