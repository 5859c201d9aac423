// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/classify_api_tests.rs - Router-level tests for POST /classify

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use keebsmith_node::api::{build_router, AppState};
use keebsmith_node::llm::{JsonExtractor, TogetherClient};
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "keebsmith-test-boundary";

/// State without a loaded classifier, pointing the LLM client at a
/// closed local port
fn test_state() -> AppState {
    AppState {
        classifier: None,
        llm: Arc::new(TogetherClient::new("http://127.0.0.1:59999", "test-key").unwrap()),
        extractor: JsonExtractor::new(),
    }
}

/// Build a multipart body with a single field
fn multipart_body(field_name: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/classify")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_classify_missing_file_field_is_400() {
    let app = build_router(test_state());

    // A multipart body whose only field is not named "file"
    let body = multipart_body("attachment", "img.png", b"irrelevant");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn test_classify_empty_multipart_is_400() {
    let app = build_router(test_state());

    let body = format!("--{}--\r\n", BOUNDARY).into_bytes();
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn test_classify_without_model_is_503() {
    let app = build_router(test_state());

    // The file field is present, so the missing-model path is reached
    let body = multipart_body("file", "img.png", b"not-an-image");
    let response = app.oneshot(multipart_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("not loaded"));
}

#[tokio::test]
async fn test_classify_wrong_content_type_is_client_error() {
    let app = build_router(test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_health_reports_classifier_state() {
    let app = build_router(test_state());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["classifierLoaded"], false);
}
