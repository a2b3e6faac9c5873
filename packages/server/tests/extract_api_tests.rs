//! Wire-contract tests for the extraction endpoint.
//!
//! Drives the full router, so status codes, envelope shapes, and the 404
//! fallback are exercised exactly as a client would see them.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use extraction::{
    FallbackStrategy, Orchestrator, PipelineConfig, Strategy, StructuralStrategy, UrlValidator,
};
use serde_json::{json, Value};
use server_core::server::{build_app, AppState};
use tower::ServiceExt;

fn app() -> Router {
    let config = PipelineConfig::default();
    let strategies: Vec<Arc<dyn Strategy>> = vec![
        Arc::new(StructuralStrategy::new(&config).expect("client builds")),
        Arc::new(FallbackStrategy::new()),
    ];

    build_app(AppState {
        orchestrator: Arc::new(Orchestrator::new(strategies, &config)),
        validator: Arc::new(UrlValidator::new()),
        renderer: Arc::new(extraction::DisabledRenderer),
        max_raw_html_bytes: config.max_raw_html_bytes,
    })
}

async fn post_extract(body: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/extract")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn extract_with_raw_html_returns_success_envelope() {
    let (status, body) = post_extract(json!({
        "url": "93.184.216.34/item/42",
        "raw_html": r#"<html><head>
            <meta property="og:title" content="Aurora Wireless Headphones - Midnight Blue"/>
            <meta property="og:description" content="Noise cancelling, now $129.99."/>
            </head></html>"#,
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["title"],
        "Aurora Wireless Headphones - Midnight Blue"
    );
    assert_eq!(body["data"]["sourceUrl"], "https://93.184.216.34/item/42");
    assert_eq!(body["data"]["price"], "129.99");
    assert_eq!(body["data"]["currency"], "USD");
    assert_eq!(body["metadata"]["extractionMethod"], "http_extraction");
    assert_eq!(body["metadata"]["aiUsed"], false);
    assert_eq!(body["metadata"]["url"], "https://93.184.216.34/item/42");
    assert!(body["metadata"]["confidence"].as_f64().unwrap() > 0.8);
    assert!(body["metadata"]["fieldsExtracted"].as_u64().unwrap() >= 2);
}

#[tokio::test]
async fn missing_url_is_a_400() {
    let (status, body) = post_extract(json!({ "url": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].as_str().unwrap().contains("url"));
}

#[tokio::test]
async fn blocked_host_is_a_400() {
    let (status, body) = post_extract(json!({ "url": "http://169.254.169.254/latest" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn unknown_route_is_a_404_with_error_body() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["statusCode"], 404);
}

#[tokio::test]
async fn health_reports_strategy_chain() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["strategies"][0], "http_extraction");
    assert_eq!(body["strategies"][1], "fallback");
}
