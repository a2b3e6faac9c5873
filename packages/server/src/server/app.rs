//! Application setup and server configuration.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use extraction::{Orchestrator, Renderer, UrlValidator};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::error::not_found;
use crate::server::routes::{extract_handler, health_handler};

/// Shared application state
///
/// Everything here is read-only after startup; the renderer is the one
/// shared resource that needs explicit cleanup on shutdown.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub validator: Arc<UrlValidator>,
    pub renderer: Arc<dyn Renderer>,
    pub max_raw_html_bytes: usize,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub fn test_state() -> AppState {
    use extraction::{FallbackStrategy, PipelineConfig, Strategy, StructuralStrategy};

    let config = PipelineConfig::default();
    let strategies: Vec<Arc<dyn Strategy>> = vec![
        Arc::new(StructuralStrategy::new(&config).unwrap()),
        Arc::new(FallbackStrategy::new()),
    ];

    AppState {
        orchestrator: Arc::new(Orchestrator::new(strategies, &config)),
        validator: Arc::new(UrlValidator::new()),
        renderer: Arc::new(extraction::DisabledRenderer),
        max_raw_html_bytes: config.max_raw_html_bytes,
    }
}
