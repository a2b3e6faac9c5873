use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    strategies: Vec<String>,
}

/// Health check endpoint
///
/// Reports the registered strategy chain; returns 200 OK whenever the
/// process is up.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let strategies = state
        .orchestrator
        .strategy_kinds()
        .into_iter()
        .map(|k| k.wire_name().to_string())
        .collect();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            strategies,
        }),
    )
}
