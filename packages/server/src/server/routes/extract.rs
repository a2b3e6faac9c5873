//! The extraction endpoint.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use extraction::{sanitize, ExtractionOutcome, PageRecord, StrategyKind};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Wire request: `url` required, `raw_html` optional pre-fetched markup.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
    #[serde(default)]
    pub raw_html: Option<String>,
}

/// Wire response on success.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: ExtractData,
    pub metadata: ExtractMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractData {
    #[serde(flatten)]
    pub record: PageRecord,
    pub source_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractMetadata {
    pub extraction_method: StrategyKind,
    pub confidence: f64,
    /// Milliseconds spent in the pipeline.
    pub processing_time: u64,
    pub ai_used: bool,
    pub fields_extracted: u64,
    pub url: String,
    pub timestamp: String,
}

/// POST /api/extract
pub async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let started = Instant::now();
    let url = validate_request(&request, &state).await?;

    let outcome = state.orchestrator.run(&url, request.raw_html).await?;

    info!(
        url = %outcome.canonical_url,
        strategy = %outcome.strategy,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "extract request served"
    );
    Ok(Json(build_response(url, outcome, started)))
}

/// Enforce the wire contract before touching the pipeline.
///
/// Returns the sanitized URL handed to the orchestrator.
async fn validate_request(request: &ExtractRequest, state: &AppState) -> Result<String, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::Validation("url is required".to_string()));
    }

    let url = sanitize(&request.url);
    let parsed = url::Url::parse(&url)
        .map_err(|_| ApiError::Validation(format!("not a valid URL: {}", request.url)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Validation(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(ApiError::Validation("URL has no host".to_string()));
    }

    // SSRF deny-list, including resolved addresses.
    state
        .validator
        .validate_with_dns(&url)
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    if let Some(raw_html) = &request.raw_html {
        if raw_html.len() > state.max_raw_html_bytes {
            return Err(ApiError::Validation(format!(
                "raw_html exceeds {} bytes",
                state.max_raw_html_bytes
            )));
        }
    }

    Ok(url)
}

fn build_response(
    source_url: String,
    outcome: ExtractionOutcome,
    started: Instant,
) -> ExtractResponse {
    let fields_extracted = outcome.record.field_count() as u64;
    ExtractResponse {
        metadata: ExtractMetadata {
            extraction_method: outcome.strategy,
            confidence: outcome.confidence,
            processing_time: started.elapsed().as_millis() as u64,
            ai_used: outcome.strategy.is_ai(),
            fields_extracted,
            url: outcome.canonical_url.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        },
        data: ExtractData {
            record: outcome.record,
            source_url,
        },
        success: true,
    }
}
