//! Preview client with bounded retries.
//!
//! Issues the extraction request from the calling application. Validation
//! happens once, before any network traffic; transport failures are
//! retried with linear backoff and a per-attempt timeout that aborts hung
//! requests without aborting the whole operation.

use std::time::Duration;

use async_trait::async_trait;
use extraction::{sanitize, PageRecord};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AppError, AppResult};

const MAX_ATTEMPTS: u32 = 3;

/// Successful response from the extraction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub data: PreviewData,
    pub metadata: PreviewMetadata,
}

/// Extracted record plus the URL it was extracted from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    #[serde(flatten)]
    pub record: PageRecord,
    pub source_url: String,
}

/// Extraction metadata echoed by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetadata {
    pub extraction_method: String,
    pub confidence: f64,
    pub processing_time: u64,
    pub ai_used: bool,
    pub fields_extracted: u64,
    pub url: String,
    pub timestamp: String,
}

/// Error body returned by the extraction endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    message: String,
    status_code: u16,
}

/// One round-trip to the extraction endpoint.
///
/// Split out as a trait so the retry loop can be exercised against a
/// scripted transport in tests.
#[async_trait]
pub trait PreviewTransport: Send + Sync {
    /// Request a preview for an already-validated URL.
    async fn request_preview(&self, url: &str) -> AppResult<PreviewResponse>;
}

/// HTTP transport against the extraction service.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Transport for the given extract endpoint (e.g.
    /// `https://api.example.com/api/extract`).
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PreviewTransport for HttpTransport {
    async fn request_preview(&self, url: &str) -> AppResult<PreviewResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .map_err(|e| AppError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| AppError::Network {
                message: format!("malformed preview response: {e}"),
            });
        }

        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            message: format!("HTTP {status}"),
            status_code: status.as_u16(),
        });

        // The server's validation verdict is final; retrying it is noise.
        Err(match body.status_code {
            400 => AppError::Validation(body.message),
            408 => AppError::Timeout,
            _ => AppError::Network {
                message: body.message,
            },
        })
    }
}

/// Fetches previews with bounded retries and linear backoff.
pub struct PreviewClient<T> {
    transport: T,
    max_attempts: u32,
    base_delay: Duration,
    attempt_timeout: Duration,
}

impl<T: PreviewTransport> PreviewClient<T> {
    /// Client with default retry policy (3 attempts, 1s base delay,
    /// 30s per-attempt timeout).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_attempts: MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(30),
        }
    }

    /// Set the base backoff delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Fetch a preview for a user-supplied URL.
    ///
    /// Validates first (non-retryable on malformed input), then performs
    /// up to three attempts, waiting `base_delay * attempt` between them.
    /// A hung attempt is cut off by the per-attempt timeout and counts as
    /// an ordinary failure. When every attempt fails the final error is a
    /// retryable [`AppError::Network`] carrying the last failure message.
    pub async fn fetch_preview(&self, raw_url: &str) -> AppResult<PreviewResponse> {
        let url = validate_url(raw_url)?;

        let mut last_error: Option<AppError> = None;
        for attempt in 1..=self.max_attempts {
            debug!(url = %url, attempt, "preview attempt");
            match tokio::time::timeout(self.attempt_timeout, self.transport.request_preview(&url))
                .await
            {
                Ok(Ok(preview)) => return Ok(preview),
                Ok(Err(e)) if !e.is_retryable() => return Err(e),
                Ok(Err(e)) => {
                    warn!(url = %url, attempt, error = %e, "preview attempt failed");
                    last_error = Some(e);
                }
                Err(_) => {
                    warn!(url = %url, attempt, "preview attempt timed out");
                    last_error = Some(AppError::Timeout);
                }
            }

            if attempt < self.max_attempts {
                let delay = self.base_delay * attempt;
                debug!(url = %url, delay_ms = delay.as_millis() as u64, "backing off");
                tokio::time::sleep(delay).await;
            }
        }

        let last = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Err(AppError::Network {
            message: format!(
                "preview failed after {} attempts, last error: {last}",
                self.max_attempts
            ),
        })
    }
}

/// Sanitize and validate a user-supplied URL.
///
/// Returns the sanitized form to send to the server. Malformed input is
/// a non-retryable validation failure.
pub fn validate_url(raw: &str) -> AppResult<String> {
    if raw.trim().is_empty() {
        return Err(AppError::Validation("link is empty".to_string()));
    }
    let sanitized = sanitize(raw);
    let parsed =
        Url::parse(&sanitized).map_err(|_| AppError::Validation(format!("not a link: {raw}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(AppError::Validation("link has no host".to_string()));
    }
    Ok(sanitized)
}
