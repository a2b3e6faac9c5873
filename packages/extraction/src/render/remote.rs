//! Remote screenshot-service renderer.
//!
//! Delegates rendering to an HTTP screenshot API: the service loads the
//! URL in its own browser fleet and returns the captured image. This
//! keeps browser lifecycle management out of this process entirely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::credentials::ApiKey;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::Renderer;

#[derive(Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    full_page: bool,
    format: &'a str,
}

/// Renderer backed by a remote screenshot API.
pub struct RemoteRenderer {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl RemoteRenderer {
    /// Create a renderer for the given service endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<ApiKey>) -> ExtractResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ExtractError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create from `RENDER_API_URL` and `RENDER_API_KEY`.
    pub fn from_env() -> ExtractResult<Self> {
        let base_url = std::env::var("RENDER_API_URL")
            .map_err(|_| ExtractError::Unconfigured("RENDER_API_URL not set".to_string()))?;
        let api_key = std::env::var("RENDER_API_KEY")
            .map_err(|_| ExtractError::Unconfigured("RENDER_API_KEY not set".to_string()))?;
        Self::new(base_url, api_key)
    }
}

#[async_trait]
impl Renderer for RemoteRenderer {
    async fn render(&self, url: &str) -> ExtractResult<Vec<u8>> {
        debug!(url = %url, "remote render starting");
        let request = RenderRequest {
            url,
            full_page: true,
            format: "png",
        };

        let response = self
            .client
            .post(format!("{}/render", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "remote render request failed");
                ExtractError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Network(format!(
                "render service returned {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;
        debug!(url = %url, image_bytes = bytes.len(), "remote render complete");
        Ok(bytes.to_vec())
    }
}
