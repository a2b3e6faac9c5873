//! AI-assisted extraction strategy.
//!
//! Renders the page to a full-page image, asks the vision model to
//! describe it as a strict JSON object, and parses that JSON into a
//! record. Most reliable path for JavaScript-rendered pages and the most
//! expensive, which is why it runs after the structural strategy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::strategies::ASSISTED_PRIORITY;
use crate::traits::{Describer, Renderer, Strategy};
use crate::types::{ExtractionInput, PageRecord, PipelineConfig, StrategyKind};

/// Fixed prompt sent with every page image.
///
/// The model must answer with a bare JSON object; fence-wrapped output is
/// tolerated and stripped before parsing.
const DESCRIBE_PROMPT: &str = r#"You are looking at a screenshot of a web page. Extract its metadata and respond with ONLY a JSON object, no prose, using exactly these keys (use null for anything not visible):
{
  "title": "main product or page title",
  "imageUrl": null,
  "imageUrls": [],
  "price": "numeric string without currency symbol or thousands separators",
  "currency": "ISO 4217 code",
  "originalPrice": null,
  "discount": null,
  "siteName": "site or store name",
  "description": "one or two sentence description",
  "category": null,
  "brand": null,
  "rating": null,
  "reviewCount": null,
  "availability": null,
  "features": [],
  "offers": [],
  "contentType": "product, article or webpage"
}
Be factual. Only report what is visible in the screenshot."#;

/// Priority-2 extractor through the render and describe capabilities.
pub struct AssistedStrategy {
    renderer: Arc<dyn Renderer>,
    describer: Arc<dyn Describer>,
    render_timeout: Duration,
    inference_timeout: Duration,
}

impl AssistedStrategy {
    /// Build over the shared capabilities.
    pub fn new(
        renderer: Arc<dyn Renderer>,
        describer: Arc<dyn Describer>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            renderer,
            describer,
            render_timeout: config.render_timeout,
            inference_timeout: config.inference_timeout,
        }
    }

    /// The prompt template sent to the describer.
    pub fn prompt() -> &'static str {
        DESCRIBE_PROMPT
    }
}

#[async_trait]
impl Strategy for AssistedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Assisted
    }

    fn priority(&self) -> u8 {
        ASSISTED_PRIORITY
    }

    /// Skipped (not retried) when either capability is unusable.
    fn can_extract(&self, _input: &ExtractionInput) -> bool {
        self.describer.is_configured() && self.renderer.is_available()
    }

    async fn extract(&self, input: &ExtractionInput) -> ExtractResult<PageRecord> {
        let url = input.url.as_str();

        debug!(url = %url, "assisted extraction: rendering");
        let image = tokio::time::timeout(self.render_timeout, self.renderer.render(url))
            .await
            .map_err(|_| ExtractError::Network(format!("render timed out for {url}")))??;
        if image.is_empty() {
            return Err(ExtractError::Network(format!("empty render for {url}")));
        }

        debug!(url = %url, image_bytes = image.len(), "assisted extraction: describing");
        let text = tokio::time::timeout(
            self.inference_timeout,
            self.describer.describe(&image, DESCRIBE_PROMPT),
        )
        .await
        .map_err(|_| ExtractError::Network(format!("describe timed out for {url}")))??;

        let record = parse_description(&text).map_err(|e| {
            warn!(url = %url, error = %e, "assisted extraction returned unparseable JSON");
            e
        })?;
        debug!(url = %url, fields = record.field_count(), "assisted extraction parsed");
        Ok(record)
    }
}

/// Parse the model's reply, tolerating markdown code fences.
pub fn parse_description(text: &str) -> ExtractResult<PageRecord> {
    let stripped = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(stripped).map_err(|e| ExtractError::Parse(e.to_string()))
}
