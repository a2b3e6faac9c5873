//! Fallback extraction strategy.
//!
//! Derives a minimal record from the canonical URL alone so the pipeline
//! always has something to return. Exempt from the quality gate: its
//! synthesized title may be shorter than the gate's minimum and it is the
//! last line of defense.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::strategies::FALLBACK_PRIORITY;
use crate::traits::Strategy;
use crate::types::{ExtractionInput, PageRecord, StrategyKind};

/// Priority-3 extractor of last resort. Always succeeds.
#[derive(Debug, Default)]
pub struct FallbackStrategy;

impl FallbackStrategy {
    /// Create the fallback strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Strategy for FallbackStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fallback
    }

    fn priority(&self) -> u8 {
        FALLBACK_PRIORITY
    }

    fn can_extract(&self, _input: &ExtractionInput) -> bool {
        true
    }

    fn gated(&self) -> bool {
        false
    }

    async fn extract(&self, input: &ExtractionInput) -> ExtractResult<PageRecord> {
        let host = input
            .url
            .host()
            .ok_or_else(|| ExtractError::InvalidUrl(input.url.to_string()))?;

        debug!(url = %input.url, "fallback extraction");
        Ok(PageRecord::new()
            .with_title(format!("Page from {host}"))
            .with_site_name(host)
            .with_content_type("webpage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonicalize;

    #[tokio::test]
    async fn test_record_derived_from_host() {
        let input = ExtractionInput::new(canonicalize("https://www.shop.io/item/42").unwrap());
        let record = FallbackStrategy::new().extract(&input).await.unwrap();

        assert_eq!(record.title.as_deref(), Some("Page from shop.io"));
        assert_eq!(record.site_name.as_deref(), Some("shop.io"));
        assert_eq!(record.content_type.as_deref(), Some("webpage"));
        assert_eq!(record.field_count(), 3);
    }

    #[test]
    fn test_always_runs_and_skips_gate() {
        let strategy = FallbackStrategy::new();
        let input = ExtractionInput::new(canonicalize("https://a.co/x").unwrap());
        assert!(strategy.can_extract(&input));
        assert!(!strategy.gated());
    }
}
