//! Pipeline input and outcome types.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalUrl;
use crate::types::record::PageRecord;

/// Which strategy produced a result.
///
/// Serialized with the wire names the client contract expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Static markup parse over plain HTTP.
    #[serde(rename = "http_extraction")]
    Structural,

    /// Render-and-describe through the vision model.
    #[serde(rename = "fast_ai")]
    Assisted,

    /// Stub record derived from the URL alone.
    #[serde(rename = "fallback")]
    Fallback,
}

impl StrategyKind {
    /// Wire name used in response metadata.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Structural => "http_extraction",
            Self::Assisted => "fast_ai",
            Self::Fallback => "fallback",
        }
    }

    /// Whether this strategy consulted the AI path.
    pub fn is_ai(&self) -> bool {
        matches!(self, Self::Assisted)
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// What one pipeline run operates on.
#[derive(Debug, Clone)]
pub struct ExtractionInput {
    /// Canonicalized extraction target.
    pub url: CanonicalUrl,

    /// Caller-supplied markup. When present the structural strategy
    /// parses it instead of fetching; other strategies ignore it.
    pub raw_html: Option<String>,
}

impl ExtractionInput {
    /// Input with no caller-supplied markup.
    pub fn new(url: CanonicalUrl) -> Self {
        Self {
            url,
            raw_html: None,
        }
    }

    /// Attach caller-supplied markup.
    pub fn with_raw_html(mut self, raw_html: impl Into<String>) -> Self {
        self.raw_html = Some(raw_html.into());
        self
    }
}

/// The accepted result of one pipeline run.
///
/// Created once per successful run, immutable thereafter, and handed by
/// value to the caller. No cross-request state is retained.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// Extracted metadata.
    pub record: PageRecord,

    /// Strategy that produced the record.
    pub strategy: StrategyKind,

    /// Trustworthiness estimate in [0, 1].
    pub confidence: f64,

    /// Canonical URL the record was computed for.
    pub canonical_url: CanonicalUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(StrategyKind::Structural.wire_name(), "http_extraction");
        assert_eq!(StrategyKind::Assisted.wire_name(), "fast_ai");
        assert_eq!(StrategyKind::Fallback.wire_name(), "fallback");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&StrategyKind::Assisted).unwrap();
        assert_eq!(json, "\"fast_ai\"");
    }

    #[test]
    fn test_only_assisted_is_ai() {
        assert!(StrategyKind::Assisted.is_ai());
        assert!(!StrategyKind::Structural.is_ai());
        assert!(!StrategyKind::Fallback.is_ai());
    }
}
