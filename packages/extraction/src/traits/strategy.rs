//! Strategy trait for pluggable extraction methods.
//!
//! The pipeline dispatches over a closed set of strategies through this
//! uniform interface. Priority ordering and short-circuit semantics live
//! in the orchestrator; strategies only know how to extract.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::{ExtractionInput, PageRecord, StrategyKind};

/// One pluggable method of extracting structured data from a URL.
///
/// Implementations:
/// - `StructuralStrategy` - static markup parse (cheap, fast, weak on
///   JavaScript-rendered pages)
/// - `AssistedStrategy` - render-and-describe through a vision model
///   (expensive, strongest on rendered pages)
/// - `FallbackStrategy` - stub record from the URL alone (never fails)
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Which variant this is, for tagging and scoring.
    fn kind(&self) -> StrategyKind;

    /// Execution order; lower runs first.
    fn priority(&self) -> u8;

    /// Whether this strategy can run against the given input.
    ///
    /// A `false` here means "skip me" (e.g. a required credential is
    /// missing), not an error, and the strategy is not retried.
    fn can_extract(&self, input: &ExtractionInput) -> bool;

    /// Attempt extraction.
    async fn extract(&self, input: &ExtractionInput) -> ExtractResult<PageRecord>;

    /// Whether the quality gate applies to this strategy's output.
    ///
    /// The fallback strategy opts out: its synthesized title may be
    /// shorter than the gate's minimum and it must always terminate the
    /// pipeline.
    fn gated(&self) -> bool {
        true
    }

    /// Name for logging.
    fn name(&self) -> &'static str {
        self.kind().wire_name()
    }
}
