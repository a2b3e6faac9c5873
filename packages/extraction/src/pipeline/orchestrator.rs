//! Extraction orchestrator.
//!
//! Runs strategies in priority order against a single canonical URL,
//! applying the quality gate and confidence scorer, and returns the first
//! acceptable result. Strategy errors are absorbed and only the last one
//! surfaces, and only when nothing was accepted.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::canonical::canonicalize;
use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::{gate, score};
use crate::traits::Strategy;
use crate::types::{ExtractionInput, ExtractionOutcome, PipelineConfig, StrategyKind};

/// Priority-ordered strategy chain with a per-request deadline.
///
/// Strategies run strictly sequentially: their costs are asymmetric and
/// short-circuiting on the first acceptable result is the point of the
/// ordering. Holds no cross-request state.
pub struct Orchestrator {
    strategies: Vec<Arc<dyn Strategy>>,
    deadline: std::time::Duration,
}

impl Orchestrator {
    /// Build from a strategy set; sorted by ascending priority here so
    /// the run loop never has to think about order again.
    pub fn new(mut strategies: Vec<Arc<dyn Strategy>>, config: &PipelineConfig) -> Self {
        strategies.sort_by_key(|s| s.priority());
        Self {
            strategies,
            deadline: config.request_deadline,
        }
    }

    /// Registered strategy kinds in execution order.
    pub fn strategy_kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Run the pipeline once for a raw URL.
    pub async fn run(
        &self,
        raw_url: &str,
        raw_html: Option<String>,
    ) -> ExtractResult<ExtractionOutcome> {
        let canonical = canonicalize(raw_url)?;
        let mut input = ExtractionInput::new(canonical.clone());
        input.raw_html = raw_html;

        let started = Instant::now();
        let mut last_error: Option<ExtractError> = None;

        for strategy in &self.strategies {
            if !strategy.can_extract(&input) {
                debug!(url = %canonical, strategy = strategy.name(), "strategy unavailable, skipping");
                continue;
            }

            // Remaining-time check before each attempt; a slow strategy
            // must not run past the request deadline.
            let Some(remaining) = self.deadline.checked_sub(started.elapsed()) else {
                warn!(url = %canonical, "request deadline elapsed before pipeline finished");
                return Err(ExtractError::Timeout {
                    url: canonical.to_string(),
                });
            };

            debug!(
                url = %canonical,
                strategy = strategy.name(),
                remaining_ms = remaining.as_millis() as u64,
                "running strategy"
            );

            match tokio::time::timeout(remaining, strategy.extract(&input)).await {
                Err(_) => {
                    warn!(url = %canonical, strategy = strategy.name(), "request deadline elapsed mid-strategy");
                    return Err(ExtractError::Timeout {
                        url: canonical.to_string(),
                    });
                }
                Ok(Ok(record)) => {
                    if strategy.gated() && !gate::is_acceptable(&record) {
                        debug!(
                            url = %canonical,
                            strategy = strategy.name(),
                            title = record.title.as_deref().unwrap_or(""),
                            "record rejected by quality gate"
                        );
                        continue;
                    }

                    let confidence = score::score(&record, strategy.kind());
                    info!(
                        url = %canonical,
                        strategy = strategy.name(),
                        confidence,
                        fields = record.field_count(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "extraction accepted"
                    );
                    return Ok(ExtractionOutcome {
                        record,
                        strategy: strategy.kind(),
                        confidence,
                        canonical_url: canonical,
                    });
                }
                Ok(Err(e)) => {
                    warn!(url = %canonical, strategy = strategy.name(), error = %e, "strategy failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ExtractError::NoStrategyAvailable))
    }
}
