//! Page Metadata Extraction Pipeline
//!
//! Extracts structured product/content metadata (title, image, price,
//! brand, etc.) from an arbitrary web URL using a prioritized chain of
//! strategies with different cost/accuracy trade-offs:
//!
//! 1. **Structural** - parse static markup over plain HTTP (cheap)
//! 2. **AI-assisted** - render the page, describe the screenshot with a
//!    vision model (expensive, strongest on JS-rendered pages)
//! 3. **Fallback** - stub record derived from the URL alone (never fails)
//!
//! Strategies run strictly in priority order and the pipeline stops at
//! the first result the quality gate accepts. Accepted results carry a
//! confidence score combining strategy identity with field completeness.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use extraction::{
//!     AssistedStrategy, FallbackStrategy, Orchestrator, PipelineConfig,
//!     StructuralStrategy,
//! };
//!
//! let config = PipelineConfig::default();
//! let orchestrator = Orchestrator::new(
//!     vec![
//!         Arc::new(StructuralStrategy::new(&config)?),
//!         Arc::new(AssistedStrategy::new(renderer, describer, &config)),
//!         Arc::new(FallbackStrategy::new()),
//!     ],
//!     &config,
//! );
//!
//! let outcome = orchestrator.run("https://www.shop.io/item?utm_source=x", None).await?;
//! println!("{} ({:.2})", outcome.strategy, outcome.confidence);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - URL canonicalization and the dedup key type
//! - [`security`] - SSRF protection for caller-supplied URLs
//! - [`traits`] - Strategy, Renderer, and Describer abstractions
//! - [`strategies`] - the three built-in strategies
//! - [`pipeline`] - quality gate, confidence scorer, orchestrator
//! - [`render`] / [`ai`] - capability implementations
//! - [`testing`] - mock implementations for tests

pub mod ai;
pub mod canonical;
pub mod credentials;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod security;
pub mod strategies;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use canonical::{canonicalize, sanitize, CanonicalUrl};
pub use credentials::ApiKey;
pub use error::{ExtractError, ExtractResult, SecurityError, SecurityResult};
pub use pipeline::{is_acceptable, score, Orchestrator};
pub use security::UrlValidator;
pub use strategies::{AssistedStrategy, FallbackStrategy, StructuralStrategy};
pub use traits::{Describer, Renderer, Strategy};
pub use types::{
    ExtractionInput, ExtractionOutcome, PageRecord, PipelineConfig, StrategyKind,
};

// Re-export capability implementations
pub use ai::{DisabledDescriber, OpenAiDescriber};
pub use render::{DisabledRenderer, PooledRenderer, RemoteRenderer};
