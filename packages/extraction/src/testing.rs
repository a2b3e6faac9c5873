//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real network, render, or
//! model calls. Mocks return deterministic, configurable responses and
//! record their calls for assertions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::{Describer, Renderer, Strategy};
use crate::types::{ExtractionInput, PageRecord, StrategyKind};

/// A mock renderer returning fixed image bytes.
pub struct MockRenderer {
    image: Vec<u8>,
    available: bool,
    fail_with: Option<String>,
    renders: AtomicUsize,
    urls: RwLock<Vec<String>>,
}

impl MockRenderer {
    /// Renderer that always returns the given bytes.
    pub fn new(image: Vec<u8>) -> Self {
        Self {
            image,
            available: true,
            fail_with: None,
            renders: AtomicUsize::new(0),
            urls: RwLock::new(Vec::new()),
        }
    }

    /// Renderer that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Vec::new())
        }
    }

    /// Renderer whose renders fail with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Number of render calls made.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// URLs rendered, in order.
    pub fn rendered_urls(&self) -> Vec<String> {
        self.urls.read().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn render(&self, url: &str) -> ExtractResult<Vec<u8>> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.urls.write().unwrap().push(url.to_string());
        match &self.fail_with {
            Some(message) => Err(ExtractError::Network(message.clone())),
            None => Ok(self.image.clone()),
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// A mock describer returning a fixed text reply.
pub struct MockDescriber {
    response: String,
    configured: bool,
    fail_with: Option<String>,
    calls: AtomicUsize,
    prompts: RwLock<Vec<String>>,
}

impl MockDescriber {
    /// Describer that always answers with the given text.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            configured: true,
            fail_with: None,
            calls: AtomicUsize::new(0),
            prompts: RwLock::new(Vec::new()),
        }
    }

    /// Describer that reports itself unconfigured.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new("")
        }
    }

    /// Describer whose calls fail with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new("")
        }
    }

    /// Number of describe calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl Describer for MockDescriber {
    async fn describe(&self, _image: &[u8], prompt: &str) -> ExtractResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.write().unwrap().push(prompt.to_string());
        match &self.fail_with {
            Some(message) => Err(ExtractError::Network(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

/// What a [`ScriptedStrategy`] does when invoked.
#[derive(Debug, Clone)]
pub enum Script {
    /// Return this record.
    Record(PageRecord),
    /// Fail with a network error.
    NetworkError(String),
    /// Fail with a parse error.
    ParseError(String),
    /// Sleep, then return this record (for deadline tests).
    SlowRecord(Duration, PageRecord),
}

/// A strategy with a scripted response, for orchestrator tests.
pub struct ScriptedStrategy {
    kind: StrategyKind,
    priority: u8,
    gated: bool,
    available: bool,
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedStrategy {
    /// Strategy that succeeds with the given record.
    pub fn returning(kind: StrategyKind, priority: u8, record: PageRecord) -> Self {
        Self {
            kind,
            priority,
            gated: !matches!(kind, StrategyKind::Fallback),
            available: true,
            script: Script::Record(record),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Strategy that fails with a network error.
    pub fn failing(kind: StrategyKind, priority: u8, message: impl Into<String>) -> Self {
        Self {
            script: Script::NetworkError(message.into()),
            ..Self::returning(kind, priority, PageRecord::new())
        }
    }

    /// Strategy that fails with a parse error.
    pub fn unparseable(kind: StrategyKind, priority: u8, message: impl Into<String>) -> Self {
        Self {
            script: Script::ParseError(message.into()),
            ..Self::returning(kind, priority, PageRecord::new())
        }
    }

    /// Strategy that sleeps before answering.
    pub fn slow(kind: StrategyKind, priority: u8, delay: Duration, record: PageRecord) -> Self {
        Self {
            script: Script::SlowRecord(delay, record),
            ..Self::returning(kind, priority, PageRecord::new())
        }
    }

    /// Report `can_extract == false`.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Override the gate opt-out.
    pub fn with_gated(mut self, gated: bool) -> Self {
        self.gated = gated;
        self
    }

    /// Handle for asserting how often the strategy ran.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Strategy for ScriptedStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn can_extract(&self, _input: &ExtractionInput) -> bool {
        self.available
    }

    fn gated(&self) -> bool {
        self.gated
    }

    async fn extract(&self, _input: &ExtractionInput) -> ExtractResult<PageRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Record(record) => Ok(record.clone()),
            Script::NetworkError(message) => Err(ExtractError::Network(message.clone())),
            Script::ParseError(message) => Err(ExtractError::Parse(message.clone())),
            Script::SlowRecord(delay, record) => {
                tokio::time::sleep(*delay).await;
                Ok(record.clone())
            }
        }
    }
}

/// A record that sails through the quality gate.
pub fn acceptable_record() -> PageRecord {
    PageRecord::new()
        .with_title("Aurora Wireless Headphones - Midnight Blue")
        .with_site_name("shop.io")
}

/// A record the quality gate rejects (generic landing-page title).
pub fn generic_record() -> PageRecord {
    PageRecord::new().with_title("Welcome to Shop")
}
