//! Concurrency-bounded wrapper around a shared renderer.
//!
//! Rendering is resource-heavy (a browser instance behind some API), so
//! concurrent renders are capped with a semaphore instead of letting every
//! in-flight request hit the backend at once. The cap is a deployment
//! capacity decision; correctness only requires the explicit close.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::Renderer;

/// Shares one renderer across requests with a fixed concurrency limit.
pub struct PooledRenderer {
    inner: Arc<dyn Renderer>,
    permits: Arc<Semaphore>,
}

impl PooledRenderer {
    /// Wrap a renderer with at most `max_concurrent` in-flight renders.
    pub fn new(inner: Arc<dyn Renderer>, max_concurrent: usize) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Permits currently free (for tests and introspection).
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

#[async_trait]
impl Renderer for PooledRenderer {
    async fn render(&self, url: &str) -> ExtractResult<Vec<u8>> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ExtractError::Internal("renderer is closed".to_string()))?;
        debug!(url = %url, "render permit acquired");
        self.inner.render(url).await
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    /// Close the permit gate, then the backend. Waiters fail fast.
    async fn close(&self) -> ExtractResult<()> {
        self.permits.close();
        self.inner.close().await
    }
}
