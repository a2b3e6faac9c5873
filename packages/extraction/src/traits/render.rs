//! Renderer trait: the opaque page-rendering capability.

use async_trait::async_trait;

use crate::error::ExtractResult;

/// Renders a URL to a full-page image.
///
/// Browser automation internals are outside this crate; implementations
/// wrap whatever produces the screenshot (a remote rendering API, a
/// headless browser, a test fixture). The renderer is the one shared,
/// long-lived, resource-heavy capability in the process, so the trait
/// carries an explicit close operation for shutdown.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render the URL and return encoded image bytes (PNG).
    async fn render(&self, url: &str) -> ExtractResult<Vec<u8>>;

    /// Whether this renderer is usable at all (credentials present,
    /// backend reachable at configuration time).
    fn is_available(&self) -> bool {
        true
    }

    /// Release underlying resources. Called once on process shutdown;
    /// renders issued afterwards fail.
    async fn close(&self) -> ExtractResult<()> {
        Ok(())
    }
}
