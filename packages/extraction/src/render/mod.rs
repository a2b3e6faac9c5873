//! Renderer implementations.

pub mod pool;
pub mod remote;

pub use pool::PooledRenderer;
pub use remote::RemoteRenderer;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::Renderer;

/// Placeholder renderer for deployments without a rendering backend.
///
/// Reports itself unavailable so the assisted strategy is skipped rather
/// than attempted.
#[derive(Debug, Default)]
pub struct DisabledRenderer;

#[async_trait]
impl Renderer for DisabledRenderer {
    async fn render(&self, _url: &str) -> ExtractResult<Vec<u8>> {
        Err(ExtractError::Unconfigured(
            "no rendering backend configured".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}
