//! Describer trait: the opaque vision-model capability.

use async_trait::async_trait;

use crate::error::ExtractResult;

/// Describes a page image as text, given a prompt.
///
/// The model call itself is opaque to the pipeline: implementations wrap
/// a specific provider and its wire format. The assisted strategy feeds
/// the returned text to a strict JSON parse.
#[async_trait]
pub trait Describer: Send + Sync {
    /// Describe the image (encoded PNG bytes) according to the prompt.
    async fn describe(&self, image: &[u8], prompt: &str) -> ExtractResult<String>;

    /// Whether the capability is configured (credentials present).
    ///
    /// When false the assisted strategy reports `can_extract == false`
    /// and is skipped without error.
    fn is_configured(&self) -> bool;
}
