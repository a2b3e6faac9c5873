//! Describer implementations.

pub mod openai;

pub use openai::OpenAiDescriber;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::Describer;

/// Placeholder describer for deployments without vision credentials.
///
/// Reports itself unconfigured so the assisted strategy is skipped.
#[derive(Debug, Default)]
pub struct DisabledDescriber;

#[async_trait]
impl Describer for DisabledDescriber {
    async fn describe(&self, _image: &[u8], _prompt: &str) -> ExtractResult<String> {
        Err(ExtractError::Unconfigured(
            "no vision model configured".to_string(),
        ))
    }

    fn is_configured(&self) -> bool {
        false
    }
}
