//! OpenAI implementation of the Describer trait.
//!
//! Sends the rendered page image to a vision-capable chat model and
//! returns the raw text reply; JSON parsing belongs to the strategy.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::ApiKey;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::Describer;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Vision describer backed by OpenAI's chat completions API.
pub struct OpenAiDescriber {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiDescriber {
    /// Create a describer with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> ExtractResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ExtractError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create from `OPENAI_API_KEY`.
    pub fn from_env() -> ExtractResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ExtractError::Unconfigured("OPENAI_API_KEY not set".to_string()))?;
        Self::new(api_key)
    }

    /// Set the model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl Describer for OpenAiDescriber {
    async fn describe(&self, image: &[u8], prompt: &str) -> ExtractResult<String> {
        let data_url = format!("data:image/png;base64,{}", BASE64.encode(image));
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            temperature: 0.0,
            max_tokens: 1024,
        };

        debug!(model = %self.model, image_bytes = image.len(), "describe request");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Network(format!(
                "vision API returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Network(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ExtractError::Network("vision API returned no choices".to_string()))
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose().is_empty()
    }
}
