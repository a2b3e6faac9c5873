use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Vision model credential; the assisted strategy is skipped when absent.
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    /// Screenshot service; the assisted strategy is skipped when absent.
    pub render_api_url: Option<String>,
    pub render_api_key: Option<String>,
    /// Concurrent renders allowed against the shared rendering backend.
    pub render_concurrency: usize,
    /// Overall per-request extraction deadline (seconds).
    pub request_deadline_secs: u64,
    /// Byte ceiling for caller-supplied raw markup.
    pub max_raw_html_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            render_api_url: env::var("RENDER_API_URL").ok(),
            render_api_key: env::var("RENDER_API_KEY").ok(),
            render_concurrency: env::var("RENDER_CONCURRENCY")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("RENDER_CONCURRENCY must be a valid number")?,
            request_deadline_secs: env::var("REQUEST_DEADLINE_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("REQUEST_DEADLINE_SECS must be a valid number")?,
            max_raw_html_bytes: env::var("MAX_RAW_HTML_BYTES")
                .unwrap_or_else(|_| (512 * 1024).to_string())
                .parse()
                .context("MAX_RAW_HTML_BYTES must be a valid number")?,
        })
    }
}
