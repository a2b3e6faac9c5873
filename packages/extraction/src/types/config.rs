//! Pipeline configuration.

use std::time::Duration;

/// Knobs for one pipeline instance.
///
/// Constructed at process start and treated as immutable afterwards;
/// components receive it by reference during construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Timeout for the structural strategy's page fetch.
    pub fetch_timeout: Duration,

    /// Redirect cap for the structural strategy's page fetch.
    pub max_redirects: usize,

    /// Timeout for one render call.
    pub render_timeout: Duration,

    /// Timeout for one vision-model describe call.
    pub inference_timeout: Duration,

    /// Overall deadline for one pipeline run. Must exceed the render and
    /// inference timeouts or the assisted strategy can never finish.
    pub request_deadline: Duration,

    /// Byte ceiling for caller-supplied raw markup.
    pub max_raw_html_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            max_redirects: 5,
            render_timeout: Duration::from_secs(20),
            inference_timeout: Duration::from_secs(30),
            request_deadline: Duration::from_secs(60),
            max_raw_html_bytes: 512 * 1024,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the structural fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the render timeout.
    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    /// Set the inference timeout.
    pub fn with_inference_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout = timeout;
        self
    }

    /// Set the overall request deadline.
    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    /// Set the raw markup byte ceiling.
    pub fn with_max_raw_html_bytes(mut self, bytes: usize) -> Self {
        self.max_raw_html_bytes = bytes;
        self
    }
}
