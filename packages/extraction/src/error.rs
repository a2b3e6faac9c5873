//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while extracting metadata from a URL.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// URL is malformed or uses a disallowed scheme. Non-retryable.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// URL targets a blocked host or network range (SSRF protection)
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// Fetch, render, or inference transport failure. Retryable.
    #[error("network error: {0}")]
    Network(String),

    /// AI response was not valid JSON in the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    /// Request deadline elapsed before a strategy completed
    #[error("deadline exceeded extracting {url}")]
    Timeout { url: String },

    /// A strategy's required external capability is missing credentials
    #[error("extractor not configured: {0}")]
    Unconfigured(String),

    /// Every registered strategy reported it cannot handle the URL
    #[error("no extractor available for this URL")]
    NoStrategyAvailable,

    /// Unclassified internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ExtractError {
    /// Whether the caller can reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
