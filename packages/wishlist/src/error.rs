//! Typed errors for the client application.

use thiserror::Error;

/// Errors surfaced to the calling application.
///
/// The retryable split matters to the UI: a `Duplicate` or `Validation`
/// failure must not trigger a blind retry loop, while `Network` and
/// `Timeout` may.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation before any network call. Non-retryable.
    #[error("invalid link: {0}")]
    Validation(String),

    /// Transport failure after all attempts. Retryable.
    #[error("network error: {message}")]
    Network { message: String },

    /// A single attempt or the whole request timed out. Retryable.
    #[error("request timed out")]
    Timeout,

    /// An entry with the same canonical URL already exists. Non-retryable.
    #[error("already saved: {canonical_url}")]
    Duplicate { canonical_url: String },

    /// Local store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Unclassified failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether retrying the same operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout)
    }
}

/// Result type alias for client operations.
pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::Network {
            message: "x".into()
        }
        .is_retryable());
        assert!(AppError::Timeout.is_retryable());
        assert!(!AppError::Validation("x".into()).is_retryable());
        assert!(!AppError::Duplicate {
            canonical_url: "x".into()
        }
        .is_retryable());
        assert!(!AppError::Store("x".into()).is_retryable());
    }
}
