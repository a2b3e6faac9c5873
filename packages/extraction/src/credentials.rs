//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API keys never show up in logs, debug
//! output, or error messages.

use std::fmt;

use secrecy::{ExposeSecret, SecretBox};

/// An API key that won't be logged or displayed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Wrap a key value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the key for use in an outgoing request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_in_debug_or_display() {
        let key = ApiKey::new("sk-super-secret");
        assert!(!format!("{key:?}").contains("sk-super"));
        assert!(!format!("{key}").contains("sk-super"));
    }

    #[test]
    fn test_expose_returns_value() {
        let key = ApiKey::new("sk-super-secret");
        assert_eq!(key.expose(), "sk-super-secret");
    }
}
