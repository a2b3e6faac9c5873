//! URL validation for SSRF protection.
//!
//! Extraction runs server-side against caller-supplied URLs, so every
//! target is checked against a deny-list of private and loopback network
//! ranges before any fetch or render is attempted.

use std::collections::HashSet;
use std::net::IpAddr;

use crate::error::{SecurityError, SecurityResult};

/// URL validator applied to every inbound extraction target.
///
/// Blocks:
/// - non-HTTP(S) schemes (file://, ftp://)
/// - loopback and unspecified hosts (localhost, 127.0.0.1, 0.0.0.0, ::1)
/// - RFC1918 private ranges and link-local / cloud metadata ranges
/// - IPv6 loopback, unique-local, and link-local ranges
/// - hostnames whose DNS resolution lands in a blocked range
#[derive(Debug, Clone)]
pub struct UrlValidator {
    allowed_schemes: HashSet<String>,
    blocked_hosts: HashSet<String>,
    blocked_cidrs: Vec<ipnet::IpNet>,
    /// Hosts that bypass validation entirely (test servers, etc.)
    allowed_hosts: HashSet<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a validator with the default deny-lists.
    pub fn new() -> Self {
        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_hosts: [
                "localhost",
                "127.0.0.1",
                "0.0.0.0",
                "::1",
                "[::1]",
                "metadata.google.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs: vec![
                "10.0.0.0/8".parse().unwrap(),
                "172.16.0.0/12".parse().unwrap(),
                "192.168.0.0/16".parse().unwrap(),
                "169.254.0.0/16".parse().unwrap(), // Link-local / cloud metadata
                "127.0.0.0/8".parse().unwrap(),    // Loopback
                "0.0.0.0/8".parse().unwrap(),      // Unspecified
                "::1/128".parse().unwrap(),        // IPv6 loopback
                "fc00::/7".parse().unwrap(),       // IPv6 unique-local
                "fe80::/10".parse().unwrap(),      // IPv6 link-local
            ],
            allowed_hosts: HashSet::new(),
        }
    }

    /// Allow a host to bypass validation.
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.insert(host.into());
        self
    }

    /// Block an additional host.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.blocked_hosts.insert(host.into());
        self
    }

    /// Validate scheme, host, and literal IP against the deny-lists.
    pub fn validate(&self, url: &str) -> SecurityResult<()> {
        let parsed = url::Url::parse(url)?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            return Err(SecurityError::DisallowedScheme(parsed.scheme().to_string()));
        }

        let host = parsed.host_str().ok_or(SecurityError::NoHost)?;

        if self.allowed_hosts.contains(host) {
            return Ok(());
        }

        if self.blocked_hosts.contains(host) {
            return Err(SecurityError::BlockedHost(host.to_string()));
        }

        // Literal IPs are checked directly; IPv6 literals arrive bracketed.
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<IpAddr>() {
            self.check_ip(ip)?;
        }

        Ok(())
    }

    /// Validate a URL and resolve DNS to check the actual IPs.
    ///
    /// Catches rebinding setups where a public hostname resolves to an
    /// internal address.
    pub async fn validate_with_dns(&self, url: &str) -> SecurityResult<()> {
        self.validate(url)?;

        let parsed = url::Url::parse(url)?;
        let host = parsed.host_str().ok_or(SecurityError::NoHost)?;

        if self.allowed_hosts.contains(host) {
            return Ok(());
        }

        // Literal IPs were already checked in validate().
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if bare.parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        let port = parsed.port().unwrap_or(match parsed.scheme() {
            "https" => 443,
            _ => 80,
        });

        let addrs = tokio::net::lookup_host(format!("{host}:{port}"))
            .await
            .map_err(|e| SecurityError::DnsResolution(e.to_string()))?;

        for addr in addrs {
            if let Err(e) = self.check_ip(addr.ip()) {
                tracing::warn!(host = %host, ip = %addr.ip(), "DNS resolved to blocked range");
                return Err(e);
            }
        }

        Ok(())
    }

    fn check_ip(&self, ip: IpAddr) -> SecurityResult<()> {
        for cidr in &self.blocked_cidrs {
            if cidr.contains(&ip) {
                return Err(SecurityError::BlockedCidr(ip.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_loopback_hosts() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://localhost/").is_err());
        assert!(validator.validate("http://127.0.0.1/").is_err());
        assert!(validator.validate("http://0.0.0.0/").is_err());
        assert!(validator.validate("http://[::1]/").is_err());
    }

    #[test]
    fn test_blocks_private_ranges() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://10.1.2.3/").is_err());
        assert!(validator.validate("http://172.16.0.1/").is_err());
        assert!(validator.validate("http://172.31.255.1/").is_err());
        assert!(validator.validate("http://192.168.1.1/").is_err());
        assert!(validator.validate("http://169.254.169.254/").is_err());
        assert!(validator.validate("http://127.8.8.8/").is_err());
    }

    #[test]
    fn test_blocks_ipv6_private_ranges() {
        let validator = UrlValidator::new();
        assert!(validator.validate("http://[fc00::1]/").is_err());
        assert!(validator.validate("http://[fe80::1]/").is_err());
    }

    #[test]
    fn test_blocks_non_http_schemes() {
        let validator = UrlValidator::new();
        assert!(validator.validate("file:///etc/passwd").is_err());
        assert!(validator.validate("ftp://example.com/").is_err());
    }

    #[test]
    fn test_allows_public_urls() {
        let validator = UrlValidator::new();
        assert!(validator.validate("https://example.com/").is_ok());
        assert!(validator.validate("http://93.184.216.34/").is_ok());
    }

    #[test]
    fn test_allowed_hosts_bypass() {
        let validator = UrlValidator::new().allow_host("localhost");
        assert!(validator.validate("http://localhost/").is_ok());
    }

    #[test]
    fn test_blocked_host_extension() {
        let validator = UrlValidator::new().block_host("internal.corp");
        assert!(validator.validate("https://internal.corp/x").is_err());
    }
}
