//! URL canonicalization.
//!
//! Every URL entering the system is reduced to a single normalized form
//! that serves both as the extraction target and as the deduplication key
//! for saved entries. Two URLs that differ only in scheme, `www.` prefix,
//! fragment, trailing slash, or tracking parameters canonicalize to the
//! same string.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExtractError, ExtractResult};

/// Query parameters stripped during canonicalization.
///
/// The `utm_*` family plus the per-platform click identifiers. `ref` and
/// other site-meaningful parameters are deliberately kept.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_id",
    "fbclid",
    "gclid",
    "msclkid",
    "twclid",
    "igshid",
    "mc_cid",
    "mc_eid",
    "yclid",
];

/// A normalized URL string used as extraction target and dedup key.
///
/// Construct via [`canonicalize`]; the inner string is guaranteed to be a
/// fixed point of canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// View the canonical form as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Host component of the canonical URL.
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.0)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim whitespace and prefix `https://` when no scheme is present.
///
/// Used before validation; not a substitute for [`canonicalize`].
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Whether the string starts with `scheme://`.
///
/// A plain `contains("://")` would be fooled by URLs carried inside
/// query values.
fn has_scheme(s: &str) -> bool {
    match s.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        None => false,
    }
}

/// Reduce a raw URL string to its canonical form.
///
/// Rules: scheme forced to `https` (schemeless input assumed `https`),
/// host lowercased with a leading `www.` stripped, default ports dropped,
/// fragment removed, tracking parameters removed, trailing slash stripped.
/// Path and query values are preserved byte-for-byte, including parameter
/// order. Fails with [`ExtractError::InvalidUrl`] on unparseable input or
/// non-HTTP(S) schemes.
pub fn canonicalize(raw: &str) -> ExtractResult<CanonicalUrl> {
    let sanitized = sanitize(raw);
    let parsed =
        Url::parse(&sanitized).map_err(|_| ExtractError::InvalidUrl(raw.trim().to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ExtractError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    // The url crate has already lowercased the host.
    let host = parsed
        .host_str()
        .ok_or_else(|| ExtractError::InvalidUrl(raw.trim().to_string()))?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut out = String::with_capacity(sanitized.len());
    out.push_str("https://");
    out.push_str(host);
    // port() is None for the original scheme's default port; 443 must
    // also go, since the output scheme is always https.
    if let Some(port) = parsed.port().filter(|p| *p != 443) {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(parsed.path().trim_end_matches('/'));

    if let Some(query) = parsed.query() {
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !is_tracking_pair(pair))
            .collect();
        if !kept.is_empty() {
            out.push('?');
            out.push_str(&kept.join("&"));
        }
    }

    Ok(CanonicalUrl(out))
}

/// Check a raw `key=value` pair against the tracking deny-list.
///
/// Only the key is percent-decoded for comparison; the pair itself is
/// emitted untouched so values keep their original encoding.
fn is_tracking_pair(pair: &str) -> bool {
    let raw_key = pair.split('=').next().unwrap_or(pair);
    let key: String = url::form_urlencoded::parse(raw_key.as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
        .unwrap_or_default();
    TRACKING_PARAMS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canon(raw: &str) -> String {
        canonicalize(raw).unwrap().into_string()
    }

    #[test]
    fn test_sanitize_prefixes_scheme() {
        assert_eq!(sanitize("example.com/page"), "https://example.com/page");
        assert_eq!(sanitize("  example.com  "), "https://example.com");
        assert_eq!(sanitize("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_sanitize_ignores_scheme_inside_query() {
        assert_eq!(
            sanitize("example.com/redirect?to=https://other.com"),
            "https://example.com/redirect?to=https://other.com"
        );
    }

    #[test]
    fn test_tracking_params_and_fragment_stripped() {
        assert_eq!(
            canon("https://www.amazon.com/product?utm_source=google&ref=123#section"),
            "https://amazon.com/product?ref=123"
        );
    }

    #[test]
    fn test_equivalence_classes() {
        let expected = "https://example.com/page";
        assert_eq!(canon("https://www.example.com/page"), expected);
        assert_eq!(canon("http://example.com/page"), expected);
        assert_eq!(canon("example.com/page"), expected);
        assert_eq!(canon("https://example.com/page/"), expected);
        assert_eq!(canon("https://example.com/page#top"), expected);
        assert_eq!(canon("https://example.com/page?utm_campaign=x"), expected);
        assert_eq!(canon("https://EXAMPLE.com/page"), expected);
    }

    #[test]
    fn test_root_url_drops_trailing_slash() {
        assert_eq!(canon("https://example.com/"), "https://example.com");
        assert_eq!(canon("example.com"), "https://example.com");
    }

    #[test]
    fn test_path_and_query_case_preserved() {
        assert_eq!(
            canon("https://example.com/Some/Path?Ref=AbC"),
            "https://example.com/Some/Path?Ref=AbC"
        );
    }

    #[test]
    fn test_non_tracking_params_kept_in_order() {
        assert_eq!(
            canon("https://shop.io/p?b=2&utm_medium=email&a=1&fbclid=xyz"),
            "https://shop.io/p?b=2&a=1"
        );
    }

    #[test]
    fn test_all_params_tracking_drops_query() {
        assert_eq!(
            canon("https://shop.io/p?utm_source=a&gclid=b"),
            "https://shop.io/p"
        );
    }

    #[test]
    fn test_explicit_port_kept_default_dropped() {
        assert_eq!(canon("https://example.com:443/x"), "https://example.com/x");
        // 443 is the default of the forced output scheme, so it goes even
        // when the input scheme was http.
        assert_eq!(canon("http://example.com:443/x"), "https://example.com/x");
        assert_eq!(
            canon("https://example.com:8443/x"),
            "https://example.com:8443/x"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            canonicalize("ht tp://nope"),
            Err(ExtractError::InvalidUrl(_))
        ));
        assert!(matches!(
            canonicalize("ftp://example.com/file"),
            Err(ExtractError::InvalidUrl(_))
        ));
        assert!(matches!(canonicalize(""), Err(ExtractError::InvalidUrl(_))));
    }

    #[test]
    fn test_idempotent_fixed_cases() {
        for raw in [
            "https://www.amazon.com/product?utm_source=google&ref=123#section",
            "HTTP://WWW.Example.COM:80/A/B/?x=1&utm_id=9",
            "http://example.com:443/x",
            "shop.io/p?b=2&a=1",
        ] {
            let once = canon(raw);
            assert_eq!(canon(&once), once, "not idempotent for {raw}");
        }
    }

    proptest! {
        #[test]
        fn prop_canonicalize_idempotent(
            host in "[a-z][a-z0-9]{1,10}\\.(com|io|org)",
            path in "(/[A-Za-z0-9_-]{1,8}){0,3}/?",
            key in "[a-z]{1,6}",
            value in "[A-Za-z0-9]{0,6}",
        ) {
            let raw = format!("https://www.{host}{path}?{key}={value}&utm_source=test#frag");
            let once = canonicalize(&raw).unwrap().into_string();
            let twice = canonicalize(&once).unwrap().into_string();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_scheme_and_www_invariant(
            host in "[a-z][a-z0-9]{1,10}\\.com",
            path in "(/[a-z0-9]{1,8}){0,2}",
        ) {
            let a = canonicalize(&format!("http://www.{host}{path}")).unwrap();
            let b = canonicalize(&format!("https://{host}{path}/")).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
