//! Quality gate over extraction results.
//!
//! Rejects records that look like a site's generic landing-page metadata
//! rather than content-specific data, so a cheap strategy's thin result
//! doesn't stop the pipeline before a better one gets a chance. The gate
//! is strategy-agnostic; the same predicate applies to the structural and
//! AI-assisted paths.

use crate::types::PageRecord;

/// Titles at or below this length read as generic.
const MIN_TITLE_CHARS: usize = 20;

/// Phrases that mark a generic landing-page title.
const GENERIC_PHRASES: &[&str] = &["online shopping", "welcome to", "home page"];

/// Whether a record is good enough to stop the pipeline.
pub fn is_acceptable(record: &PageRecord) -> bool {
    let Some(title) = record.title.as_deref() else {
        return false;
    };
    let title = title.trim();
    if title.chars().count() <= MIN_TITLE_CHARS {
        return false;
    }
    let lowered = title.to_lowercase();
    !GENERIC_PHRASES.iter().any(|p| lowered.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> PageRecord {
        PageRecord::new().with_title(title)
    }

    #[test]
    fn test_accepts_specific_title() {
        assert!(is_acceptable(&titled(
            "Aurora Wireless Headphones - Midnight Blue"
        )));
    }

    #[test]
    fn test_rejects_missing_title() {
        assert!(!is_acceptable(&PageRecord::new()));
    }

    #[test]
    fn test_rejects_short_title() {
        assert!(!is_acceptable(&titled("Welcome")));
        // Exactly 20 chars is still too short.
        assert!(!is_acceptable(&titled("12345678901234567890")));
        assert!(is_acceptable(&titled("123456789012345678901")));
    }

    #[test]
    fn test_rejects_generic_phrases_case_insensitive() {
        assert!(!is_acceptable(&titled(
            "Welcome to Shop.io - the best deals"
        )));
        assert!(!is_acceptable(&titled(
            "AcmeMart: Online Shopping for Electronics"
        )));
        assert!(!is_acceptable(&titled("AcmeMart Home Page and more words")));
        assert!(!is_acceptable(&titled("WELCOME TO THE MEGASTORE TODAY")));
    }

    #[test]
    fn test_multibyte_titles_counted_by_chars() {
        // 21 two-byte chars; byte length would pass trivially either way,
        // char count is what matters.
        assert!(is_acceptable(&titled(&"й".repeat(21))));
        assert!(!is_acceptable(&titled(&"й".repeat(20))));
    }
}
