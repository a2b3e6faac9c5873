//! Confidence scoring for accepted results.
//!
//! Strategy identity dominates trust; field completeness adds a bounded
//! secondary adjustment so a thin record from a strong strategy still
//! ranks above a rich record from a weak one.

use crate::types::{PageRecord, StrategyKind};

/// Base confidence by strategy.
pub const ASSISTED_BASE: f64 = 0.9;
pub const STRUCTURAL_BASE: f64 = 0.8;
pub const FALLBACK_BASE: f64 = 0.5;

/// Per-field completeness bonus and its cap.
const FIELD_BONUS: f64 = 0.05;
const MAX_BONUS: f64 = 0.1;

/// Score an accepted record in [0, 1].
///
/// The fallback stays flat at its base: its fields are synthesized from
/// the URL, not extracted, so completeness says nothing about trust.
pub fn score(record: &PageRecord, strategy: StrategyKind) -> f64 {
    let base = match strategy {
        StrategyKind::Assisted => ASSISTED_BASE,
        StrategyKind::Structural => STRUCTURAL_BASE,
        StrategyKind::Fallback => return FALLBACK_BASE,
    };
    let bonus = (FIELD_BONUS * record.field_count() as f64).min(MAX_BONUS);
    (base + bonus).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bases_without_fields() {
        let empty = PageRecord::new();
        assert_eq!(score(&empty, StrategyKind::Assisted), 0.9);
        assert_eq!(score(&empty, StrategyKind::Structural), 0.8);
        assert_eq!(score(&empty, StrategyKind::Fallback), 0.5);
    }

    #[test]
    fn test_single_field_bonus() {
        let record = PageRecord::new().with_title("x");
        assert!((score(&record, StrategyKind::Structural) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_caps_at_point_one() {
        let record = PageRecord::new()
            .with_title("x")
            .with_site_name("y")
            .with_description("z")
            .with_price("1", "USD");
        assert_eq!(record.field_count(), 5);
        assert!((score(&record, StrategyKind::Structural) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_total_caps_at_one() {
        let record = PageRecord::new()
            .with_title("x")
            .with_site_name("y")
            .with_price("1", "USD");
        assert_eq!(score(&record, StrategyKind::Assisted), 1.0);
    }

    #[test]
    fn test_fallback_gets_no_bonus() {
        // Fallback records carry three synthesized fields; the score must
        // still be exactly the base.
        let record = PageRecord::new()
            .with_title("Page from shop.io")
            .with_site_name("shop.io")
            .with_content_type("webpage");
        assert_eq!(score(&record, StrategyKind::Fallback), 0.5);
    }

    #[test]
    fn test_fallback_never_outscores_genuine_extraction() {
        let rich_fallback = PageRecord::new()
            .with_title("Page from a-very-long-host-name.example.com")
            .with_site_name("a-very-long-host-name.example.com")
            .with_content_type("webpage");
        let thin_structural = PageRecord::new();
        assert!(
            score(&rich_fallback, StrategyKind::Fallback)
                < score(&thin_structural, StrategyKind::Structural)
        );
    }
}
