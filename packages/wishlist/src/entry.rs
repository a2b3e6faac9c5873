//! Persisted wishlist entries.

use chrono::{DateTime, Utc};
use extraction::{CanonicalUrl, PageRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One saved link with its extracted metadata.
///
/// Entries are created on a successful add, updated only on explicit
/// edit, and never mutated by the extraction pipeline. No two entries
/// share a canonical URL; the store enforces that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// Stable identifier (time-ordered).
    pub id: Uuid,

    /// Extracted metadata, flattened into the entry.
    #[serde(flatten)]
    pub record: PageRecord,

    /// URL exactly as the user submitted it.
    pub original_url: String,

    /// Deduplication key.
    pub canonical_url: CanonicalUrl,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WishlistEntry {
    /// Create a fresh entry.
    pub fn new(
        original_url: impl Into<String>,
        canonical_url: CanonicalUrl,
        record: PageRecord,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            record,
            original_url: original_url.into(),
            canonical_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the metadata on an explicit edit.
    pub fn with_record(mut self, record: PageRecord) -> Self {
        self.record = record;
        self.updated_at = Utc::now();
        self
    }
}
