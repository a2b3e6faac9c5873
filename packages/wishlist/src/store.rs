//! Wishlist storage with canonical-URL deduplication.
//!
//! The actual on-device persistence is an external collaborator; the
//! trait here is its seam. Deduplication is the part that matters: an
//! add whose canonical URL is already present must be rejected before
//! anything is written.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use extraction::{canonicalize, PageRecord};
use tracing::{debug, info};

use crate::entry::WishlistEntry;
use crate::error::{AppError, AppResult};

/// Key-value persistence seam, keyed by canonical URL.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Look up an entry by canonical URL.
    async fn get(&self, canonical_url: &str) -> AppResult<Option<WishlistEntry>>;

    /// Insert or replace an entry under its canonical URL.
    async fn put(&self, entry: WishlistEntry) -> AppResult<()>;

    /// All entries, unordered.
    async fn list(&self) -> AppResult<Vec<WishlistEntry>>;

    /// Remove an entry; returns whether one existed.
    async fn delete(&self, canonical_url: &str) -> AppResult<bool>;

    /// Number of stored entries.
    async fn len(&self) -> AppResult<usize>;
}

/// In-memory store for tests and development.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, WishlistEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn get(&self, canonical_url: &str) -> AppResult<Option<WishlistEntry>> {
        Ok(self.entries.read().unwrap().get(canonical_url).cloned())
    }

    async fn put(&self, entry: WishlistEntry) -> AppResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(entry.canonical_url.to_string(), entry);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<WishlistEntry>> {
        Ok(self.entries.read().unwrap().values().cloned().collect())
    }

    async fn delete(&self, canonical_url: &str) -> AppResult<bool> {
        Ok(self
            .entries
            .write()
            .unwrap()
            .remove(canonical_url)
            .is_some())
    }

    async fn len(&self) -> AppResult<usize> {
        Ok(self.entries.read().unwrap().len())
    }
}

/// The wishlist itself: dedup-checked adds, explicit edits and removals.
pub struct Wishlist<S> {
    store: S,
}

impl<S: WishlistStore> Wishlist<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a link with its extracted metadata.
    ///
    /// Canonicalizes first; rejects with [`AppError::Duplicate`] when an
    /// entry with the same canonical URL exists. The store is untouched
    /// on rejection.
    pub async fn add(&self, original_url: &str, record: PageRecord) -> AppResult<WishlistEntry> {
        let canonical =
            canonicalize(original_url).map_err(|e| AppError::Validation(e.to_string()))?;

        if self.store.get(canonical.as_str()).await?.is_some() {
            debug!(canonical_url = %canonical, "duplicate add rejected");
            return Err(AppError::Duplicate {
                canonical_url: canonical.to_string(),
            });
        }

        let entry = WishlistEntry::new(original_url, canonical, record);
        self.store.put(entry.clone()).await?;
        info!(canonical_url = %entry.canonical_url, id = %entry.id, "entry added");
        Ok(entry)
    }

    /// Replace an entry's metadata on explicit edit.
    pub async fn update(&self, canonical_url: &str, record: PageRecord) -> AppResult<WishlistEntry> {
        let existing = self
            .store
            .get(canonical_url)
            .await?
            .ok_or_else(|| AppError::Store(format!("no entry for {canonical_url}")))?;

        let updated = existing.with_record(record);
        self.store.put(updated.clone()).await?;
        Ok(updated)
    }

    /// Remove an entry; returns whether one existed.
    pub async fn remove(&self, canonical_url: &str) -> AppResult<bool> {
        self.store.delete(canonical_url).await
    }

    /// All entries, newest first.
    pub async fn entries(&self) -> AppResult<Vec<WishlistEntry>> {
        let mut entries = self.store.list().await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Number of saved entries.
    pub async fn len(&self) -> AppResult<usize> {
        self.store.len().await
    }
}
