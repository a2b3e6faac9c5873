//! Client-side wishlist library.
//!
//! The calling application's half of the extraction system: fetch a
//! preview for a user-submitted link (with bounded retries against the
//! extraction service) and save it locally with canonical-URL
//! deduplication.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wishlist::{HttpTransport, MemoryStore, PreviewClient, Wishlist};
//!
//! let client = PreviewClient::new(HttpTransport::new("https://api.example.com/api/extract")?);
//! let wishlist = Wishlist::new(MemoryStore::new());
//!
//! let preview = client.fetch_preview("www.shop.io/item/42?utm_source=mail").await?;
//! let entry = wishlist.add("www.shop.io/item/42?utm_source=mail", preview.data.record).await?;
//! ```
//!
//! # Modules
//!
//! - [`client`] - preview fetching with retries and backoff
//! - [`store`] - the persistence seam and dedup logic
//! - [`entry`] - the saved record type
//! - [`error`] - client-facing error taxonomy

pub mod client;
pub mod entry;
pub mod error;
pub mod store;

pub use client::{
    validate_url, HttpTransport, PreviewClient, PreviewData, PreviewMetadata, PreviewResponse,
    PreviewTransport,
};
pub use entry::WishlistEntry;
pub use error::{AppError, AppResult};
pub use store::{MemoryStore, Wishlist, WishlistStore};
