//! # Haberler Plus
//!
//! Headlines from Turkish news outlets behind one interface. Some outlets are
//! read from RSS/Atom feeds, others are scraped from their category pages;
//! either way the caller gets a flat list of `(title, url)` pairs.
//!
//! ## Architecture
//!
//! 1. **Category indexing**: a 1-based category number picks a label, the
//!    label picks a feed URL or a page path
//! 2. **Fetching**: one request with a 10 second timeout
//! 3. **Extraction**: feed format detection, or CSS selector strategies with
//!    quantity-gated fallbacks
//! 4. **Normalization**: clean titles, absolute URLs, deduplication where a
//!    source needs it, at most 30 items
//!
//! ```no_run
//! use haberler_plus::{CategoryIndex, Registry};
//!
//! # async fn run() -> Result<(), haberler_plus::SourceError> {
//! let registry = Registry::with_builtin_sources()?;
//! let items = registry.fetch_news(7, CategoryIndex::number(2)).await?;
//! for item in items {
//!     println!("{}: {}", item.title, item.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod models;
pub mod outputs;
pub mod sources;
pub mod utils;

pub use error::SourceError;
pub use models::{CategoryIndex, NewsItem};
pub use sources::{NewsSource, Registry};
