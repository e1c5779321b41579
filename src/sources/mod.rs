//! News sources and the registry the CLI talks to.
//!
//! Every outlet implements [`NewsSource`]. There are two families:
//!
//! | Family | Module | Fetch failure | Bad category number |
//! |--------|--------|---------------|---------------------|
//! | Syndication feeds | [`feed`] | empty list | empty list |
//! | HTML pages | [`page`] | `Err` | `Err(InvalidCategoryIndex)` |
//!
//! Callers must handle both answers; the families are deliberately not
//! unified.
//!
//! # Common Patterns
//!
//! - [`category`]: 1-based category number → label → fetch target
//! - [`collector`]: title cleanup, absolute URLs, optional deduplication
//! - [`catalog`]: the built-in outlets

pub mod catalog;
pub mod category;
pub mod collector;
pub mod feed;
pub mod page;

use crate::error::SourceError;
use crate::models::{CategoryIndex, NewsItem};
use async_trait::async_trait;
use tracing::instrument;

/// A single news outlet.
#[async_trait]
pub trait NewsSource: Send + Sync + std::fmt::Debug {
    /// Display name, stable for the life of the process.
    fn name(&self) -> &str;

    /// Category labels in menu order. Never empty.
    fn categories(&self) -> &[String];

    /// Fetch up to [`crate::models::MAX_ITEMS`] headlines for a category.
    async fn fetch_news(&self, category: CategoryIndex) -> Result<Vec<NewsItem>, SourceError>;
}

/// The ordered set of sources offered to the user.
#[derive(Debug)]
pub struct Registry {
    sources: Vec<Box<dyn NewsSource>>,
}

impl Registry {
    pub fn new(sources: Vec<Box<dyn NewsSource>>) -> Self {
        Self { sources }
    }

    /// A registry holding every built-in outlet.
    pub fn with_builtin_sources() -> Result<Self, SourceError> {
        Ok(Self::new(catalog::all()?))
    }

    /// Source names in menu order.
    pub fn list_providers(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Look up a source by its 1-based menu number.
    pub fn source(&self, number: i64) -> Result<&dyn NewsSource, SourceError> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.sources.get(i))
            .map(|s| &**s)
            .ok_or(SourceError::InvalidSourceIndex(number))
    }

    pub fn categories(&self, source: i64) -> Result<&[String], SourceError> {
        Ok(self.source(source)?.categories())
    }

    /// Fetch headlines for a 1-based source number and category.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_news(
        &self,
        source: i64,
        category: CategoryIndex,
    ) -> Result<Vec<NewsItem>, SourceError> {
        self.source(source)?.fetch_news(category).await
    }
}
