//! Data models shared by every news source.
//!
//! - [`NewsItem`]: a normalized headline, the only thing a source hands back
//! - [`CategoryIndex`]: a 1-based category selection as typed by the user

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of items any single fetch returns.
pub const MAX_ITEMS: usize = 30;

/// A single normalized headline.
///
/// Both fields are non-empty and `url` is absolute for every item a source
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// The headline text, trimmed and stripped of CDATA markers.
    pub title: String,
    /// Absolute URL of the article.
    pub url: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// A 1-based category selection.
///
/// The number is kept signed and unchecked: whether it falls inside a
/// source's category range is decided by the source, because the two source
/// families answer an out-of-range selection differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryIndex(i64);

impl CategoryIndex {
    /// A category number as shown in menus (`1` is the first category).
    pub fn number(n: i64) -> Self {
        Self(n)
    }

    /// Convert an index using the historical mixed convention.
    ///
    /// An index strictly inside `[0, len)` is read as 0-based and shifted up
    /// by one. Anything else is taken as already 1-based, so `len` itself
    /// still selects the last category and negative values stay invalid.
    pub fn from_legacy(raw: i64, len: usize) -> Self {
        if raw >= 0 && (raw as u64) < len as u64 {
            Self(raw + 1)
        } else {
            Self(raw)
        }
    }

    /// The raw 1-based number.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Zero-based position in a list of `len` categories, if in range.
    pub fn position(self, len: usize) -> Option<usize> {
        if self.0 >= 1 && (self.0 as u64) <= len as u64 {
            Some((self.0 - 1) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
