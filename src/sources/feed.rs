//! Syndication-backed sources (RSS 2.0 and Atom).
//!
//! A [`FeedSource`] maps each category to a feed URL, downloads it, figures
//! out which format came back and turns the first [`MAX_ITEMS`] entries into
//! [`NewsItem`]s.
//!
//! Feeds are best effort: transport errors, unparseable bodies and empty
//! feeds all end in an empty list rather than an error, and so does an
//! invalid category number.
//!
//! # Format detection
//!
//! Formats are tried in the source's priority order. A format wins only when
//! the document root matches it (`<rss>` or `<feed>`), the body parses with
//! the `rss` or `atom_syndication` reader and at least one entry is present.
//! Namespaced extensions such as `media:title` or `atom:link` are ignored:
//!
//! ```text
//! body ──► Rss(entries) | Atom(entries) | Unrecognized
//! ```

use crate::error::SourceError;
use crate::http::fetch_text;
use crate::models::{CategoryIndex, MAX_ITEMS, NewsItem};
use crate::sources::NewsSource;
use crate::sources::category::{CategoryTable, Resolved};
use crate::utils::{clean_title, has_http_scheme, truncate_for_log};
use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Wire formats a feed may come back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// RSS 2.0: `<rss><channel><item>…`
    Rss,
    /// Atom: `<feed><entry>…`
    Atom,
}

impl FeedFormat {
    fn root(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Atom => "feed",
        }
    }
}

/// Where a feed category points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    pub feed_url: String,
    /// Path segment used to rebuild article URLs when the feed omits them.
    pub article_path: Option<String>,
}

impl FeedTarget {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            article_path: None,
        }
    }

    pub fn with_article_path(mut self, path: impl Into<String>) -> Self {
        self.article_path = Some(path.into());
        self
    }
}

/// What to do with an RSS item whose `<link>` is empty or not absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkFallback {
    /// Drop the item.
    Discard,
    /// Use the guid when it is a permalink (the RSS default) holding an
    /// absolute URL; otherwise rebuild the URL as
    /// `{origin}/{article_path}/{guid}`.
    Guid { origin: Url },
}

/// A format-specific entry before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawEntry {
    title: String,
    link: String,
    guid: String,
    guid_is_permalink: bool,
}

/// Result of format detection.
#[derive(Debug, PartialEq, Eq)]
enum ParsedFeed {
    Rss(Vec<RawEntry>),
    Atom(Vec<RawEntry>),
    Unrecognized,
}

/// Local name of the first element in `body`, if the body is XML at all.
fn root_element(body: &str) -> Option<String> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn parse_rss(body: &str) -> Result<Vec<RawEntry>, rss::Error> {
    let channel = rss::Channel::read_from(body.as_bytes())?;
    Ok(channel
        .items()
        .iter()
        .map(|item| {
            let (guid, guid_is_permalink) = item
                .guid()
                .map(|g| (g.value().trim().to_string(), g.is_permalink()))
                .unwrap_or_default();
            RawEntry {
                title: item.title().unwrap_or_default().to_string(),
                link: item.link().unwrap_or_default().trim().to_string(),
                guid,
                guid_is_permalink,
            }
        })
        .collect())
}

/// Prefer the `alternate` link, else the first link.
///
/// A link without `rel` counts as `alternate`.
fn pick_atom_link(links: &[atom_syndication::Link]) -> String {
    links
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| links.first())
        .map(|l| l.href().trim().to_string())
        .unwrap_or_default()
}

fn parse_atom(body: &str) -> Result<Vec<RawEntry>, atom_syndication::Error> {
    let feed = atom_syndication::Feed::read_from(body.as_bytes())?;
    Ok(feed
        .entries()
        .iter()
        .map(|entry| RawEntry {
            title: entry.title().value.clone(),
            link: pick_atom_link(entry.links()),
            guid: String::new(),
            guid_is_permalink: false,
        })
        .collect())
}

/// Try each format in `order` and keep the first one that yields entries.
fn detect_feed(body: &str, order: &[FeedFormat]) -> ParsedFeed {
    let root = root_element(body);
    for &format in order {
        if root.as_deref() != Some(format.root()) {
            debug!(?format, root = ?root, "Root element does not match format");
            continue;
        }
        let parsed = match format {
            FeedFormat::Rss => parse_rss(body).map_err(|e| e.to_string()),
            FeedFormat::Atom => parse_atom(body).map_err(|e| e.to_string()),
        };
        match parsed {
            Ok(entries) if !entries.is_empty() => {
                debug!(?format, count = entries.len(), "Parsed feed");
                return match format {
                    FeedFormat::Rss => ParsedFeed::Rss(entries),
                    FeedFormat::Atom => ParsedFeed::Atom(entries),
                };
            }
            Ok(_) => debug!(?format, "Feed parsed but has no entries"),
            Err(e) => debug!(?format, error = %e, "Failed to parse feed"),
        }
    }
    ParsedFeed::Unrecognized
}

/// A news source backed by one syndication feed per category.
#[derive(Debug, Clone)]
pub struct FeedSource {
    name: String,
    categories: CategoryTable<FeedTarget>,
    formats: Vec<FeedFormat>,
    link_fallback: LinkFallback,
}

impl FeedSource {
    /// A source that tries RSS before Atom and drops items without a link.
    pub fn new(name: impl Into<String>, categories: CategoryTable<FeedTarget>) -> Self {
        Self {
            name: name.into(),
            categories,
            formats: vec![FeedFormat::Rss, FeedFormat::Atom],
            link_fallback: LinkFallback::Discard,
        }
    }

    pub fn with_formats(mut self, formats: impl Into<Vec<FeedFormat>>) -> Self {
        self.formats = formats.into();
        self
    }

    pub fn with_link_fallback(mut self, fallback: LinkFallback) -> Self {
        self.link_fallback = fallback;
        self
    }

    /// Resolve the article URL of an RSS item, applying the link fallback.
    fn rss_url(&self, entry: &RawEntry, target: &FeedTarget) -> Option<String> {
        if has_http_scheme(&entry.link) {
            return Some(entry.link.clone());
        }
        let LinkFallback::Guid { origin } = &self.link_fallback else {
            return None;
        };
        if entry.link.is_empty() && entry.guid_is_permalink && has_http_scheme(&entry.guid) {
            return Some(entry.guid.clone());
        }
        if entry.guid.is_empty() {
            return None;
        }
        let path = target.article_path.as_deref().unwrap_or_default();
        let base = origin.as_str().trim_end_matches('/');
        let path = path.trim_matches('/');
        let guid = entry.guid.trim_start_matches('/');
        Some(if path.is_empty() {
            format!("{base}/{guid}")
        } else {
            format!("{base}/{path}/{guid}")
        })
    }

    /// Turn a feed body into normalized items.
    fn extract_items(&self, body: &str, target: &FeedTarget) -> Vec<NewsItem> {
        let (format, entries) = match detect_feed(body, &self.formats) {
            ParsedFeed::Rss(entries) => (FeedFormat::Rss, entries),
            ParsedFeed::Atom(entries) => (FeedFormat::Atom, entries),
            ParsedFeed::Unrecognized => {
                warn!(
                    source = %self.name,
                    preview = %truncate_for_log(body.trim_start(), 120),
                    "Body is neither RSS nor Atom"
                );
                return Vec::new();
            }
        };

        let mut items = Vec::with_capacity(entries.len().min(MAX_ITEMS));
        for (i, entry) in entries.into_iter().take(MAX_ITEMS).enumerate() {
            let title = clean_title(&entry.title);
            if title.is_empty() {
                continue;
            }
            let url = match format {
                FeedFormat::Rss => self.rss_url(&entry, target),
                FeedFormat::Atom => Some(entry.link.clone()).filter(|l| has_http_scheme(l)),
            };
            let Some(url) = url else {
                debug!(index = i, %title, "Skipping entry without usable link");
                continue;
            };
            if i < 3 {
                debug!(index = i, %title, %url, "Feed item");
            }
            items.push(NewsItem { title, url });
        }
        items
    }
}

#[async_trait]
impl NewsSource for FeedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &[String] {
        self.categories.labels()
    }

    #[instrument(level = "info", skip(self), fields(source = %self.name))]
    async fn fetch_news(&self, category: CategoryIndex) -> Result<Vec<NewsItem>, SourceError> {
        let (label, target) = match self.categories.resolve(category) {
            Resolved::Target { label, target } => (label, target),
            Resolved::OutOfRange => {
                debug!(%category, "Invalid category index; returning empty results");
                return Ok(Vec::new());
            }
            Resolved::Unmapped(label) => {
                debug!(%label, "No feed URL for category; returning empty results");
                return Ok(Vec::new());
            }
        };

        debug!(feed_url = %target.feed_url, %label, "Fetching feed");
        let body = match fetch_text(&target.feed_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, feed_url = %target.feed_url, "Feed fetch failed; returning empty results");
                return Ok(Vec::new());
            }
        };

        let items = self.extract_items(&body, target);
        info!(count = items.len(), %label, "Fetched feed items");
        Ok(items)
    }
}
