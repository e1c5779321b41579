//! Item normalizer shared by every page extraction strategy.

use crate::models::{MAX_ITEMS, NewsItem};
use crate::utils::{clean_title, resolve_url};
use std::collections::HashSet;
use url::Url;

/// Duplicate suppression state for sources that merge several strategies.
#[derive(Debug)]
struct Dedup {
    required_fragment: String,
    seen_urls: HashSet<String>,
    seen_titles: HashSet<String>,
}

/// Accumulates normalized items in discovery order.
///
/// Every accepted item has a non-empty title and an absolute URL. A
/// deduplicating collector additionally keeps only the first item for a given
/// URL or title, and only URLs that contain the category path fragment.
///
/// [`ItemCollector::offer_unseen`] is for supplementary passes that may
/// rediscover articles an earlier pass already kept.
#[derive(Debug)]
pub struct ItemCollector<'a> {
    origin: &'a Url,
    dedup: Option<Dedup>,
    collected_urls: HashSet<String>,
    items: Vec<NewsItem>,
}

impl<'a> ItemCollector<'a> {
    pub fn new(origin: &'a Url) -> Self {
        Self {
            origin,
            dedup: None,
            collected_urls: HashSet::new(),
            items: Vec::new(),
        }
    }

    pub fn deduplicating(origin: &'a Url, required_fragment: impl Into<String>) -> Self {
        Self {
            origin,
            dedup: Some(Dedup {
                required_fragment: required_fragment.into(),
                seen_urls: HashSet::new(),
                seen_titles: HashSet::new(),
            }),
            collected_urls: HashSet::new(),
            items: Vec::new(),
        }
    }

    /// Offer a raw `(title, href)` pair. Returns whether it was kept.
    pub fn offer(&mut self, title: &str, href: &str) -> bool {
        self.push(title, href, false)
    }

    /// Like [`offer`](Self::offer), but rejects a URL that is already
    /// collected.
    pub fn offer_unseen(&mut self, title: &str, href: &str) -> bool {
        self.push(title, href, true)
    }

    fn push(&mut self, title: &str, href: &str, reject_collected: bool) -> bool {
        if self.items.len() >= MAX_ITEMS {
            return false;
        }
        let title = clean_title(title);
        if title.is_empty() {
            return false;
        }
        let Some(url) = resolve_url(self.origin, href) else {
            return false;
        };
        if reject_collected && self.collected_urls.contains(&url) {
            return false;
        }

        if let Some(dedup) = &mut self.dedup {
            if dedup.seen_urls.contains(&url) || dedup.seen_titles.contains(&title) {
                return false;
            }
            if !url.contains(&dedup.required_fragment) {
                return false;
            }
            dedup.seen_urls.insert(url.clone());
            dedup.seen_titles.insert(title.clone());
        }

        self.collected_urls.insert(url.clone());
        self.items.push(NewsItem { title, url });
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<NewsItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_offer_requires_title_and_href() {
        let origin = origin();
        let mut collector = ItemCollector::new(&origin);
        assert!(!collector.offer("   ", "/a"));
        assert!(!collector.offer("Başlık", ""));
        assert!(collector.offer("  Başlık ", "/ekonomi/article-1"));
        assert_eq!(
            collector.into_items(),
            vec![NewsItem::new("Başlık", "https://example.com/ekonomi/article-1")]
        );
    }

    #[test]
    fn test_plain_collector_keeps_duplicates() {
        let origin = origin();
        let mut collector = ItemCollector::new(&origin);
        assert!(collector.offer("Aynı", "/a"));
        assert!(collector.offer("Aynı", "/a"));
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_offer_unseen_skips_collected_urls() {
        let origin = origin();
        let mut collector = ItemCollector::new(&origin);
        assert!(collector.offer("Kart başlığı", "/spor/1"));
        assert!(!collector.offer_unseen("Aynı haberin bağlantısı", "https://example.com/spor/1"));
        assert!(collector.offer_unseen("Yeni haber", "/spor/2"));
        assert!(!collector.offer_unseen("Yeni haber tekrar", "/spor/2"));
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let origin = origin();
        let mut collector = ItemCollector::deduplicating(&origin, "guncel");
        assert!(collector.offer("İlk", "/guncel/1"));
        // same absolute URL, different title
        assert!(!collector.offer("İkinci", "https://example.com/guncel/1"));
        // same title, different URL
        assert!(!collector.offer("İlk", "/guncel/2"));
        assert!(collector.offer("Üçüncü", "/guncel/3"));
        let items = collector.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], NewsItem::new("İlk", "https://example.com/guncel/1"));
    }

    #[test]
    fn test_dedup_requires_category_fragment() {
        let origin = origin();
        let mut collector = ItemCollector::deduplicating(&origin, "spor");
        assert!(!collector.offer("Ekonomi haberi", "/ekonomi/1"));
        // a rejected item does not poison the seen sets
        assert!(collector.offer("Ekonomi haberi", "/spor/ekonomi-1"));
    }

    #[test]
    fn test_collector_is_capped() {
        let origin = origin();
        let mut collector = ItemCollector::new(&origin);
        for i in 0..40 {
            collector.offer(&format!("Haber {i}"), &format!("/h/{i}"));
        }
        assert_eq!(collector.len(), MAX_ITEMS);
    }
}
