//! HTML-backed sources.
//!
//! A [`PageSource`] downloads a category page and runs an ordered list of
//! extraction [`Strategy`] objects over it. Primary strategies always run;
//! fallback strategies only run while fewer than [`FALLBACK_THRESHOLD`] items
//! have been collected, and they add to what is already there rather than
//! replacing it.
//!
//! Unlike feed sources, page sources report fetch failures and invalid
//! category numbers as errors. Finding nothing on the page is not an error.
//!
//! Selectors are hard-coded per source (see [`crate::sources::catalog`]);
//! when an outlet redesigns its markup the matching strategies simply stop
//! producing items.

use crate::error::SourceError;
use crate::http::fetch_text;
use crate::models::{CategoryIndex, NewsItem};
use crate::sources::NewsSource;
use crate::sources::category::{CategoryTable, Resolved};
use crate::sources::collector::ItemCollector;
use crate::utils::clean_title;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Fallback strategies run only while fewer items than this were found.
pub const FALLBACK_THRESHOLD: usize = 10;

/// Anchor sweeps keep titles strictly longer than this many characters...
pub const MIN_SWEEP_TITLE_CHARS: usize = 10;
/// ...and strictly shorter than this many.
pub const MAX_SWEEP_TITLE_CHARS: usize = 200;

/// When a strategy is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Fallback,
}

/// A `(title, href)` pair found in markup, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub href: String,
}

/// Per-fetch information a strategy may need.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// The category's URL path fragment, e.g. `ekonomi`.
    pub category_path: &'a str,
}

/// One way of pulling candidate items out of a parsed page.
pub trait Strategy: Send + Sync + fmt::Debug {
    fn tier(&self) -> Tier;

    /// Short description for logs.
    fn describe(&self) -> String;

    fn candidates(
        &self,
        document: &Html,
        ctx: &PageContext<'_>,
    ) -> Result<Vec<Candidate>, SourceError>;
}

fn parse_selector(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector).map_err(|e| SourceError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Where a card's title comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSource {
    /// Text of the first descendant matching the selector.
    Select(&'static str),
    /// The container's whole text.
    OwnText,
    /// The container's text up to a "read more" marker.
    OwnTextBefore(&'static str),
}

/// Where a card's link comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSource {
    /// The container is the anchor.
    Own,
    /// The first descendant matching the selector.
    First(&'static str),
}

/// Select containers, then read a title and a link inside each one.
#[derive(Debug, Clone)]
pub struct CardStrategy {
    tier: Tier,
    container: &'static str,
    title: TitleSource,
    link: LinkSource,
}

impl CardStrategy {
    pub fn primary(container: &'static str, title: TitleSource, link: LinkSource) -> Self {
        Self {
            tier: Tier::Primary,
            container,
            title,
            link,
        }
    }

    pub fn fallback(container: &'static str, title: TitleSource, link: LinkSource) -> Self {
        Self {
            tier: Tier::Fallback,
            container,
            title,
            link,
        }
    }
}

impl Strategy for CardStrategy {
    fn tier(&self) -> Tier {
        self.tier
    }

    fn describe(&self) -> String {
        format!("cards `{}`", self.container)
    }

    fn candidates(
        &self,
        document: &Html,
        _ctx: &PageContext<'_>,
    ) -> Result<Vec<Candidate>, SourceError> {
        let container = parse_selector(self.container)?;
        let title_selector = match &self.title {
            TitleSource::Select(s) => Some(parse_selector(s)?),
            _ => None,
        };
        let link_selector = match &self.link {
            LinkSource::First(s) => Some(parse_selector(s)?),
            LinkSource::Own => None,
        };

        let mut out = Vec::new();
        for card in document.select(&container) {
            let href = match &link_selector {
                Some(sel) => card.select(sel).next().and_then(|a| a.value().attr("href")),
                None => card.value().attr("href"),
            };
            let Some(href) = href else {
                continue;
            };

            let title = match (&self.title, &title_selector) {
                (TitleSource::Select(_), Some(sel)) => {
                    card.select(sel).next().map(element_text).unwrap_or_default()
                }
                (TitleSource::OwnTextBefore(marker), _) => {
                    let text = element_text(card);
                    text.split(marker).next().unwrap_or_default().to_string()
                }
                _ => element_text(card),
            };

            out.push(Candidate {
                title,
                href: href.to_string(),
            });
        }
        Ok(out)
    }
}

/// Catch-all: every anchor whose `href` contains the category path, with a
/// title of plausible headline length.
#[derive(Debug, Clone)]
pub struct AnchorSweep {
    tier: Tier,
}

impl AnchorSweep {
    pub fn fallback() -> Self {
        Self {
            tier: Tier::Fallback,
        }
    }

    fn title_fits(title: &str) -> bool {
        let chars = title.chars().count();
        chars > MIN_SWEEP_TITLE_CHARS && chars < MAX_SWEEP_TITLE_CHARS
    }
}

impl Strategy for AnchorSweep {
    fn tier(&self) -> Tier {
        self.tier
    }

    fn describe(&self) -> String {
        "anchor sweep".to_string()
    }

    fn candidates(
        &self,
        document: &Html,
        ctx: &PageContext<'_>,
    ) -> Result<Vec<Candidate>, SourceError> {
        let fragment = ctx.category_path.replace('"', "");
        let selector = parse_selector(&format!("a[href*=\"{fragment}\"]"))?;

        Ok(document
            .select(&selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                let title = clean_title(&element_text(anchor));
                Self::title_fits(&title).then(|| Candidate {
                    title,
                    href: href.to_string(),
                })
            })
            .collect())
    }
}

/// A news source scraped from per-category HTML pages.
#[derive(Debug)]
pub struct PageSource {
    name: String,
    origin: Url,
    categories: CategoryTable<String>,
    trailing_slash: bool,
    strategies: Vec<Box<dyn Strategy>>,
    deduplicate: bool,
}

impl PageSource {
    /// A source whose category pages live at `{origin}/{path}/`.
    pub fn new(name: impl Into<String>, origin: Url, categories: CategoryTable<String>) -> Self {
        Self {
            name: name.into(),
            origin,
            categories,
            trailing_slash: true,
            strategies: Vec::new(),
            deduplicate: false,
        }
    }

    pub fn without_trailing_slash(mut self) -> Self {
        self.trailing_slash = false;
        self
    }

    pub fn strategy(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Suppress repeated URLs and titles, and require the category path in
    /// every URL.
    pub fn deduplicating(mut self) -> Self {
        self.deduplicate = true;
        self
    }

    pub fn page_url(&self, category_path: &str) -> String {
        let base = self.origin.as_str().trim_end_matches('/');
        let path = category_path.trim_matches('/');
        if self.trailing_slash {
            format!("{base}/{path}/")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Run every eligible strategy over `html` and collect normalized items.
    pub fn extract(&self, html: &str, category_path: &str) -> Result<Vec<NewsItem>, SourceError> {
        let document = Html::parse_document(html);
        let ctx = PageContext { category_path };
        let mut collector = if self.deduplicate {
            ItemCollector::deduplicating(&self.origin, category_path)
        } else {
            ItemCollector::new(&self.origin)
        };

        for strategy in &self.strategies {
            if strategy.tier() == Tier::Fallback && collector.len() >= FALLBACK_THRESHOLD {
                debug!(strategy = %strategy.describe(), found = collector.len(), "Skipping fallback");
                continue;
            }
            let before = collector.len();
            let candidates = strategy.candidates(&document, &ctx)?;
            let seen = candidates.len();
            for candidate in candidates {
                match strategy.tier() {
                    Tier::Primary => collector.offer(&candidate.title, &candidate.href),
                    // a fallback never repeats an article an earlier strategy kept
                    Tier::Fallback => collector.offer_unseen(&candidate.title, &candidate.href),
                };
            }
            debug!(
                strategy = %strategy.describe(),
                candidates = seen,
                added = collector.len() - before,
                "Applied strategy"
            );
        }

        Ok(collector.into_items())
    }
}

#[async_trait]
impl NewsSource for PageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn categories(&self) -> &[String] {
        self.categories.labels()
    }

    #[instrument(level = "info", skip(self), fields(source = %self.name))]
    async fn fetch_news(&self, category: CategoryIndex) -> Result<Vec<NewsItem>, SourceError> {
        let (label, path) = match self.categories.resolve(category) {
            Resolved::Target { label, target } => (label, target.as_str()),
            Resolved::OutOfRange => return Err(SourceError::InvalidCategoryIndex(category)),
            Resolved::Unmapped(label) => {
                warn!(%label, "No page path for category; returning empty results");
                return Ok(Vec::new());
            }
        };

        let url = self.page_url(path);
        debug!(%url, %label, "Fetching category page");
        let html = fetch_text(&url).await?;
        let items = self.extract(&html, path)?;

        if items.is_empty() {
            info!(%label, %category, "No news found");
        } else {
            info!(count = items.len(), %label, "Fetched page items");
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_ITEMS;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    fn table() -> CategoryTable<String> {
        CategoryTable::from_pairs([("EKONOMİ", "ekonomi".to_string()), ("SPOR", "spor".to_string())])
    }

    /// Card strategy on `div.card` with a catch-all sweep as fallback.
    fn sweeping_source(origin: Url) -> PageSource {
        PageSource::new("Example", origin, table())
            .strategy(CardStrategy::primary(
                "div.card",
                TitleSource::Select("h3"),
                LinkSource::First("a"),
            ))
            .strategy(AnchorSweep::fallback())
    }

    fn cards(n: usize, prefix: &str) -> String {
        (0..n)
            .map(|i| {
                format!(
                    r#"<div class="card"><a href="/ekonomi/{prefix}-{i}">oku</a><h3> {prefix} başlık {i} </h3></div>"#
                )
            })
            .collect()
    }

    #[test]
    fn test_page_url() {
        let source = sweeping_source(origin());
        assert_eq!(source.page_url("ekonomi"), "https://example.com/ekonomi/");
        let source = source.without_trailing_slash();
        assert_eq!(source.page_url("ekonomi"), "https://example.com/ekonomi");
    }

    #[test]
    fn test_card_strategy_resolves_relative_links() {
        let html = format!("<html><body>{}</body></html>", cards(2, "haber"));
        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        // 2 cards plus the sweep, which re-finds the same anchors with short titles
        assert_eq!(
            items[..2],
            [
                NewsItem::new("haber başlık 0", "https://example.com/ekonomi/haber-0"),
                NewsItem::new("haber başlık 1", "https://example.com/ekonomi/haber-1"),
            ]
        );
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_card_without_title_or_link_is_skipped() {
        let html = r#"<div class="card"><a href="/ekonomi/a"></a><h3>  </h3></div>
                      <div class="card"><h3>Linksiz kart</h3></div>"#;
        let source = PageSource::new("Example", origin(), table()).strategy(CardStrategy::primary(
            "div.card",
            TitleSource::Select("h3"),
            LinkSource::First("a"),
        ));
        assert!(source.extract(html, "ekonomi").unwrap().is_empty());
    }

    #[test]
    fn test_sweep_fills_in_when_primary_finds_nothing() {
        // 12 anchors into the category, 10 with headline-length titles
        let mut html = String::from("<html><body><nav>");
        for i in 0..10 {
            html.push_str(&format!(r#"<a href="/ekonomi/haber-{i}">Ekonomide önemli gelişme {i}</a>"#));
        }
        html.push_str(r#"<a href="/ekonomi/kisa">Kısa</a>"#);
        html.push_str(&format!(r#"<a href="/ekonomi/uzun">{}</a>"#, "u".repeat(250)));
        html.push_str(r#"<a href="/spor/baska">Spor sayfasına giden uzun bağlantı</a>"#);
        html.push_str("</nav></body></html>");

        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(
            items[0],
            NewsItem::new("Ekonomide önemli gelişme 0", "https://example.com/ekonomi/haber-0")
        );
    }

    #[test]
    fn test_fallback_skipped_once_threshold_met() {
        let mut html = cards(FALLBACK_THRESHOLD, "kart");
        html.push_str(r#"<a href="/ekonomi/ekstra">Ek bir ekonomi haberi başlığı</a>"#);
        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        assert_eq!(items.len(), FALLBACK_THRESHOLD);
        assert!(items.iter().all(|i| !i.url.ends_with("ekstra")));
    }

    #[test]
    fn test_fallback_supplements_below_threshold() {
        let mut html = cards(3, "kart");
        html.push_str(r#"<a href="/ekonomi/ekstra">Ek bir ekonomi haberi başlığı</a>"#);
        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "kart başlık 0");
        assert_eq!(items[3].url, "https://example.com/ekonomi/ekstra");
    }

    #[test]
    fn test_fallback_does_not_repeat_collected_urls() {
        // the card's own anchor carries a headline-length title the sweep would accept
        let html: String = (0..3)
            .map(|i| {
                format!(
                    r#"<div class="card"><a href="/ekonomi/haber-{i}">Ekonomide önemli gelişme {i}</a><h3>Kart başlığı {i}</h3></div>"#
                )
            })
            .collect();
        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.title.starts_with("Kart başlığı")));
    }

    #[test]
    fn test_own_text_before_marker() {
        let html = r#"<div class="feed"><a href="/politika/x">Meclis yeni yasayı kabul etti…..devamı</a></div>"#;
        let source = PageSource::new("Example", origin(), table()).strategy(CardStrategy::primary(
            "div.feed",
            TitleSource::OwnTextBefore("…..devamı"),
            LinkSource::First("a"),
        ));
        let items = source.extract(html, "politika").unwrap();
        assert_eq!(
            items,
            vec![NewsItem::new("Meclis yeni yasayı kabul etti", "https://example.com/politika/x")]
        );
    }

    #[test]
    fn test_container_as_anchor() {
        let html = r#"<a class="slide" href="https://cdn.example.com/ekonomi/1"><span class="t">Manşet</span></a>"#;
        let source = PageSource::new("Example", origin(), table()).strategy(CardStrategy::primary(
            "a.slide",
            TitleSource::Select(".t"),
            LinkSource::Own,
        ));
        let items = source.extract(html, "ekonomi").unwrap();
        assert_eq!(items, vec![NewsItem::new("Manşet", "https://cdn.example.com/ekonomi/1")]);
    }

    #[test]
    fn test_dedup_across_strategies_keeps_earlier() {
        let html = r#"
            <div class="slide"><a href="/ekonomi/1"><h2>Aynı başlık</h2></a></div>
            <div class="card"><a href="/ekonomi/1"></a><h3>Farklı başlık</h3></div>
            <div class="card"><a href="/ekonomi/2"></a><h3>Aynı başlık</h3></div>
            <div class="card"><a href="/spor/3"></a><h3>Kategori dışı</h3></div>
            <div class="card"><a href="/ekonomi/4"></a><h3>Yeni başlık</h3></div>
        "#;
        let source = PageSource::new("Example", origin(), table())
            .strategy(CardStrategy::primary("div.slide", TitleSource::Select("h2"), LinkSource::First("a")))
            .strategy(CardStrategy::primary("div.card", TitleSource::Select("h3"), LinkSource::First("a")))
            .deduplicating();
        let items = source.extract(html, "ekonomi").unwrap();
        assert_eq!(
            items,
            vec![
                NewsItem::new("Aynı başlık", "https://example.com/ekonomi/1"),
                NewsItem::new("Yeni başlık", "https://example.com/ekonomi/4"),
            ]
        );
    }

    #[test]
    fn test_results_capped() {
        let html = cards(45, "kart");
        let items = sweeping_source(origin()).extract(&html, "ekonomi").unwrap();
        assert_eq!(items.len(), MAX_ITEMS);
    }

    #[test]
    fn test_bad_selector_is_reported() {
        let source = PageSource::new("Example", origin(), table()).strategy(CardStrategy::primary(
            "div[",
            TitleSource::OwnText,
            LinkSource::Own,
        ));
        assert!(matches!(
            source.extract("<p></p>", "ekonomi"),
            Err(SourceError::Selector { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_category_is_an_error() {
        let source = sweeping_source(origin());
        for n in [0, 3, -1] {
            match source.fetch_news(CategoryIndex::number(n)).await {
                Err(SourceError::InvalidCategoryIndex(index)) => assert_eq!(index.get(), n),
                other => panic!("expected invalid category error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_news_end_to_end() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spor/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("<html><body>{}</body></html>", cards(3, "maç")))
                    .insert_header("Content-Type", "text/html; charset=utf-8"),
            )
            .mount(&mock_server)
            .await;

        let source = sweeping_source(Url::parse(&mock_server.uri()).unwrap());
        let items = source.fetch_news(CategoryIndex::number(2)).await.unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].url.starts_with(&mock_server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ekonomi/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let source = sweeping_source(Url::parse(&mock_server.uri()).unwrap());
        let err = source.fetch_news(CategoryIndex::number(1)).await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let source = sweeping_source(Url::parse("http://127.0.0.1:9").unwrap());
        let err = source.fetch_news(CategoryIndex::number(1)).await.unwrap_err();
        assert!(matches!(err, SourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_empty_page_is_not_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ekonomi/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let source = sweeping_source(Url::parse(&mock_server.uri()).unwrap());
        assert!(source.fetch_news(CategoryIndex::number(1)).await.unwrap().is_empty());
    }
}
