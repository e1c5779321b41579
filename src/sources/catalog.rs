//! The built-in news outlets and their category tables.
//!
//! | Source | Kind | Notes |
//! |--------|------|-------|
//! | GZT.com | page | card text cut at "devamı" |
//! | Hurriyet.com.tr | page | category list, older card layout as fallback |
//! | Sozcu.com.tr | page | list rows, older layout and anchor sweep as fallback |
//! | Milliyet.com.tr | page | slider and category cards, list cards as fallback |
//! | Haberler.com | page | four strategies, deduplicated |
//! | CNN Türk | feed | RSS, rebuilds missing article links from the guid |
//! | NTV | feed | Atom first, RSS second |
//! | Habertürk | feed | RSS |

use crate::error::SourceError;
use crate::sources::NewsSource;
use crate::sources::category::CategoryTable;
use crate::sources::feed::{FeedFormat, FeedSource, FeedTarget, LinkFallback};
use crate::sources::page::{AnchorSweep, CardStrategy, LinkSource, PageSource, TitleSource};
use url::Url;

/// Label → path fragment table for page sources.
fn page_table(pairs: &[(&str, &str)]) -> CategoryTable<String> {
    CategoryTable::from_pairs(pairs.iter().map(|(label, path)| (*label, path.to_string())))
}

pub fn gzt() -> Result<PageSource, SourceError> {
    let labels = ["POLITIKA", "DUNYA", "EKONOMI", "BILIM", "GUNCEL", "AKTUEL-KULTUR", "SAGLIK"];
    let table = CategoryTable::from_pairs(labels.iter().map(|l| (*l, l.to_lowercase())));
    Ok(
        PageSource::new("GZT.com", Url::parse("https://www.gzt.com")?, table)
            .without_trailing_slash()
            .strategy(CardStrategy::primary(
                ".feed-card-content.news-card-content",
                TitleSource::OwnTextBefore("…..devamı"),
                LinkSource::First("a"),
            )),
    )
}

pub fn hurriyet() -> Result<PageSource, SourceError> {
    let table = page_table(&[
        ("GÜNDEM", "gundem"),
        ("DÜNYA", "dunya"),
        ("EKONOMİ", "ekonomi"),
        ("SPOR", "spor"),
        ("TEKNOLOJİ", "teknoloji"),
        ("SAĞLIK", "saglik"),
        ("YAŞAM", "yasam"),
    ]);
    Ok(
        PageSource::new("Hurriyet.com.tr", Url::parse("https://www.hurriyet.com.tr")?, table)
            .strategy(CardStrategy::primary(
                "div.category__list__item",
                TitleSource::Select("h2"),
                LinkSource::First("a[href]"),
            ))
            .strategy(CardStrategy::fallback(
                "div.news-card",
                TitleSource::Select("h3.news-card__title"),
                LinkSource::First("a.news-card__link"),
            )),
    )
}

pub fn sozcu() -> Result<PageSource, SourceError> {
    let table = page_table(&[
        ("GÜNDEM", "gundem"),
        ("DÜNYA", "dunya"),
        ("EKONOMİ", "ekonomi"),
        ("SPOR", "spor"),
        ("FİNANS", "finans"),
        ("YAŞAM", "yasam"),
        ("SAĞLIK", "saglik"),
    ]);
    Ok(
        PageSource::new("Sozcu.com.tr", Url::parse("https://www.sozcu.com.tr")?, table)
            .strategy(CardStrategy::primary(
                ".list-content .row",
                TitleSource::Select("span.d-block.fs-5.fw-semibold"),
                LinkSource::First("a"),
            ))
            .strategy(CardStrategy::fallback(
                "div.news-item",
                TitleSource::Select("h3.news-item__title"),
                LinkSource::First("a.news-item__link"),
            ))
            .strategy(AnchorSweep::fallback()),
    )
}

pub fn milliyet() -> Result<PageSource, SourceError> {
    let table = page_table(&[
        ("GÜNDEM", "gundem"),
        ("DÜNYA", "dunya"),
        ("EKONOMİ", "ekonomi"),
        ("SPOR", "spor"),
        ("TEKNOLOJİ", "teknoloji"),
    ]);
    Ok(
        PageSource::new("Milliyet.com.tr", Url::parse("https://www.milliyet.com.tr")?, table)
            .strategy(CardStrategy::primary(
                ".cat-slider__link",
                TitleSource::Select(".cat-slider__title"),
                LinkSource::Own,
            ))
            .strategy(CardStrategy::primary(
                ".category-card",
                TitleSource::Select(".category-card__head"),
                LinkSource::Own,
            ))
            .strategy(CardStrategy::fallback(
                ".cat-list-card__link",
                TitleSource::Select(".cat-list-card__title"),
                LinkSource::Own,
            )),
    )
}

pub fn haberler_com() -> Result<PageSource, SourceError> {
    let table = page_table(&[
        ("GÜNDEM", "guncel"),
        ("DÜNYA", "dunya"),
        ("EKONOMİ", "ekonomi"),
        ("SPOR", "spor"),
        ("SAĞLIK", "saglik"),
        ("TEKNOLOJİ", "teknoloji"),
    ]);
    Ok(
        PageSource::new("Haberler.com", Url::parse("https://www.haberler.com")?, table)
            .strategy(CardStrategy::primary(
                ".new3slide",
                TitleSource::Select(".new3caption h2"),
                LinkSource::First("a"),
            ))
            .strategy(CardStrategy::primary(
                ".new3card",
                TitleSource::Select(".new3card-body h3"),
                LinkSource::First("a"),
            ))
            .strategy(CardStrategy::fallback(
                "div.hblnBox, article.box, .news-item",
                TitleSource::Select("a.hblnTitle, h3, .news-title"),
                LinkSource::First("a"),
            ))
            .strategy(AnchorSweep::fallback())
            .deduplicating(),
    )
}

pub fn cnn_turk() -> Result<FeedSource, SourceError> {
    let table = CategoryTable::from_pairs([
        ("GÜNDEM", FeedTarget::new("https://www.cnnturk.com/feed/rss/turkiye/news").with_article_path("turkiye")),
        ("DÜNYA", FeedTarget::new("https://www.cnnturk.com/feed/rss/dunya/news").with_article_path("dunya")),
        ("EKONOMİ", FeedTarget::new("https://www.cnnturk.com/feed/rss/ekonomi/news").with_article_path("ekonomi")),
        ("SPOR", FeedTarget::new("https://www.cnnturk.com/feed/rss/spor/news").with_article_path("spor")),
        ("SAĞLIK", FeedTarget::new("https://www.cnnturk.com/feed/rss/saglik/news").with_article_path("saglik")),
        (
            "TEKNOLOJİ",
            FeedTarget::new("https://www.cnnturk.com/feed/rss/bilim-teknoloji/news")
                .with_article_path("bilim-teknoloji"),
        ),
    ]);
    Ok(FeedSource::new("CNN Türk", table).with_link_fallback(LinkFallback::Guid {
        origin: Url::parse("https://www.cnnturk.com")?,
    }))
}

pub fn ntv() -> FeedSource {
    let table = CategoryTable::from_pairs([
        ("SON DAKİKA", FeedTarget::new("https://www.ntv.com.tr/son-dakika.rss")),
        ("GÜNDEM", FeedTarget::new("https://www.ntv.com.tr/turkiye.rss")),
        ("DÜNYA", FeedTarget::new("https://www.ntv.com.tr/dunya.rss")),
        ("EKONOMİ", FeedTarget::new("https://www.ntv.com.tr/ekonomi.rss")),
        ("SPOR", FeedTarget::new("https://www.ntv.com.tr/spor.rss")),
        ("SAĞLIK", FeedTarget::new("https://www.ntv.com.tr/saglik.rss")),
        ("TEKNOLOJİ", FeedTarget::new("https://www.ntv.com.tr/teknoloji.rss")),
    ]);
    // the .rss endpoints actually serve Atom
    FeedSource::new("NTV", table).with_formats([FeedFormat::Atom, FeedFormat::Rss])
}

pub fn haberturk() -> FeedSource {
    let table = CategoryTable::from_pairs(
        [
            ("GÜNDEM", "gundem"),
            ("DÜNYA", "dunya"),
            ("EKONOMİ", "ekonomi"),
            ("SPOR", "spor"),
            ("SAĞLIK", "saglik"),
            ("TEKNOLOJİ", "teknoloji"),
        ]
        .map(|(label, slug)| {
            (
                label,
                FeedTarget::new(format!("https://www.haberturk.com/rss/kategori/{slug}.xml")),
            )
        }),
    );
    FeedSource::new("Habertürk", table)
}

/// Every built-in source, in menu order.
pub fn all() -> Result<Vec<Box<dyn NewsSource>>, SourceError> {
    Ok(vec![
        Box::new(gzt()?),
        Box::new(hurriyet()?),
        Box::new(sozcu()?),
        Box::new(milliyet()?),
        Box::new(haberler_com()?),
        Box::new(cnn_turk()?),
        Box::new(ntv()),
        Box::new(haberturk()),
    ])
}
