//! Text and URL helpers shared by the feed and page sources.
//!
//! - Title cleanup (whitespace, CDATA markers)
//! - Absolute URL resolution against a source origin
//! - Log-friendly truncation

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a headline.
///
/// Trims surrounding whitespace, strips CDATA markers that survived parsing
/// (some feeds escape them) and collapses inner whitespace runs to a single
/// space. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use haberler_plus::utils::clean_title;
///
/// assert_eq!(clean_title("  <![CDATA[ Son dakika ]]>\n"), "Son dakika");
/// ```
pub fn clean_title(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = current
            .strip_prefix(CDATA_OPEN)
            .unwrap_or(current);
        let next = next.strip_suffix(CDATA_CLOSE).unwrap_or(next).trim();
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    WHITESPACE_RUN.replace_all(current, " ").into_owned()
}

/// Whether `s` already carries an http(s) scheme.
pub fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Resolve `href` to an absolute URL.
///
/// Absolute http(s) URLs are returned untouched; anything else is joined
/// onto `origin`. Returns `None` for an empty href or one that cannot be
/// joined.
pub fn resolve_url(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if has_http_scheme(href) {
        return Some(href.to_string());
    }
    origin
        .join(href)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|u| u.to_string())
}

/// Truncate a string for logging purposes.
///
/// Cuts on a character boundary, so multi-byte titles are safe.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
