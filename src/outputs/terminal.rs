//! Plain-text rendering for interactive use.

use crate::models::NewsItem;
use std::io::{self, Write};

/// Print a numbered menu, one entry per line.
pub fn write_menu<W: Write, S: AsRef<str>>(out: &mut W, heading: &str, entries: &[S]) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, entry.as_ref())?;
    }
    Ok(())
}

/// Print the headline list for one source and category.
pub fn write_items<W: Write>(out: &mut W, source: &str, category: &str, items: &[NewsItem]) -> io::Result<()> {
    writeln!(out, "{source} - news from {category}:")?;
    if items.is_empty() {
        writeln!(out, "No news found in this category.")?;
        return Ok(());
    }
    for item in items {
        writeln!(out, "{}: {}", item.title, item.url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_menu_numbers_from_one() {
        let mut buf = Vec::new();
        write_menu(&mut buf, "Sources:", &["GZT.com", "NTV"]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Sources:\n1. GZT.com\n2. NTV\n");
    }

    #[test]
    fn test_write_items() {
        let mut buf = Vec::new();
        let items = [NewsItem::new("Başlık", "https://example.com/a")];
        write_items(&mut buf, "NTV", "SPOR", &items).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "NTV - news from SPOR:\nBaşlık: https://example.com/a\n"
        );
    }

    #[test]
    fn test_write_items_empty() {
        let mut buf = Vec::new();
        write_items(&mut buf, "NTV", "SPOR", &[]).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("No news found in this category.\n"));
    }
}
