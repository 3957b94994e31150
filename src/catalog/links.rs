//! Anchor extraction from raw HTML.

use scraper::{Html, Selector};

/// Return the `href` of every `<a>` element in document order, duplicates included.
///
/// The body is decoded as lossy UTF-8 and parsed with the tolerant HTML5 parser, so
/// malformed markup yields whatever anchors the parser recovers. Anchors without an
/// `href` are skipped.
pub fn extract_links(html: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(html);
    let doc = Html::parse_document(&text);
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    doc.select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .map(String::from)
        .collect()
}

/// Keep links whose text contains `marker` (case-sensitive substring, not a suffix test).
pub fn filter_containing(links: Vec<String>, marker: &str) -> Vec<String> {
    links.into_iter().filter(|l| l.contains(marker)).collect()
}
