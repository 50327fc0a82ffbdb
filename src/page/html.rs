// src/page/html.rs
// =============================================================================
// This module pulls raw link targets out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker we do NOT resolve or filter anything here: the hrefs
// come back exactly as written (minus surrounding whitespace) and the crawl
// engine normalizes them against the page URL.
// =============================================================================

use scraper::{Html, Selector};

// Extracts every anchor's href from an HTML page
//
// Parameters:
//   body: the page HTML
//
// Returns: the raw href values in document order
//
// Example:
//   body = "<a href='../docs/a.pdf'>A</a><a name='top'></a>"
//   result = ["../docs/a.pdf"]
//
// The result is collected into a Vec on purpose: scraper's Html is not Send,
// so it must be dropped before the engine awaits its next network call.
pub fn extract_links(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);

    // "a[href]" means "all <a> tags that have an href attribute", so anchors
    // without one are skipped by the selector itself
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_raw_hrefs_in_order() {
        let html = r#"
            <a href="https://www.rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about/">About</a>
        "#;
        let links = extract_links(html);
        assert_eq!(links, vec!["https://www.rust-lang.org", "/docs", "../about/"]);
    }

    #[test]
    fn test_skip_anchor_without_href() {
        let html = r##"<a name="top">Top</a><a href="#top">Back</a>"##;
        assert_eq!(extract_links(html), vec!["#top"]);
    }

    #[test]
    fn test_ignores_non_anchor_links() {
        let html = r#"
            <link href="/style.css" rel="stylesheet">
            <img src="/logo.png">
            <a href="/files/report.pdf">Report</a>
        "#;
        assert_eq!(extract_links(html), vec!["/files/report.pdf"]);
    }

    #[test]
    fn test_trims_whitespace() {
        let html = "<a href=\"  /files/report.pdf\n\">Report</a>";
        assert_eq!(extract_links(html), vec!["/files/report.pdf"]);
    }

    #[test]
    fn test_duplicate_anchors_are_kept() {
        let html = r#"<a href="/a.pdf">1</a><a href="/a.pdf">2</a>"#;
        assert_eq!(extract_links(html).len(), 2);
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_links("").is_empty());
    }
}
