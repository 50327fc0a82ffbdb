// src/report.rs
// =============================================================================
// Writes the crawl result.
//
// Line format (the default), one line per target in input order:
//   report.pdf https://example.edu https://example.edu/news
//   missing.pdf ORPHAN-LINK
//
// JSON format (--json):
//   [{ "document": "report.pdf", "referrers": [...], "orphan": false }, ...]
// =============================================================================

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::crawl::CrawlResult;

/// Printed instead of referrers for a document nothing links to.
pub const ORPHAN_MARKER: &str = "ORPHAN-LINK";

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "document_sources.output";

pub fn render_lines(result: &CrawlResult) -> String {
    let mut out = String::new();
    for doc in result.documents() {
        out.push_str(doc.document);
        if doc.orphan {
            out.push(' ');
            out.push_str(ORPHAN_MARKER);
        } else {
            for page in &doc.referrers {
                out.push(' ');
                out.push_str(page);
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_json(result: &CrawlResult) -> Result<String> {
    let docs: Vec<_> = result.documents().collect();
    let json = serde_json::to_string_pretty(&docs)?;
    Ok(json)
}

// Writes the report to `destination`, or to stdout when it is "-"
pub fn write_report(result: &CrawlResult, destination: &Path, json: bool) -> Result<()> {
    let mut rendered = if json {
        render_json(result)?
    } else {
        render_lines(result)
    };
    if json {
        rendered.push('\n');
    }

    if destination == Path::new("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    fs::write(destination, rendered)
        .with_context(|| format!("failed to write report to {}", destination.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::TargetDocuments;

    fn sample() -> CrawlResult {
        let mut docs = TargetDocuments::new(["report.pdf", "missing.pdf", "guide.docx"]);
        docs.record("report.pdf", "https://example.edu");
        docs.record("guide.docx", "https://example.edu/b");
        docs.record("guide.docx", "https://example.edu/a");
        CrawlResult::new(docs, Default::default())
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(
            render_lines(&sample()),
            "report.pdf https://example.edu\n\
             missing.pdf ORPHAN-LINK\n\
             guide.docx https://example.edu/b https://example.edu/a\n"
        );
    }

    #[test]
    fn test_render_json() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json[1]["document"], "missing.pdf");
        assert_eq!(json[1]["orphan"], true);
        assert_eq!(json[2]["referrers"][1], "https://example.edu/a");
    }

    #[test]
    fn test_empty_result_renders_nothing() {
        let result = CrawlResult::new(TargetDocuments::default(), Default::default());
        assert_eq!(render_lines(&result), "");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);

        write_report(&sample(), &path, false).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("report.pdf https://example.edu\n"));
    }
}
