// src/crawl/result.rs
// =============================================================================
// The immutable outcome of one crawl run.
//
// Once the frontier is empty the engine hands back the target documents
// (with their referrer sets) plus a few counters that main logs at the end.
// =============================================================================

use serde::Serialize;

use super::matcher::TargetDocuments;

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages whose body was downloaded and parsed
    pub pages_visited: usize,
    /// Pages that failed to download (network error or non-2xx)
    pub pages_failed: usize,
    /// Raw hrefs seen across all visited pages
    pub links_seen: usize,
    /// HEAD requests issued (seeds included)
    pub probes: usize,
    /// Link occurrences that matched a target document
    pub matches: usize,
    /// Distinct URLs accepted into the crawl (pages + matched documents)
    pub urls_identified: usize,
}

/// One line of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport<'a> {
    pub document: &'a str,
    pub referrers: Vec<&'a str>,
    pub orphan: bool,
}

#[derive(Debug, Clone)]
pub struct CrawlResult {
    documents: TargetDocuments,
    stats: CrawlStats,
}

impl CrawlResult {
    pub(crate) fn new(documents: TargetDocuments, stats: CrawlStats) -> Self {
        Self { documents, stats }
    }

    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    // One entry per target filename, in input order
    pub fn documents(&self) -> impl Iterator<Item = DocumentReport<'_>> {
        self.documents.iter().map(|(name, pages)| DocumentReport {
            document: name,
            referrers: pages.iter().map(String::as_str).collect(),
            orphan: pages.is_empty(),
        })
    }

    #[cfg(test)]
    pub fn referrers(&self, filename: &str) -> Option<Vec<&str>> {
        self.documents
            .referrers(filename)
            .map(|pages| pages.iter().map(String::as_str).collect())
    }

    /// Number of target documents no page links to.
    pub fn orphans(&self) -> usize {
        self.documents.iter().filter(|(_, pages)| pages.is_empty()).count()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }
}
