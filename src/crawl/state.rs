// src/crawl/state.rs
// =============================================================================
// All mutable bookkeeping for one crawl run, owned by the engine.
//
// - frontier:   FIFO queue of pages still to download (breadth-first order)
// - identified: every URL ever accepted (enqueued pages + matched documents)
// - visited:    pages whose body was actually downloaded and parsed
// - skipped:    URLs found unusable this run (probe failed, or neither HTML
//               nor a target document), so they are never probed again
// - documents:  matched document URL -> target filename, so a second page
//               linking the same document is recorded without a new probe
//
// Invariants:
// - every URL that enters the frontier is in `identified`, and a URL enters
//   the frontier at most once (enqueue() checks and inserts in one step)
// - visited is a subset of identified
//
// Rust concepts:
// - VecDeque: push_back() + pop_front() = FIFO queue
// - HashSet::insert returns false when the value was already there
// =============================================================================

use std::collections::{HashMap, HashSet, VecDeque};

// A page waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlItem {
    pub url: String,
    pub depth: usize, // 1 = seed page
}

#[derive(Debug, Default)]
pub struct CrawlState {
    frontier: VecDeque<CrawlItem>,
    identified: HashSet<String>,
    visited: HashSet<String>,
    skipped: HashSet<String>,
    documents: HashMap<String, String>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    // Appends a page to the frontier if it was never identified before
    // Returns false (and changes nothing) for a known URL.
    pub fn enqueue(&mut self, url: &str, depth: usize) -> bool {
        if !self.identified.insert(url.to_string()) {
            return false;
        }
        self.frontier.push_back(CrawlItem {
            url: url.to_string(),
            depth,
        });
        true
    }

    pub fn next(&mut self) -> Option<CrawlItem> {
        self.frontier.pop_front()
    }

    #[cfg(test)]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_identified(&self, url: &str) -> bool {
        self.identified.contains(url)
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    // Returns true the first time a page is marked
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    // Marks a document URL as identified without ever enqueueing it
    pub fn mark_matched(&mut self, url: &str, filename: &str) {
        self.identified.insert(url.to_string());
        self.documents.insert(url.to_string(), filename.to_string());
    }

    pub fn matched_document(&self, url: &str) -> Option<&str> {
        self.documents.get(url).map(String::as_str)
    }

    pub fn mark_skipped(&mut self, url: &str) {
        self.skipped.insert(url.to_string());
    }

    pub fn is_skipped(&self, url: &str) -> bool {
        self.skipped.contains(url)
    }

    #[cfg(test)]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn identified_count(&self) -> usize {
        self.identified.len()
    }
}
