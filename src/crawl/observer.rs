// src/crawl/observer.rs
// =============================================================================
// Extension points the crawl engine reports to.
//
// The engine itself never prints or logs. Instead it calls a CrawlObserver
// at a handful of well-defined moments (URL accepted, rejected, matched...).
// In the binary that observer is TracingObserver, which turns each event
// into a `tracing` event. Tests plug in an observer that just records calls.
//
// Rust concepts:
// - Traits with default methods: implementors override only what they need
// - Display on enums: human-readable rejection reasons for log lines
// =============================================================================

use std::fmt;

use tracing::{debug, info, warn};

use super::normalize::NormalizeError;
use crate::page::FetchError;

/// Why a link found on a page was not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The href could not be turned into a canonical URL
    Unparseable(NormalizeError),
    /// Already enqueued or matched earlier in this run
    AlreadyIdentified,
    /// Found unusable earlier in this run (failed probe, or not HTML)
    PreviouslySkipped,
    /// Host is not in the allowlist
    NotAllowedDomain(String),
    /// The HEAD probe failed
    ProbeFailed(FetchError),
    /// Not HTML and not one of the target documents
    NotHtml,
    /// An HTML page one hop beyond the configured maximum depth
    DepthLimit(usize),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unparseable(e) => write!(f, "unparseable: {}", e),
            Rejection::AlreadyIdentified => write!(f, "already identified"),
            Rejection::PreviouslySkipped => write!(f, "previously skipped"),
            Rejection::NotAllowedDomain(netloc) => write!(f, "outside allowed domains (netloc: {})", netloc),
            Rejection::ProbeFailed(e) => write!(f, "probe failed: {}", e),
            Rejection::NotHtml => write!(f, "not an HTML page or target document"),
            Rejection::DepthLimit(depth) => write!(f, "beyond max depth {}", depth),
        }
    }
}

pub trait CrawlObserver: Send {
    /// The allowlist was built from the seeds.
    fn domains_allowed(&mut self, _domains: &[&str]) {}

    /// A seed URL made it into the frontier.
    fn seed_accepted(&mut self, _url: &str) {}

    /// A link passed every check and was appended to the frontier.
    fn enqueued(&mut self, _url: &str, _referrer: &str) {}

    /// A link (or seed, with an empty referrer) was dropped.
    fn rejected(&mut self, _raw: &str, _referrer: &str, _reason: &Rejection) {}

    /// A link pointed at a target document.
    fn matched(&mut self, _document: &str, _url: &str, _referrer: &str) {}

    /// A page body was downloaded and its links extracted.
    fn visited(&mut self, _url: &str, _links: usize) {}

    /// A frontier page could not be downloaded.
    fn fetch_failed(&mut self, _url: &str, _error: &FetchError) {}
}

// Logs every crawl event through `tracing`
//
// Levels: rejections and enqueues are debug (there are thousands of them),
// visits and matches are info, failed downloads are warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn domains_allowed(&mut self, domains: &[&str]) {
        info!(?domains, "acceptable domain(s) to crawl");
    }

    fn seed_accepted(&mut self, url: &str) {
        info!(url, "seed added to frontier");
    }

    fn enqueued(&mut self, url: &str, referrer: &str) {
        debug!(url, referrer, "added to frontier");
    }

    fn rejected(&mut self, raw: &str, referrer: &str, reason: &Rejection) {
        debug!(link = raw, referrer, %reason, "link rejected");
    }

    fn matched(&mut self, document: &str, url: &str, referrer: &str) {
        info!(document, url, referrer, "document match");
    }

    fn visited(&mut self, url: &str, links: usize) {
        info!(url, links, "page crawled");
    }

    fn fetch_failed(&mut self, url: &str, error: &FetchError) {
        warn!(url, %error, "page download failed");
    }
}
