// src/page/mod.rs
// =============================================================================
// This module contains everything that touches a web page directly.
//
// Submodules:
// - http: HEAD probes and page downloads (the PageSource trait + reqwest impl)
// - html: Extracts raw hrefs from a downloaded page
//
// The crawl engine only sees the items re-exported here.
// =============================================================================

mod html;
mod http;

pub use html::extract_links;
pub use http::{
    ContentKind, FetchError, HttpConfig, HttpPageSource, PageSource, DEFAULT_USER_AGENT,
};

#[cfg(test)]
pub use http::FetchedPage;
