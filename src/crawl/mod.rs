// src/crawl/mod.rs
// =============================================================================
// This module handles the website crawl itself.
//
// Submodules (leaves first):
// - normalize: Turns any URL string into its canonical form
// - domain:    Allowlist of hosts we are allowed to crawl
// - matcher:   Target documents and their referring pages
// - state:     Frontier queue + identified / visited registries
// - observer:  Hooks the engine reports events to (logging lives there)
// - result:    The finished crawl, handed to the report writer
// - queue:     The breadth-first crawl engine that ties it all together
//
// Rust concepts:
// - Collections: HashSet for registries, VecDeque for the frontier
// - Traits: PageSource and CrawlObserver decouple the engine from I/O
// =============================================================================

mod domain;
mod matcher;
mod normalize;
mod observer;
mod queue;
mod result;
mod state;

pub use matcher::TargetDocuments;
pub use normalize::DEFAULT_SCHEME;
pub use observer::TracingObserver;
pub use queue::{CrawlConfig, Crawler};
pub use result::CrawlResult;
