// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - PathBuf: An owned filesystem path
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::crawl::DEFAULT_SCHEME;
use crate::page::DEFAULT_USER_AGENT;
use crate::report::DEFAULT_OUTPUT;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "doc-referrers",
    version = "0.1.0",
    about = "Crawls a website to find which pages link to a list of documents",
    long_about = "doc-referrers crawls a website breadth-first from one or more seed URLs, \
                  staying on the seeds' domains, and reports every page that links to each \
                  target document. Documents nothing links to are reported as ORPHAN-LINK, \
                  so they can be removed from the document store."
)]
pub struct Cli {
    /// File with one seed URL per line (e.g. https://example.edu)
    ///
    /// The seeds' hosts are the only domains the crawler will visit
    pub seeds: PathBuf,

    /// File with one document filename per line (e.g. report.pdf)
    pub targets: PathBuf,

    /// Where to write the report ("-" for stdout)
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output results in JSON format instead of one line per document
    #[arg(long)]
    pub json: bool,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// How many HEAD probes for one page's links may run at once
    ///
    /// 1 (the default) makes exactly one request at a time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub probe_concurrency: u16,

    /// Stop following pages beyond this depth (1 = seed pages only)
    ///
    /// Without it the whole reachable site is crawled
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_depth: Option<u16>,

    /// Scheme every URL is forced to before comparison
    #[arg(long, default_value = DEFAULT_SCHEME, value_parser = ["https", "http"])]
    pub scheme: String,
}
