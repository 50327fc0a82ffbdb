// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Read the seed URLs and target document names
// 3. Crawl the site and collect referring pages per document
// 4. Write the report and exit with a proper code
//    (0 = every document is linked, 1 = orphans found, 2 = error)
//
// Logging goes to stderr through `tracing`; set RUST_LOG=debug to see every
// rejected link. stdout stays free for `--output -`.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl engine
mod input; // src/input.rs - seed / target file loading
mod page; // src/page/ - HTTP probes, downloads, link extraction
mod report; // src/report.rs - output writer

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use crawl::{CrawlConfig, Crawler, TargetDocuments, TracingObserver};
use page::{HttpConfig, HttpPageSource};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Initialize tracing subscriber with environment filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = every target document has at least one referring page
//   Ok(1) = at least one orphan document
//   Err   = inputs unreadable, client could not be built, report not written
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let seeds = input::load_seeds(&cli.seeds)?;
    let targets = input::load_targets(&cli.targets)?;
    info!(
        seeds = seeds.len(),
        documents = targets.len(),
        "starting crawl"
    );

    let source = HttpPageSource::new(&HttpConfig {
        user_agent: cli.user_agent.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ..HttpConfig::default()
    })?;

    let config = CrawlConfig {
        scheme: cli.scheme.clone(),
        probe_concurrency: usize::from(cli.probe_concurrency),
        max_depth: cli.max_depth.map(usize::from),
    };

    let mut crawler = Crawler::new(source, TracingObserver, config);
    let result = crawler.run(&seeds, TargetDocuments::new(targets)).await;

    let stats = result.stats();
    info!(
        pages = stats.pages_visited,
        failed = stats.pages_failed,
        links = stats.links_seen,
        probes = stats.probes,
        urls = stats.urls_identified,
        "all links crawled"
    );

    report::write_report(&result, &cli.output, cli.json)?;

    let orphans = result.orphans();
    info!(
        documents = result.len(),
        orphans,
        output = %cli.output.display(),
        "report written"
    );

    if orphans > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
