// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl engine: a breadth-first walk over the
// website that records which pages link to the target documents.
//
// How it works:
// 1. Normalize the seed URLs, build the domain allowlist from their hosts,
//    and put every seed that is an HTML page into the frontier
// 2. Take the page at the head of the frontier and download it
// 3. Extract every <a href> on the page
// 4. For each link: normalize it, drop it if already seen or off-site,
//    then ask the server (HEAD) what it is:
//    - a target document -> record this page as a referrer
//    - an HTML page      -> append it to the frontier
//    - anything else     -> ignore it
// 5. Repeat until the frontier is empty
//
// Nothing here ever aborts the crawl: a bad URL or a failed request only
// skips that one URL.
//
// Rust concepts:
// - Generics with trait bounds: Crawler<S: PageSource, O: CrawlObserver>
// - Streams: buffered() runs a bounded number of probes at once
// - Destructuring: `for Candidate { raw, url } in candidates`
// =============================================================================

use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt};

use super::domain::DomainAllowlist;
use super::matcher::TargetDocuments;
use super::normalize::{netloc, Normalizer, DEFAULT_SCHEME};
use super::observer::{CrawlObserver, Rejection};
use super::result::{CrawlResult, CrawlStats};
use super::state::{CrawlItem, CrawlState};
use crate::page::{extract_links, ContentKind, FetchError, PageSource};

// Knobs for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Scheme every canonical URL is forced to
    pub scheme: String,
    /// How many HEAD probes for one page's links may run at once
    pub probe_concurrency: usize,
    /// Maximum page depth (1 = seeds only); None crawls the whole site
    pub max_depth: Option<usize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            probe_concurrency: 1,
            max_depth: None,
        }
    }
}

// A link that survived the cheap checks and now needs a HEAD probe
#[derive(Debug, Clone)]
struct Candidate {
    raw: String,
    url: String,
}

type ProbeResults = HashMap<String, Result<ContentKind, FetchError>>;

// Everything that lives only for the duration of run()
struct RunState {
    state: CrawlState,
    targets: TargetDocuments,
    allowlist: DomainAllowlist,
    stats: CrawlStats,
}

pub struct Crawler<S, O> {
    source: S,
    observer: O,
    normalizer: Normalizer,
    config: CrawlConfig,
}

impl<S: PageSource, O: CrawlObserver> Crawler<S, O> {
    pub fn new(source: S, observer: O, config: CrawlConfig) -> Self {
        let normalizer = Normalizer::new(&config.scheme);
        Self {
            source,
            observer,
            normalizer,
            config,
        }
    }

    #[cfg(test)]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    // Crawls the site reachable from `seeds` and reports who links to `targets`
    //
    // Parameters:
    //   seeds: raw seed URLs; their hosts become the allowed domains
    //   targets: the documents to look for, each with an empty referrer set
    //
    // Returns: the target documents with their referrer sets filled in
    pub async fn run(&mut self, seeds: &[String], targets: TargetDocuments) -> CrawlResult {
        let canonical_seeds: Vec<String> = seeds
            .iter()
            .filter_map(|raw| self.normalizer.normalize(raw, None).ok())
            .collect();
        let allowlist = DomainAllowlist::from_seeds(canonical_seeds.iter().map(String::as_str));
        let domains: Vec<&str> = allowlist.domains().collect();
        self.observer.domains_allowed(&domains);

        let mut run = RunState {
            state: CrawlState::new(),
            targets,
            allowlist,
            stats: CrawlStats::default(),
        };

        // Nothing to look for, or nowhere to look: every document is an orphan
        if run.targets.is_empty() || run.allowlist.is_empty() {
            return CrawlResult::new(run.targets, run.stats);
        }

        // Seeds go through the same normalize -> filter -> probe pipeline as links
        self.process_links(&mut run, seeds, None, None).await;

        while let Some(item) = run.state.next() {
            // enqueue() already refuses duplicates; this guards the fetch itself
            if run.state.is_visited(&item.url) {
                continue;
            }

            let page = match self.source.fetch(&item.url).await {
                Ok(page) => page,
                Err(e) => {
                    // No retry, and the page is not marked visited
                    run.stats.pages_failed += 1;
                    self.observer.fetch_failed(&item.url, &e);
                    continue;
                }
            };

            run.state.mark_visited(&item.url);
            run.stats.pages_visited += 1;

            let links = extract_links(&page.body);
            run.stats.links_seen += links.len();
            self.observer.visited(&item.url, links.len());

            // Relative hrefs resolve against where the server actually answered
            // from: "/dir" usually redirects to "/dir/", which changes what
            // "a.pdf" means. The referrer is still the canonical page URL.
            self.process_links(&mut run, &links, Some(page.final_url.as_str()), Some(&item))
                .await;
        }

        run.stats.urls_identified = run.state.identified_count();
        CrawlResult::new(run.targets, run.stats)
    }

    // Runs one batch of raw links (a page's hrefs, or the seed list) through
    // the pipeline. `page` is None for seeds.
    async fn process_links(
        &mut self,
        run: &mut RunState,
        links: &[String],
        base: Option<&str>,
        page: Option<&CrawlItem>,
    ) {
        let candidates = self.screen(run, links, base, page);
        if candidates.is_empty() {
            return;
        }

        let (probes, issued) =
            probe_all(&self.source, &candidates, self.config.probe_concurrency).await;
        run.stats.probes += issued;

        self.apply(run, candidates, probes, page);
    }

    // The cheap checks that need no network: normalize, dedup, domain filter
    fn screen(
        &mut self,
        run: &mut RunState,
        links: &[String],
        base: Option<&str>,
        page: Option<&CrawlItem>,
    ) -> Vec<Candidate> {
        let referrer = page.map_or("", |p| p.url.as_str());
        let mut candidates = Vec::new();

        for raw in links {
            let url = match self.normalizer.normalize(raw, base) {
                Ok(url) => url,
                Err(e) => {
                    self.observer.rejected(raw, referrer, &Rejection::Unparseable(e));
                    continue;
                }
            };

            if run.state.is_identified(&url) {
                self.revisit(run, raw, &url, page);
                continue;
            }

            if run.state.is_skipped(&url) {
                self.observer.rejected(raw, referrer, &Rejection::PreviouslySkipped);
                continue;
            }

            if !run.allowlist.is_allowed(&url) {
                let host = netloc(&url).unwrap_or_default();
                self.observer.rejected(raw, referrer, &Rejection::NotAllowedDomain(host));
                continue;
            }

            candidates.push(Candidate {
                raw: raw.clone(),
                url,
            });
        }

        candidates
    }

    // Applies probe outcomes in link order
    //
    // Every first occurrence of a URL ends up identified or skipped, so a
    // repeated link in the same batch is handled by the checks at the top.
    fn apply(
        &mut self,
        run: &mut RunState,
        candidates: Vec<Candidate>,
        mut probes: ProbeResults,
        page: Option<&CrawlItem>,
    ) {
        let referrer = page.map_or("", |p| p.url.as_str());
        let depth = page.map_or(1, |p| p.depth + 1);

        for Candidate { raw, url } in candidates {
            if run.state.is_identified(&url) {
                self.revisit(run, &raw, &url, page);
                continue;
            }
            if run.state.is_skipped(&url) {
                self.observer.rejected(&raw, referrer, &Rejection::PreviouslySkipped);
                continue;
            }

            let Some(probe) = probes.remove(&url) else {
                continue;
            };

            let kind = match probe {
                Ok(kind) => kind,
                Err(e) => {
                    run.state.mark_skipped(&url);
                    self.observer.rejected(&raw, referrer, &Rejection::ProbeFailed(e));
                    continue;
                }
            };

            match (kind, page) {
                (ContentKind::Other, Some(page)) => {
                    match run.targets.match_and_record(&url, &page.url) {
                        Some(name) => {
                            run.state.mark_matched(&url, &name);
                            run.stats.matches += 1;
                            self.observer.matched(&name, &url, &page.url);
                        }
                        None => {
                            run.state.mark_skipped(&url);
                            self.observer.rejected(&raw, referrer, &Rejection::NotHtml);
                        }
                    }
                }
                // A seed that is a document has no referring page
                (ContentKind::Other, None) => {
                    run.state.mark_skipped(&url);
                    self.observer.rejected(&raw, referrer, &Rejection::NotHtml);
                }
                (ContentKind::Html, Some(page)) => {
                    if let Some(max) = self.config.max_depth {
                        if depth > max {
                            // BFS reaches every URL first at its shallowest depth,
                            // so it can never come back within the limit
                            run.state.mark_skipped(&url);
                            self.observer.rejected(&raw, referrer, &Rejection::DepthLimit(max));
                            continue;
                        }
                    }
                    if run.state.enqueue(&url, depth) {
                        self.observer.enqueued(&url, &page.url);
                    }
                }
                (ContentKind::Html, None) => {
                    if run.state.enqueue(&url, depth) {
                        self.observer.seed_accepted(&url);
                    }
                }
            }
        }
    }

    // A link to a URL we already identified. Pages are never reprocessed, but
    // a known document still gains this page as a referrer.
    fn revisit(&mut self, run: &mut RunState, raw: &str, url: &str, page: Option<&CrawlItem>) {
        let referrer = page.map_or("", |p| p.url.as_str());

        let document = match (run.state.matched_document(url), page) {
            (Some(name), Some(_)) => name.to_string(),
            _ => {
                self.observer.rejected(raw, referrer, &Rejection::AlreadyIdentified);
                return;
            }
        };

        run.targets.record(&document, referrer);
        run.stats.matches += 1;
        self.observer.matched(&document, url, referrer);
    }
}

// Probes every distinct candidate URL, at most `concurrency` at a time
//
// buffered() (not buffer_unordered) keeps results in input order, and nothing
// here touches the crawl state: all check-and-insert work happens afterwards
// in apply(), on the single crawl loop.
//
// Returns: the outcome per URL plus how many probes were issued
async fn probe_all<S: PageSource>(
    source: &S,
    candidates: &[Candidate],
    concurrency: usize,
) -> (ProbeResults, usize) {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = candidates
        .iter()
        .map(|c| c.url.as_str())
        .filter(|url| seen.insert(*url))
        .collect();
    let issued = unique.len();

    let results = stream::iter(unique)
        .map(move |url| async move { (url.to_string(), source.probe(url).await) })
        .buffered(concurrency.max(1))
        .collect::<ProbeResults>()
        .await;

    (results, issued)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the crawl state a separate struct (CrawlState)?
//    - The frontier and the identified/visited sets belong together: the
//      "enqueue at most once" rule needs both at the same moment
//    - Owning them in one value, created at the start of run() and dropped at
//      the end, means no global state and nothing persists between runs
//
// 2. Why probe with HEAD before downloading?
//    - Target documents can be huge PDFs; we only need their file name
//    - HEAD returns the headers (Content-Type) without the body
//
// 3. What does buffered(n) do?
//    - Runs up to n futures at once, but yields results in the original order
//    - buffer_unordered(n) would yield them as they finish
//    - With n = 1 this is exactly one request at a time
//
// 4. Why `let Some(probe) = ... else { continue; }`?
//    - let-else binds the value or runs the else block, which must leave the
//      current scope (continue, return, break...)
//
// 5. Why map_or("", ...)?
//    - Seeds have no referring page; the observer gets an empty referrer
// -----------------------------------------------------------------------------
