// src/crawl/normalize.rs
// =============================================================================
// This module turns any URL string into its canonical, comparable form.
//
// Every dedup decision in the crawler (identified, visited, referrer sets)
// compares canonical strings, so two spellings of the same page MUST end up
// as the same string here.
//
// Steps, in order:
// 1. Resolve relative links (no host) against the page they were found on
// 2. Strip a leading "www." from the host
// 3. Drop the #fragment
// 4. Drop trailing '/' characters from the path
// 5. Force the scheme to the crawl scheme (https unless configured)
//
// What we do NOT touch: path case, percent-encoding, query parameter order.
// URLs that differ only in those are treated as different resources.
//
// Rust concepts:
// - thiserror: Deriving std::error::Error for our own error enum
// - url::Position: Slicing a parsed Url into its components
// =============================================================================

use thiserror::Error;
use url::{ParseError, Position, Url};

/// Scheme every canonical URL is forced to unless configured otherwise.
pub const DEFAULT_SCHEME: &str = "https";

/// Why a raw URL could not be normalized.
///
/// All variants are non-fatal: the caller skips the link and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Not a URL at all, or a relative link with no page to resolve it against
    #[error("cannot parse '{url}' as a URL: {reason}")]
    Unparseable { url: String, reason: String },

    /// Parsed fine but has no host to crawl (e.g. file:///tmp/x)
    #[error("'{0}' has no host")]
    MissingHost(String),

    /// mailto:, tel:, javascript: and friends
    #[error("'{url}' uses the '{scheme}' scheme, which cannot be crawled")]
    UnsupportedScheme { url: String, scheme: String },
}

// Canonicalizes URLs for one crawl run
//
// It only holds the scheme we force every URL to. In production that's
// "https"; tests against a local mock server use "http".
#[derive(Debug, Clone)]
pub struct Normalizer {
    scheme: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME)
    }
}

impl Normalizer {
    pub fn new(scheme: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
        }
    }

    // Normalizes a raw URL
    //
    // Parameters:
    //   raw: the URL as written in a seed file or an href attribute
    //   base: the page the link was found on (None for seeds)
    //
    // Returns: the canonical URL string, or why it was rejected
    //
    // Examples (base = "https://example.edu/sub/page.html"):
    //   "../docs/report.pdf"              -> "https://example.edu/docs/report.pdf"
    //   "http://www.example.edu/about/#x" -> "https://example.edu/about"
    //   "//example.edu/news"              -> "https://example.edu/news"
    pub fn normalize(&self, raw: &str, base: Option<&str>) -> Result<String, NormalizeError> {
        let raw = raw.trim();

        // Url::parse only fails with RelativeUrlWithoutBase when the input has
        // no scheme. That covers "/path", "../x" and scheme-relative "//host/x",
        // all of which join() resolves the way a browser would.
        let mut url = match Url::parse(raw) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = base.ok_or_else(|| Self::unparseable(raw, "relative URL without a base page"))?;
                let base = Url::parse(base).map_err(|e| Self::unparseable(base, e))?;
                base.join(raw).map_err(|e| Self::unparseable(raw, e))?
            }
            Err(e) => return Err(Self::unparseable(raw, e)),
        };

        if url.cannot_be_a_base() {
            return Err(NormalizeError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(NormalizeError::MissingHost(raw.to_string())),
        };

        // Only leading "www." labels are removed, so a host such as
        // "wwwlibrary.example.edu" is left alone. Repeated labels are all
        // stripped or a second pass would remove the next one.
        let mut stripped = host.as_str();
        while let Some(rest) = stripped.strip_prefix("www.") {
            if rest.is_empty() {
                break;
            }
            stripped = rest;
        }
        if stripped.len() != host.len() {
            url.set_host(Some(stripped))
                .map_err(|e| Self::unparseable(raw, e))?;
        }

        url.set_fragment(None);

        // set_scheme refuses to switch between "special" schemes (http, ftp...)
        // and arbitrary ones like "foo:", so those links are unsupported.
        if url.scheme() != self.scheme && url.set_scheme(&self.scheme).is_err() {
            return Err(NormalizeError::UnsupportedScheme {
                url: raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        // Url always serializes at least "/" as the path, so the canonical
        // string is assembled by hand to drop trailing separators.
        // All of them are trimmed (not just one) so normalize() stays idempotent.
        let path = url.path().trim_end_matches('/');
        let mut canonical = String::with_capacity(url.as_str().len());
        canonical.push_str(&url[..Position::AfterPort]);
        canonical.push_str(path);
        canonical.push_str(&url[Position::AfterPath..]);

        Ok(canonical)
    }

    fn unparseable(url: &str, reason: impl ToString) -> NormalizeError {
        NormalizeError::Unparseable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

// Returns the netloc (host plus optional port) of a canonical URL
//
// This is the value the domain allowlist stores and compares.
// Example: "https://example.edu:8443/a" -> "example.edu:8443"
pub fn netloc(canonical: &str) -> Option<String> {
    let url = Url::parse(canonical).ok()?;
    url.host_str()?;
    Some(url[Position::BeforeHost..Position::AfterPort].to_string())
}

// Returns the final path segment of a canonical URL
//
// Example: "https://example.edu/files/report.pdf" -> "report.pdf"
// A URL with an empty path has no file name.
pub fn file_name(canonical: &str) -> Option<String> {
    let url = Url::parse(canonical).ok()?;
    url.path_segments()?
        .last()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        Normalizer::default().normalize(raw, None).unwrap()
    }

    #[test]
    fn test_strips_www_fragment_and_trailing_slash() {
        assert_eq!(
            normalize("https://www.example.edu/about/#team"),
            "https://example.edu/about"
        );
    }

    #[test]
    fn test_forces_https() {
        assert_eq!(normalize("http://example.edu/news"), "https://example.edu/news");
        assert_eq!(normalize("ftp://example.edu/pub"), "https://example.edu/pub");
    }

    #[test]
    fn test_root_has_no_trailing_slash() {
        assert_eq!(normalize("https://example.edu/"), "https://example.edu");
        assert_eq!(normalize("https://example.edu"), "https://example.edu");
    }

    #[test]
    fn test_keeps_query_and_path_case() {
        assert_eq!(
            normalize("https://example.edu/Search/?q=Thesis&b=2"),
            "https://example.edu/Search?q=Thesis&b=2"
        );
    }

    #[test]
    fn test_keeps_port() {
        assert_eq!(normalize("https://example.edu:8443/a/"), "https://example.edu:8443/a");
    }

    #[test]
    fn test_only_leading_www_label_is_stripped() {
        assert_eq!(
            normalize("https://wwwlibrary.example.edu/"),
            "https://wwwlibrary.example.edu"
        );
        assert_eq!(
            normalize("https://docs.www.example.edu/"),
            "https://docs.www.example.edu"
        );
    }

    #[test]
    fn test_repeated_www_labels_are_all_stripped() {
        assert_eq!(
            normalize("https://www.www.example.edu/a/"),
            "https://example.edu/a"
        );
        assert_eq!(normalize("https://example.edu/a"), "https://example.edu/a");
    }

    #[test]
    fn test_resolves_parent_relative_link() {
        let n = Normalizer::default();
        let result = n
            .normalize("../docs/report.pdf", Some("https://example.edu/sub/page.html"))
            .unwrap();
        assert_eq!(result, "https://example.edu/docs/report.pdf");
    }

    #[test]
    fn test_resolves_root_relative_link() {
        let n = Normalizer::default();
        let result = n
            .normalize("/files/report.pdf", Some("https://example.edu"))
            .unwrap();
        assert_eq!(result, "https://example.edu/files/report.pdf");
    }

    #[test]
    fn test_resolves_scheme_relative_link_to_its_own_host() {
        let n = Normalizer::default();
        let result = n
            .normalize("//www.other.edu/page/", Some("https://example.edu/a"))
            .unwrap();
        assert_eq!(result, "https://other.edu/page");
    }

    #[test]
    fn test_fragment_only_link_resolves_to_page() {
        let n = Normalizer::default();
        let result = n
            .normalize("#section-2", Some("https://example.edu/sub/page.html"))
            .unwrap();
        assert_eq!(result, "https://example.edu/sub/page.html");
    }

    #[test]
    fn test_trims_whitespace_around_href() {
        assert_eq!(normalize("  https://example.edu/a/  "), "https://example.edu/a");
    }

    #[test]
    fn test_relative_without_base_is_unparseable() {
        let err = Normalizer::default().normalize("/files/x.pdf", None).unwrap_err();
        assert!(matches!(err, NormalizeError::Unparseable { .. }));
    }

    #[test]
    fn test_garbage_is_unparseable() {
        let err = Normalizer::default().normalize("http://[::1", None).unwrap_err();
        assert!(matches!(err, NormalizeError::Unparseable { .. }));
    }

    #[test]
    fn test_mailto_and_javascript_are_unsupported() {
        let n = Normalizer::default();
        let base = Some("https://example.edu");
        assert!(matches!(
            n.normalize("mailto:grad@example.edu", base),
            Err(NormalizeError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            n.normalize("javascript:void(0)", base),
            Err(NormalizeError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_file_url_has_no_host() {
        let err = Normalizer::default().normalize("file:///tmp/report.pdf", None).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingHost(_)));
    }

    #[test]
    fn test_custom_scheme() {
        let n = Normalizer::new("http");
        assert_eq!(n.normalize("https://127.0.0.1:8080/x/", None).unwrap(), "http://127.0.0.1:8080/x");
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::default();
        let inputs = [
            "https://www.example.edu/about/",
            "http://example.edu",
            "https://example.edu/a//",
            "https://example.edu/?q=1",
            "https://example.edu/dir/file name.pdf",
            "HTTPS://WWW.Example.EDU/Path/#frag",
            "https://example.edu:443/x",
            "https://www.www.example.edu/a/",
        ];
        for input in inputs {
            let once = n.normalize(input, None).unwrap();
            let twice = n.normalize(&once, None).unwrap();
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_netloc() {
        assert_eq!(netloc("https://example.edu/a").as_deref(), Some("example.edu"));
        assert_eq!(netloc("http://127.0.0.1:9000").as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(netloc("not a url"), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            file_name("https://example.edu/files/report.pdf").as_deref(),
            Some("report.pdf")
        );
        assert_eq!(file_name("https://example.edu/files/report.pdf?v=2").as_deref(), Some("report.pdf"));
        assert_eq!(file_name("https://example.edu"), None);
    }
}
