// src/crawl/domain.rs
// =============================================================================
// The domain allowlist keeps the crawler on the website we were asked about.
//
// It is built once from the seed URLs' canonical hosts and never changes.
// A URL is allowed only when its netloc (host + optional port) is exactly
// one of the seed netlocs: no wildcards, no subdomain matching.
//
//   seeds: https://example.edu, https://www.example.edu/admissions
//   allowlist: { "example.edu" }
//   https://example.edu/about       -> allowed
//   https://library.example.edu/    -> rejected (different host)
// =============================================================================

use std::collections::BTreeSet;

use super::normalize::netloc;

#[derive(Debug, Clone, Default)]
pub struct DomainAllowlist {
    // BTreeSet keeps the log line listing the domains stable between runs
    netlocs: BTreeSet<String>,
}

impl DomainAllowlist {
    // Builds the allowlist from canonical seed URLs
    // Duplicates collapse naturally because this is a set.
    pub fn from_seeds<'a>(canonical_seeds: impl IntoIterator<Item = &'a str>) -> Self {
        let netlocs = canonical_seeds.into_iter().filter_map(netloc).collect();
        Self { netlocs }
    }

    pub fn is_allowed(&self, canonical_url: &str) -> bool {
        match netloc(canonical_url) {
            Some(host) => self.netlocs.contains(&host),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.netlocs.is_empty()
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.netlocs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_host_match() {
        let allow = DomainAllowlist::from_seeds(["https://example.edu"]);
        assert!(allow.is_allowed("https://example.edu/about"));
        assert!(!allow.is_allowed("https://library.example.edu/about"));
        assert!(!allow.is_allowed("https://example.com/about"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let allow = DomainAllowlist::from_seeds([
            "https://example.edu",
            "https://example.edu/admissions",
            "https://grad.example.edu",
        ]);
        let domains: Vec<_> = allow.domains().collect();
        assert_eq!(domains, vec!["example.edu", "grad.example.edu"]);
    }

    #[test]
    fn test_port_is_part_of_netloc() {
        let allow = DomainAllowlist::from_seeds(["http://127.0.0.1:4000"]);
        assert!(allow.is_allowed("http://127.0.0.1:4000/page"));
        assert!(!allow.is_allowed("http://127.0.0.1:5000/page"));
    }

    #[test]
    fn test_empty_allowlist_rejects_everything() {
        let allow = DomainAllowlist::from_seeds(std::iter::empty());
        assert!(allow.is_empty());
        assert!(!allow.is_allowed("https://example.edu"));
    }
}
