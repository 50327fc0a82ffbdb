// src/crawl/matcher.rs
// =============================================================================
// The target document set and the matcher that fills it in.
//
// Keys are the input filenames (case-sensitive, exactly as given) and are
// fixed for the whole run. Each key maps to the set of canonical pages that
// link to that document, in the order we discovered them.
//
// Matching only looks at the URL's final path segment, never at the
// document's content, which is why the crawler never downloads documents.
//
// Rust concepts:
// - IndexMap / IndexSet: HashMap / HashSet that remember insertion order
// =============================================================================

use indexmap::{IndexMap, IndexSet};

use super::normalize::file_name;

#[derive(Debug, Clone, Default)]
pub struct TargetDocuments {
    referrers: IndexMap<String, IndexSet<String>>,
}

impl TargetDocuments {
    // Builds the set with an empty referrer set per filename
    // Repeated names keep their first position.
    pub fn new<S: Into<String>>(filenames: impl IntoIterator<Item = S>) -> Self {
        let referrers = filenames
            .into_iter()
            .map(|name| (name.into(), IndexSet::new()))
            .collect();
        Self { referrers }
    }

    pub fn len(&self) -> usize {
        self.referrers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.referrers.is_empty()
    }

    // Returns the target filename a canonical URL points at, if any
    //
    // The raw last segment is tried first; if that misses, the percent-decoded
    // form is tried so "annual%20report.pdf" matches the target "annual report.pdf".
    pub fn target_for(&self, canonical_url: &str) -> Option<&str> {
        let segment = file_name(canonical_url)?;
        if let Some((name, _)) = self.referrers.get_key_value(segment.as_str()) {
            return Some(name.as_str());
        }
        let decoded = urlencoding::decode(&segment).ok()?;
        self.referrers
            .get_key_value(&*decoded)
            .map(|(name, _)| name.as_str())
    }

    // Records that `referrer` links to the document `filename`
    // Returns false when the referrer was already recorded.
    pub fn record(&mut self, filename: &str, referrer: &str) -> bool {
        match self.referrers.get_mut(filename) {
            Some(pages) => pages.insert(referrer.to_string()),
            None => false,
        }
    }

    // Tests a link against the targets and records the referring page on a hit
    //
    // Parameters:
    //   canonical_url: the normalized link target
    //   referrer: the canonical URL of the page containing the link
    //
    // Returns: the matched filename, or None when the link is not a target
    pub fn match_and_record(&mut self, canonical_url: &str, referrer: &str) -> Option<String> {
        let name = self.target_for(canonical_url)?.to_string();
        self.record(&name, referrer);
        Some(name)
    }

    #[cfg(test)]
    pub fn referrers(&self, filename: &str) -> Option<&IndexSet<String>> {
        self.referrers.get(filename)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.referrers.iter().map(|(name, pages)| (name.as_str(), pages))
    }
}
