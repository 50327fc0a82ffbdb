// src/input.rs
// =============================================================================
// Reads the two input files.
//
// Both are plain text with one entry per line:
// - seeds:   the URLs the crawl starts from (at least one)
// - targets: bare document filenames to look for, e.g. "report.pdf"
//
// Lines are trimmed and blank lines dropped, so a trailing newline or a
// Windows line ending doesn't create a bogus entry.
// =============================================================================

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

// Loads the seed URLs, failing if the file is unreadable or has none
pub fn load_seeds(path: &Path) -> Result<Vec<String>> {
    let seeds = read_lines(path)?;
    if seeds.is_empty() {
        bail!("seed file {} contains no URLs", path.display());
    }
    Ok(seeds)
}

// Loads the target filenames
//
// A repeated name keeps only its first line. An empty file is fine: the
// report will simply be empty.
pub fn load_targets(path: &Path) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let targets = read_lines(path)?
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();
    Ok(targets)
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_seeds_trims_and_skips_blank_lines() {
        let file = file_with("https://example.edu/\r\n\n  https://grad.example.edu  \n");
        let seeds = load_seeds(file.path()).unwrap();
        assert_eq!(seeds, vec!["https://example.edu/", "https://grad.example.edu"]);
    }

    #[test]
    fn test_empty_seed_file_is_error() {
        let file = file_with("\n\n");
        let err = load_seeds(file.path()).unwrap_err();
        assert!(err.to_string().contains("contains no URLs"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_targets(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_targets_keep_order_and_drop_repeats() {
        let file = file_with("b.pdf\na.pdf\nb.pdf\nReport.PDF\n");
        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets, vec!["b.pdf", "a.pdf", "Report.PDF"]);
    }

    #[test]
    fn test_empty_target_file_is_ok() {
        let file = file_with("");
        assert!(load_targets(file.path()).unwrap().is_empty());
    }
}
