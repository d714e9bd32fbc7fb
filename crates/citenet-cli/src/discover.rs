//! Input discovery for Web of Science savedrecs exports.
//!
//! WoS names downloads `savedrecs.txt`, and browsers rename collisions to
//! `savedrecs (1).txt`, `savedrecs (2).txt`, and so on. Discovery accepts
//! exactly that family and returns paths ordered by the parenthesized
//! sequence number (absent = 0), so records are processed in download order.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

static SAVEDRECS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^savedrecs(?: \((\d+)\))?\.txt$").expect("savedrecs pattern is valid")
});

/// List the savedrecs exports in `dir`, in sequence order.
///
/// Files whose names do not match the savedrecs family are ignored.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("read input directory {}", dir.display()))?;

    let mut found: Vec<(u64, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(caps) = SAVEDRECS_RE.captures(name) {
            let seq = caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            found.push((seq, entry.path()));
        }
    }

    found.sort();
    debug!(dir = %dir.display(), files = found.len(), "discovered savedrecs exports");
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").expect("write file");
    }

    #[test]
    fn plain_savedrecs_sorts_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "savedrecs (2).txt");
        touch(dir.path(), "savedrecs.txt");
        touch(dir.path(), "savedrecs (1).txt");

        let files = discover_inputs(dir.path()).expect("discover");
        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["savedrecs.txt", "savedrecs (1).txt", "savedrecs (2).txt"]
        );
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "savedrecs.txt");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "savedrecs.csv");
        touch(dir.path(), "savedrecs(3).txt"); // missing the space

        let files = discover_inputs(dir.path()).expect("discover");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn sequence_numbers_sort_numerically() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(dir.path(), "savedrecs (10).txt");
        touch(dir.path(), "savedrecs (9).txt");

        let files = discover_inputs(dir.path()).expect("discover");
        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["savedrecs (9).txt", "savedrecs (10).txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("does-not-exist");
        assert!(discover_inputs(&gone).is_err());
    }

    #[test]
    fn empty_directory_yields_no_inputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = discover_inputs(dir.path()).expect("discover");
        assert!(files.is_empty());
    }
}
