//! Aggregate tree content fingerprinting
//!
//! A fingerprint summarizes the content of every file in a tree at one
//! instant: one `<sha256-hex>  <relative-path>` line per file, lines
//! sorted, the concatenation hashed again. Two trees with identical file
//! contents at identical relative paths produce the same fingerprint;
//! any content change, addition, deletion, or rename produces a new one.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::path::NormalizedPath;
use crate::walk::scan_tree;
use crate::{Error, Result};

/// A single hash value summarizing a directory tree's file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFingerprint(String);

impl TreeFingerprint {
    /// Wrap an already-computed digest.
    ///
    /// [`fingerprint_tree`] is the normal producer; this exists for
    /// callers that carry digests across process boundaries and for test
    /// fakes.
    pub fn from_digest(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TreeFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the aggregate fingerprint of a directory tree.
///
/// Only file content contributes; directories themselves do not. Relative
/// paths are normalized to forward slashes so the value is comparable
/// across platforms.
///
/// # Errors
///
/// Returns an error if the tree cannot be scanned or a file cannot be read.
pub fn fingerprint_tree(root: &Path) -> Result<TreeFingerprint> {
    let mut lines = Vec::new();

    for entry in scan_tree(root)? {
        if !entry.is_file() {
            continue;
        }
        let abs = root.join(&entry.rel);
        let content = std::fs::read(&abs).map_err(|e| Error::io(&abs, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&content);
        lines.push(format!(
            "{:x}  {}",
            hasher.finalize(),
            NormalizedPath::new(&entry.rel)
        ));
    }

    lines.sort();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    Ok(TreeFingerprint(format!("{:x}", hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn unchanged_tree_has_stable_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "2").unwrap();

        let first = fingerprint_tree(dir.path()).unwrap();
        let second = fingerprint_tree(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn content_change_changes_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        let before = fingerprint_tree(dir.path()).unwrap();

        fs::write(dir.path().join("a.txt"), "2").unwrap();
        let after = fingerprint_tree(dir.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn rename_changes_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        let before = fingerprint_tree(dir.path()).unwrap();

        fs::rename(dir.path().join("a.txt"), dir.path().join("b.txt")).unwrap();
        let after = fingerprint_tree(dir.path()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn addition_and_deletion_change_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1").unwrap();
        let base = fingerprint_tree(dir.path()).unwrap();

        fs::write(dir.path().join("b.txt"), "2").unwrap();
        let added = fingerprint_tree(dir.path()).unwrap();
        assert_ne!(base, added);

        fs::remove_file(dir.path().join("b.txt")).unwrap();
        let removed = fingerprint_tree(dir.path()).unwrap();
        assert_eq!(base, removed);
    }

    #[test]
    fn identical_trees_match_across_roots() {
        let left = tempfile::tempdir().unwrap();
        let right = tempfile::tempdir().unwrap();
        for root in [left.path(), right.path()] {
            fs::create_dir(root.join("sub")).unwrap();
            fs::write(root.join("sub/x.txt"), "same").unwrap();
        }

        assert_eq!(
            fingerprint_tree(left.path()).unwrap(),
            fingerprint_tree(right.path()).unwrap()
        );
    }
}
