//! Recursive directory tree scanning

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{Error, Result};

/// Kind of entry found during a tree scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a scanned tree, addressed relative to the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the scan root
    pub rel: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Recursively scan a directory tree.
///
/// Returns every file and directory beneath `root` (the root itself is not
/// included), sorted by relative path. Symlinks are skipped with a warning;
/// the mirror never follows links.
///
/// # Errors
///
/// Returns an error if `root` is not a directory or a directory cannot be
/// read. Entries whose metadata cannot be read are skipped with a warning.
pub fn scan_tree(root: &Path) -> Result<Vec<TreeEntry>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    scan_into(root, PathBuf::new(), &mut entries)?;
    entries.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(entries)
}

fn scan_into(dir: &Path, rel: PathBuf, out: &mut Vec<TreeEntry>) -> Result<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let child_rel = rel.join(&name);
        let child_path = entry.path();

        // symlink_metadata so links are seen as links, not their targets
        let metadata = match fs::symlink_metadata(&child_path) {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping unreadable entry {}: {}", child_path.display(), e);
                continue;
            }
        };

        if metadata.file_type().is_symlink() {
            warn!("skipping symlink {}", child_path.display());
            continue;
        }

        if metadata.is_dir() {
            out.push(TreeEntry {
                rel: child_rel.clone(),
                kind: EntryKind::Dir,
            });
            scan_into(&child_path, child_rel, out)?;
        } else {
            out.push(TreeEntry {
                rel: child_rel,
                kind: EntryKind::File,
            });
        }
    }

    Ok(())
}
