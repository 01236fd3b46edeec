//! Directory-tree fixtures for tests

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Write a set of `(relative path, content)` files under `root`,
/// creating parent directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }
}

/// Create a temp directory pre-populated with the given files.
pub fn temp_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_tree(dir.path(), files);
    dir
}

/// Snapshot every file under `root` as a `relative path -> content` map.
///
/// Relative paths use forward slashes so snapshots compare identically
/// across platforms. Directories appear only through the files they
/// contain.
pub fn read_tree(root: &Path) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    collect(root, root, &mut out);
    out
}

fn collect(root: &Path, dir: &Path, out: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            out.insert(rel, fs::read_to_string(&path).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let dir = temp_tree(&[("a.txt", "1"), ("sub/b.txt", "2")]);

        let snapshot = read_tree(dir.path());
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["a.txt"], "1");
        assert_eq!(snapshot["sub/b.txt"], "2");
    }
}
