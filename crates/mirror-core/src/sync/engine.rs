//! MirrorEngine implementation
//!
//! The engine performs the one-way, delete-propagating copy: after a
//! completed pass the target's file set and per-file contents equal the
//! source's, and entries present only in the target are removed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mirror_fs::checksum::compute_file_checksum;
use mirror_fs::{EntryKind, NormalizedPath, io, scan_tree};

use super::Mirror;
use super::check::{CheckReport, DriftItem};
use crate::Result;
use crate::config::MirrorConfig;

/// Report from a mirror pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the pass completed without per-file errors
    pub success: bool,
    /// Actions taken during the pass
    pub actions: Vec<String>,
    /// Per-file errors encountered during the pass
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Create a successful report with no actions yet
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}

/// Options for a mirror pass
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, simulate changes without modifying the filesystem.
    /// Actions are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Engine for one-way, delete-propagating directory mirroring
pub struct MirrorEngine {
    source: PathBuf,
    target: PathBuf,
}

impl MirrorEngine {
    /// Create an engine for the configured mirror pair
    pub fn new(config: &MirrorConfig) -> Self {
        Self {
            source: config.source.clone(),
            target: config.target.clone(),
        }
    }

    /// Create an engine from explicit paths
    pub fn with_paths(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Get the source root
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Get the target root
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Perform one mirror pass with default options
    ///
    /// # Errors
    ///
    /// Returns an error if the source tree cannot be scanned (e.g. the
    /// source directory is missing). Per-file copy and delete failures do
    /// not abort the pass; they are collected into the report's `errors`
    /// and `success` is set to false.
    pub fn sync(&self) -> Result<SyncReport> {
        self.sync_with_options(SyncOptions::default())
    }

    /// Perform one mirror pass with options
    pub fn sync_with_options(&self, options: SyncOptions) -> Result<SyncReport> {
        let mut report = SyncReport::success();

        let source_entries = scan_tree(&self.source)?;
        let source_map: BTreeMap<&PathBuf, EntryKind> = source_entries
            .iter()
            .map(|e| (&e.rel, e.kind))
            .collect();

        if !self.target.is_dir() {
            if options.dry_run {
                report = report.with_action(format!(
                    "[dry-run] Would create target directory {}",
                    NormalizedPath::new(&self.target)
                ));
            } else {
                std::fs::create_dir_all(&self.target)
                    .map_err(|e| mirror_fs::Error::io(&self.target, e))?;
            }
        }

        let target_entries = if self.target.is_dir() {
            scan_tree(&self.target)?
        } else {
            Vec::new()
        };
        let target_map: BTreeMap<&PathBuf, EntryKind> = target_entries
            .iter()
            .map(|e| (&e.rel, e.kind))
            .collect();

        // Walk the source in sorted order so directories precede their
        // children.
        for entry in &source_entries {
            let rel = NormalizedPath::new(&entry.rel);
            let src_path = self.source.join(&entry.rel);
            let dst_path = self.target.join(&entry.rel);
            let existing = target_map.get(&entry.rel).copied();

            let result = match entry.kind {
                EntryKind::Dir => {
                    self.mirror_dir(&dst_path, existing, &rel, options, &mut report)
                }
                EntryKind::File => {
                    self.mirror_file(&src_path, &dst_path, existing, &rel, options, &mut report)
                }
            };

            if let Err(e) = result {
                warn!("failed to mirror {}: {}", rel, e);
                report.errors.push(format!("{}: {}", rel, e));
            }
        }

        // Delete extraneous target entries, children before parents.
        for entry in target_entries.iter().rev() {
            if source_map.contains_key(&entry.rel) {
                continue;
            }
            let rel = NormalizedPath::new(&entry.rel);
            let dst_path = self.target.join(&entry.rel);

            // A type-conflict fix above may already have removed this
            // subtree.
            if std::fs::symlink_metadata(&dst_path).is_err() {
                continue;
            }

            if options.dry_run {
                report = report.with_action(format!("[dry-run] Would remove {}", rel));
                continue;
            }
            match io::remove_entry(&dst_path) {
                Ok(()) => {
                    debug!("removed {}", rel);
                    report = report.with_action(format!("Removed {}", rel));
                }
                Err(e) => {
                    warn!("failed to remove {}: {}", rel, e);
                    report.errors.push(format!("{}: {}", rel, e));
                }
            }
        }

        report.success = report.errors.is_empty();
        Ok(report)
    }

    fn mirror_dir(
        &self,
        dst_path: &Path,
        existing: Option<EntryKind>,
        rel: &NormalizedPath,
        options: SyncOptions,
        report: &mut SyncReport,
    ) -> Result<()> {
        match existing {
            Some(EntryKind::Dir) => Ok(()),
            Some(EntryKind::File) => {
                if options.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would replace file {} with directory", rel));
                    return Ok(());
                }
                io::remove_entry(dst_path)?;
                std::fs::create_dir(dst_path).map_err(|e| mirror_fs::Error::io(dst_path, e))?;
                report.actions.push(format!("Created directory {}", rel));
                Ok(())
            }
            None => {
                if options.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would create directory {}", rel));
                    return Ok(());
                }
                std::fs::create_dir_all(dst_path)
                    .map_err(|e| mirror_fs::Error::io(dst_path, e))?;
                report.actions.push(format!("Created directory {}", rel));
                Ok(())
            }
        }
    }

    fn mirror_file(
        &self,
        src_path: &Path,
        dst_path: &Path,
        existing: Option<EntryKind>,
        rel: &NormalizedPath,
        options: SyncOptions,
        report: &mut SyncReport,
    ) -> Result<()> {
        match existing {
            Some(EntryKind::File) => {
                let src_checksum = compute_file_checksum(src_path)?;
                let dst_checksum = compute_file_checksum(dst_path)?;
                if src_checksum == dst_checksum {
                    return Ok(());
                }
                if options.dry_run {
                    report.actions.push(format!("[dry-run] Would update {}", rel));
                    return Ok(());
                }
                io::copy_file(src_path, dst_path)?;
                report.actions.push(format!("Updated {}", rel));
                Ok(())
            }
            Some(EntryKind::Dir) => {
                if options.dry_run {
                    report
                        .actions
                        .push(format!("[dry-run] Would replace directory {} with file", rel));
                    return Ok(());
                }
                io::remove_entry(dst_path)?;
                io::copy_file(src_path, dst_path)?;
                report.actions.push(format!("Copied {}", rel));
                Ok(())
            }
            None => {
                if options.dry_run {
                    report.actions.push(format!("[dry-run] Would copy {}", rel));
                    return Ok(());
                }
                io::copy_file(src_path, dst_path)?;
                report.actions.push(format!("Copied {}", rel));
                Ok(())
            }
        }
    }

    /// Check drift between source and target without modifying anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the source tree cannot be scanned or a file
    /// checksum cannot be computed.
    pub fn check(&self) -> Result<CheckReport> {
        let source_entries = scan_tree(&self.source)?;
        let target_entries = if self.target.is_dir() {
            scan_tree(&self.target)?
        } else {
            Vec::new()
        };

        let source_map: BTreeMap<&PathBuf, EntryKind> = source_entries
            .iter()
            .map(|e| (&e.rel, e.kind))
            .collect();
        let target_map: BTreeMap<&PathBuf, EntryKind> = target_entries
            .iter()
            .map(|e| (&e.rel, e.kind))
            .collect();

        let mut missing = Vec::new();
        let mut extraneous = Vec::new();
        let mut mismatched = Vec::new();

        for entry in &source_entries {
            let rel = NormalizedPath::new(&entry.rel);
            match target_map.get(&entry.rel) {
                None => missing.push(DriftItem {
                    path: rel.as_str().to_string(),
                    description: "Missing from target".to_string(),
                }),
                Some(kind) if *kind != entry.kind => mismatched.push(DriftItem {
                    path: rel.as_str().to_string(),
                    description: "Kind differs between source and target".to_string(),
                }),
                Some(EntryKind::File) => {
                    let src_checksum = compute_file_checksum(&self.source.join(&entry.rel))?;
                    let dst_checksum = compute_file_checksum(&self.target.join(&entry.rel))?;
                    if src_checksum != dst_checksum {
                        mismatched.push(DriftItem {
                            path: rel.as_str().to_string(),
                            description: format!(
                                "Checksum mismatch: expected {}, got {}",
                                src_checksum, dst_checksum
                            ),
                        });
                    }
                }
                Some(EntryKind::Dir) => {}
            }
        }

        for entry in &target_entries {
            if !source_map.contains_key(&entry.rel) {
                extraneous.push(DriftItem {
                    path: NormalizedPath::new(&entry.rel).as_str().to_string(),
                    description: "Extraneous in target".to_string(),
                });
            }
        }

        Ok(CheckReport::from_items(missing, extraneous, mismatched))
    }
}

impl Mirror for MirrorEngine {
    fn mirror(&self) -> Result<SyncReport> {
        self.sync()
    }
}

// Engine behavior tests live in tests/engine_tests.rs; only the report
// helpers are unit-tested here.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_report_success() {
        let report = SyncReport::success();
        assert!(report.success);
        assert!(report.actions.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn sync_report_with_action() {
        let report = SyncReport::success().with_action("Copied a.txt".to_string());
        assert_eq!(report.actions, vec!["Copied a.txt"]);
    }

    #[test]
    fn missing_source_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let engine =
            MirrorEngine::with_paths(dir.path().join("absent"), dir.path().join("target"));

        let err = engine.sync().unwrap_err();
        assert!(matches!(err, crate::Error::Fs(_)));
    }
}
