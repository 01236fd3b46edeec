//! Change-detection triggers for the daemon loop
//!
//! Two mutually exclusive strategies, selected once at startup:
//!
//! - **Push mode** ([`watcher`]): recursive OS file-event notification on
//!   the source tree. Consumed for occurrence only; every relevant event
//!   becomes one opaque [`ChangeToken`].
//! - **Poll mode** ([`poller`]): a timer-driven task fingerprints the
//!   source tree each interval and compares against the previous value.

mod poller;
mod watcher;

pub use poller::poll_loop;
pub use watcher::{SourceWatcher, watch_loop, watch_source};

use std::path::Path;

use mirror_fs::TreeFingerprint;

/// Opaque token signalling that something under the source tree changed.
///
/// The daemon consumes tokens only for their occurrence, never their
/// content; each token triggers one full mirror pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeToken;

/// Capability of fingerprinting a directory tree's content.
///
/// The poll loop depends on this seam so tests can drive it with scripted
/// fingerprints instead of real filesystem scans.
pub trait Fingerprinter {
    fn fingerprint(&self, root: &Path) -> mirror_fs::Result<TreeFingerprint>;
}

/// Fingerprinter backed by SHA-256 content hashing of the real tree
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint(&self, root: &Path) -> mirror_fs::Result<TreeFingerprint> {
        mirror_fs::fingerprint_tree(root)
    }
}
