//! Filesystem primitives for dirmirror
//!
//! Provides normalized path handling, content checksums, recursive tree
//! scanning with aggregate fingerprints, and atomic file I/O.

pub mod checksum;
pub mod error;
pub mod fingerprint;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use fingerprint::{TreeFingerprint, fingerprint_tree};
pub use path::NormalizedPath;
pub use walk::{EntryKind, TreeEntry, scan_tree};
