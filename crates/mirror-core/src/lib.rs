//! Mirror engine and trigger loop for dirmirror
//!
//! This crate coordinates the mirror-fs primitives into the daemon's
//! behavior:
//!
//! - **Configuration**: [`MirrorConfig`] names the source and target trees
//!   and the trigger strategy
//! - **MirrorEngine**: one-way, delete-propagating copy with drift checking
//! - **Triggers**: push mode (OS file-event notification) and poll mode
//!   (periodic tree fingerprinting)
//! - **Daemon**: one initial sync, then one sync per detected change
//!
//! # Architecture
//!
//! ```text
//!        CLI
//!         |
//!    mirror-core
//!         |
//!     mirror-fs
//! ```

pub mod config;
pub mod daemon;
pub mod error;
pub mod sync;
pub mod trigger;

pub use config::{MirrorConfig, TriggerMode};
pub use error::{Error, Result};
pub use sync::{
    CheckReport, CheckStatus, DriftItem, Mirror, MirrorEngine, SyncOptions, SyncReport,
};
pub use trigger::{ChangeToken, Fingerprinter, Sha256Fingerprinter, SourceWatcher};
