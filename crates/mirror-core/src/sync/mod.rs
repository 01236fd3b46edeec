//! Mirror synchronization: the engine and its reports

mod check;
mod engine;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use engine::{MirrorEngine, SyncOptions, SyncReport};

use crate::Result;

/// Capability of performing one full mirror pass.
///
/// The daemon and trigger loops depend on this seam rather than on
/// [`MirrorEngine`] directly, so tests can substitute counting fakes.
pub trait Mirror {
    /// Copy source to target with delete propagation, returning the report.
    fn mirror(&self) -> Result<SyncReport>;
}
