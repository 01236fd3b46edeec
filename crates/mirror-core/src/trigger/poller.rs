//! Poll-mode change detection via periodic tree fingerprinting

use std::path::Path;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use mirror_fs::TreeFingerprint;

use super::Fingerprinter;
use crate::sync::Mirror;
use crate::Result;

/// Drive the mirror by fingerprinting the source every `interval`.
///
/// Each tick computes the source tree's aggregate fingerprint and compares
/// it against the previous tick's value. A difference triggers one mirror
/// pass. The very first tick only establishes the baseline and never
/// syncs. The fresh fingerprint is always stored, whether or not a sync
/// ran, so one change is reported once.
///
/// The baseline lives in this loop's local scope; there is no process-wide
/// state. Runs until the task is dropped.
pub async fn poll_loop<F, M>(
    source: &Path,
    interval: Duration,
    fingerprinter: &F,
    mirror: &M,
) -> Result<()>
where
    F: Fingerprinter,
    M: Mirror,
{
    info!(
        "polling {} every {:.0?} for changes",
        source.display(),
        interval
    );

    let mut ticker = tokio::time::interval(interval);
    // A long mirror pass should delay subsequent ticks, not bunch them up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last: Option<TreeFingerprint> = None;

    loop {
        ticker.tick().await;

        let current = match fingerprinter.fingerprint(source) {
            Ok(fp) => fp,
            Err(e) => {
                warn!("fingerprint failed: {}", e);
                continue;
            }
        };

        let changed = match &last {
            Some(previous) => *previous != current,
            None => false,
        };

        if changed {
            info!("fingerprint changed, sync started");
            match mirror.mirror() {
                Ok(report) => {
                    info!(
                        actions = report.actions.len(),
                        errors = report.errors.len(),
                        "sync completed"
                    );
                }
                Err(e) => {
                    warn!("sync failed: {}", e);
                }
            }
        } else {
            debug!("no change detected");
        }

        last = Some(current);
    }
}
