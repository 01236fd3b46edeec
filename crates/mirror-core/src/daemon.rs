//! The daemon: one initial sync, then one sync per detected change
//!
//! Two states: watching (the steady loop, push- or poll-driven) and
//! terminated (external process termination, between iterations). There is
//! no transition back.

use tracing::{info, warn};

use crate::config::{MirrorConfig, TriggerMode};
use crate::sync::Mirror;
use crate::trigger::{self, Fingerprinter};
use crate::Result;

/// Run the mirror daemon until externally terminated.
///
/// Performs exactly one unconditional sync before any watching begins,
/// then selects the trigger strategy once:
///
/// - `watch`: recursive file-event subscription; fails if unavailable
/// - `poll`: periodic fingerprint comparison
/// - `auto`: try `watch`, degrade to `poll` on failure
///
/// Sync failures inside the steady loop are logged; the loop proceeds to
/// the next trigger.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a forced `watch`
/// subscription cannot be established.
pub async fn run<M, F>(config: &MirrorConfig, mirror: &M, fingerprinter: &F) -> Result<()>
where
    M: Mirror,
    F: Fingerprinter,
{
    config.validate()?;

    info!(
        "mirroring {} -> {}",
        config.source.display(),
        config.target.display()
    );

    run_initial_sync(mirror);

    match config.trigger {
        TriggerMode::Watch => {
            let watcher = trigger::watch_source(&config.source)?;
            let (_guard, events) = watcher.into_parts();
            trigger::watch_loop(events, mirror).await
        }
        TriggerMode::Poll => {
            trigger::poll_loop(&config.source, config.poll_interval(), fingerprinter, mirror)
                .await
        }
        TriggerMode::Auto => match trigger::watch_source(&config.source) {
            Ok(watcher) => {
                let (_guard, events) = watcher.into_parts();
                trigger::watch_loop(events, mirror).await
            }
            Err(e) => {
                warn!("file-event notification unavailable ({}), polling instead", e);
                trigger::poll_loop(&config.source, config.poll_interval(), fingerprinter, mirror)
                    .await
            }
        },
    }
}

/// The unconditional startup sync.
///
/// Failure is logged, not fatal: the steady loop still starts and the next
/// trigger gets another chance.
fn run_initial_sync<M: Mirror>(mirror: &M) {
    info!("initial sync started");
    match mirror.mirror() {
        Ok(report) => {
            info!(
                actions = report.actions.len(),
                errors = report.errors.len(),
                "initial sync completed"
            );
        }
        Err(e) => {
            warn!("initial sync failed: {}", e);
        }
    }
}
