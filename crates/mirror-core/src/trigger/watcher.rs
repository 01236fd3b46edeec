//! Push-mode change detection via OS file-event notification

use std::path::Path;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::ChangeToken;
use crate::sync::Mirror;
use crate::{Error, Result};

/// Capacity of the change-token channel.
///
/// The producer blocks when the channel is full, so a burst larger than
/// this still delivers every token once the consumer catches up.
const CHANNEL_CAPACITY: usize = 1024;

/// A live recursive subscription on a source tree.
///
/// Dropping the watcher ends the subscription; the daemon keeps it alive
/// for the lifetime of the watch loop.
#[derive(Debug)]
pub struct SourceWatcher {
    watcher: RecommendedWatcher,
    events: mpsc::Receiver<ChangeToken>,
}

impl SourceWatcher {
    /// Split off the token stream, keeping the subscription alive via the
    /// returned guard.
    pub fn into_parts(self) -> (RecommendedWatcher, mpsc::Receiver<ChangeToken>) {
        (self.watcher, self.events)
    }
}

/// Subscribe to recursive change notifications on the source path.
///
/// Constructing and subscribing the watcher doubles as the availability
/// probe: if either step fails, push mode is unavailable and the caller
/// decides whether to degrade to polling.
///
/// # Errors
///
/// Returns [`Error::WatchUnavailable`] if the platform watcher cannot be
/// created or the source cannot be subscribed.
pub fn watch_source(source: &Path) -> Result<SourceWatcher> {
    let (tx, rx) = mpsc::channel::<ChangeToken>(CHANNEL_CAPACITY);

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<Event, notify::Error>| match res {
            Ok(event) => {
                if is_change(&event.kind) {
                    // Receiver dropped means the loop is shutting down
                    let _ = tx.blocking_send(ChangeToken);
                }
            }
            Err(e) => {
                warn!("watcher error: {}", e);
            }
        },
        Config::default(),
    )
    .map_err(|e| Error::WatchUnavailable {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;

    watcher
        .watch(source, RecursiveMode::Recursive)
        .map_err(|e| Error::WatchUnavailable {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

    info!("watching {} for changes", source.display());

    Ok(SourceWatcher {
        watcher,
        events: rx,
    })
}

/// Decide whether an event kind counts as a source change.
///
/// Create, modify (data or name), and remove events do; so do unclassified
/// events, since a platform that cannot say what happened still observed
/// something. Access events do not: the mirror's own reads of the source
/// emit them and would re-trigger the loop forever.
fn is_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => true,
        EventKind::Any | EventKind::Other => true,
        EventKind::Access(_) => false,
    }
}

/// Drive the mirror from a stream of change tokens.
///
/// One full mirror pass per token, no batching: a burst of N events
/// produces N passes. Syncs are strictly sequential; tokens arriving
/// mid-pass queue in the channel. Returns when the token stream ends.
pub async fn watch_loop<M: Mirror>(
    mut events: mpsc::Receiver<ChangeToken>,
    mirror: &M,
) -> Result<()> {
    while let Some(_token) = events.recv().await {
        info!("change detected, sync started");
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
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_events_are_not_changes() {
        use notify::event::AccessKind;

        assert!(!is_change(&EventKind::Access(AccessKind::Any)));
        assert!(is_change(&EventKind::Any));
        assert!(is_change(&EventKind::Create(notify::event::CreateKind::File)));
        assert!(is_change(&EventKind::Remove(notify::event::RemoveKind::Folder)));
    }

    #[test]
    fn watch_missing_source_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let err = watch_source(&missing).unwrap_err();
        assert!(matches!(err, Error::WatchUnavailable { .. }));
    }
}
