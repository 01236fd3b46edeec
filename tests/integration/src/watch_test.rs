//! Live daemon tests: push and poll modes against real filesystems

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_core::{MirrorConfig, MirrorEngine, Sha256Fingerprinter, TriggerMode, daemon};
use tempfile::TempDir;

fn setup_pair() -> (TempDir, PathBuf, PathBuf) {
    let root = TempDir::new().unwrap();
    let source = root.path().join("src");
    let target = root.path().join("dst");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("seed.txt"), "seed").unwrap();
    (root, source, target)
}

fn spawn_daemon(config: MirrorConfig) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let engine = MirrorEngine::new(&config);
        let _ = daemon::run(&config, &engine, &Sha256Fingerprinter).await;
    })
}

async fn wait_for(cond: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    cond()
}

fn content(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[tokio::test(flavor = "multi_thread")]
async fn watch_daemon_mirrors_live_changes() {
    let (_root, source, target) = setup_pair();

    let handle = spawn_daemon(MirrorConfig::new(&source, &target));

    // Initial sync lands the seed file
    assert!(wait_for(|| target.join("seed.txt").exists(), Duration::from_secs(5)).await);

    // Give the subscription time to settle before mutating
    tokio::time::sleep(Duration::from_millis(200)).await;

    fs::write(source.join("live.txt"), "live").unwrap();
    assert!(wait_for(|| target.join("live.txt").exists(), Duration::from_secs(5)).await);

    fs::remove_file(source.join("seed.txt")).unwrap();
    assert!(wait_for(|| !target.join("seed.txt").exists(), Duration::from_secs(5)).await);

    handle.abort();
}

#[tokio::test(flavor = "multi_thread")]
async fn poll_daemon_detects_content_change() {
    let (_root, source, target) = setup_pair();

    let mut config = MirrorConfig::new(&source, &target);
    config.trigger = TriggerMode::Poll;
    config.poll_interval_secs = 1;

    let handle = spawn_daemon(config);

    assert!(wait_for(|| target.join("seed.txt").exists(), Duration::from_secs(5)).await);

    fs::write(source.join("seed.txt"), "updated").unwrap();
    assert!(
        wait_for(
            || content(&target.join("seed.txt")) == "updated",
            Duration::from_secs(10)
        )
        .await
    );

    handle.abort();
}
