//! End-to-end integration test for the mirror flow
//!
//! Exercises the complete path: config loading -> mirror pass -> drift
//! check -> fingerprint comparison.

use std::fs;
use std::path::PathBuf;

use mirror_core::{CheckStatus, MirrorConfig, MirrorEngine, TriggerMode};
use mirror_fs::fingerprint_tree;
use mirror_test_utils::{read_tree, temp_tree, write_tree};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Set up a source tree, a target path, and a config file naming both
fn setup_pair() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let root = TempDir::new().unwrap();
    let source = root.path().join("src");
    let target = root.path().join("dst");
    fs::create_dir(&source).unwrap();
    write_tree(&source, &[("a.txt", "1"), ("docs/readme.md", "# hi")]);

    let config_path = root.path().join("mirror.toml");
    fs::write(
        &config_path,
        format!(
            "source = {:?}\ntarget = {:?}\ntrigger = \"poll\"\n",
            source, target
        ),
    )
    .unwrap();

    (root, source, target, config_path)
}

#[test]
fn config_to_mirror_to_check_flow() {
    let (_root, source, target, config_path) = setup_pair();

    let config = MirrorConfig::load(&config_path).unwrap();
    assert_eq!(config.trigger, TriggerMode::Poll);
    config.validate().unwrap();

    let engine = MirrorEngine::new(&config);

    // First pass mirrors everything
    let report = engine.sync().unwrap();
    assert!(report.success);
    assert_eq!(read_tree(&target), read_tree(&source));
    assert_eq!(engine.check().unwrap().status, CheckStatus::InSync);

    // Source mutates: changed file, new file, deleted subtree
    write_tree(&source, &[("a.txt", "changed"), ("new.txt", "n")]);
    fs::remove_file(source.join("docs/readme.md")).unwrap();
    fs::remove_dir(source.join("docs")).unwrap();

    assert_eq!(engine.check().unwrap().status, CheckStatus::Drifted);

    // Second pass converges
    engine.sync().unwrap();
    assert_eq!(read_tree(&target), read_tree(&source));
    assert_eq!(engine.check().unwrap().status, CheckStatus::InSync);
}

#[test]
fn mirrored_trees_share_a_fingerprint() {
    let source = temp_tree(&[("x.txt", "x"), ("deep/y.txt", "y")]);
    let target = TempDir::new().unwrap();

    let engine = MirrorEngine::with_paths(source.path(), target.path());
    engine.sync().unwrap();

    assert_eq!(
        fingerprint_tree(source.path()).unwrap(),
        fingerprint_tree(target.path()).unwrap()
    );

    // Any target-only mutation breaks the match until the next pass
    fs::write(target.path().join("stray.txt"), "s").unwrap();
    assert_ne!(
        fingerprint_tree(source.path()).unwrap(),
        fingerprint_tree(target.path()).unwrap()
    );

    engine.sync().unwrap();
    assert_eq!(
        fingerprint_tree(source.path()).unwrap(),
        fingerprint_tree(target.path()).unwrap()
    );
}
