//! Watch command: the daemon loop

use chrono::Local;
use colored::Colorize;

use mirror_core::{MirrorEngine, Sha256Fingerprinter, TriggerMode, daemon};

use crate::cli::PairArgs;
use crate::error::{CliError, Result};

use super::resolve_config;

/// Mirror once, then re-mirror on every detected source change.
///
/// Runs until the process is terminated.
pub fn run_watch(pair: &PairArgs, trigger: Option<&str>, interval: Option<u64>) -> Result<()> {
    let mut config = resolve_config(pair)?;
    if let Some(mode) = trigger {
        config.trigger = mode.parse::<TriggerMode>().map_err(CliError::Core)?;
    }
    if let Some(secs) = interval {
        config.poll_interval_secs = secs;
    }

    println!(
        "{} [{}] Watching {} -> {} (trigger: {})",
        "=>".blue().bold(),
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.source.display(),
        config.target.display(),
        config.trigger
    );

    let engine = MirrorEngine::new(&config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(daemon::run(&config, &engine, &Sha256Fingerprinter))?;

    Ok(())
}
