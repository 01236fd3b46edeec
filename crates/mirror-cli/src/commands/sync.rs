//! One-shot sync command

use chrono::Local;
use colored::Colorize;

use mirror_core::{MirrorEngine, SyncOptions};

use crate::cli::PairArgs;
use crate::error::{CliError, Result};

use super::resolve_config;

/// Run a single mirror pass
pub fn run_sync(pair: &PairArgs, dry_run: bool, json: bool) -> Result<()> {
    let config = resolve_config(pair)?;
    config.validate()?;

    let engine = MirrorEngine::new(&config);

    if !json {
        println!(
            "{} [{}] Mirroring {} -> {}",
            "=>".blue().bold(),
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            config.source.display(),
            config.target.display()
        );
    }

    let report = engine.sync_with_options(SyncOptions { dry_run })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for action in &report.actions {
        println!("   {} {}", "-".green(), action);
    }
    for error in &report.errors {
        println!("   {} {}", "!".red(), error);
    }

    if report.success {
        println!(
            "{} [{}] Mirror complete ({} actions).",
            "OK".green().bold(),
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            report.actions.len()
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "mirror finished with {} errors",
            report.errors.len()
        )))
    }
}
