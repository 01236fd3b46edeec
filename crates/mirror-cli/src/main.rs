//! dirmirror CLI
//!
//! The command-line interface for one-way directory mirroring.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Status lines from the daemon come through tracing; verbose raises
    // the level to DEBUG
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match cli.command {
        Some(Commands::Watch {
            pair,
            trigger,
            interval,
        }) => commands::run_watch(&pair, trigger.as_deref(), interval),
        Some(Commands::Sync {
            pair,
            dry_run,
            json,
        }) => commands::run_sync(&pair, dry_run, json),
        Some(Commands::Check { pair, json }) => commands::run_check(&pair, json),
        Some(Commands::Init {
            source,
            target,
            path,
            force,
        }) => commands::run_init(&source, &target, &path, force),
        None => {
            println!("{} dirmirror CLI", "mirror".green().bold());
            println!();
            println!("Run {} for available commands.", "mirror --help".cyan());
            Ok(())
        }
    }
}
