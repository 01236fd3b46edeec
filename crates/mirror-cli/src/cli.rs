//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// dirmirror - One-way, delete-propagating directory mirroring
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Source/target selection shared by commands
///
/// Either a config file or an explicit pair; explicit flags win. With
/// neither, `mirror.toml` in the working directory is used.
#[derive(Args, Debug, Clone, Default)]
pub struct PairArgs {
    /// Path to a mirror.toml or mirror.json config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to mirror from
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory to mirror into
    #[arg(short, long)]
    pub target: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Mirror once, then re-mirror on every detected source change
    ///
    /// Runs until terminated. Uses OS file-event notification when
    /// available and falls back to periodic content fingerprinting.
    ///
    /// Examples:
    ///   mirror watch -s ./data -t /backup/data
    ///   mirror watch --config mirror.toml --trigger poll --interval 5
    Watch {
        #[command(flatten)]
        pair: PairArgs,

        /// Change-detection strategy (auto, watch or poll)
        #[arg(long)]
        trigger: Option<String>,

        /// Poll-mode fingerprint interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Perform a single mirror pass
    Sync {
        #[command(flatten)]
        pair: PairArgs,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report drift between source and target without modifying anything
    Check {
        #[command(flatten)]
        pair: PairArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a starter mirror.toml for a source/target pair
    Init {
        /// Directory to mirror from
        source: PathBuf,

        /// Directory to mirror into
        target: PathBuf,

        /// Where to write the config file
        #[arg(long, default_value = "mirror.toml")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
