//! Command implementations

mod check;
mod init;
mod sync;
mod watch;

pub use check::run_check;
pub use init::run_init;
pub use sync::run_sync;
pub use watch::run_watch;

use std::path::Path;

use mirror_core::MirrorConfig;

use crate::cli::PairArgs;
use crate::error::{CliError, Result};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "mirror.toml";

/// Resolve the mirror pair from CLI arguments.
///
/// Explicit `--source`/`--target` flags win; otherwise `--config` is
/// loaded; otherwise `mirror.toml` in the working directory.
pub fn resolve_config(pair: &PairArgs) -> Result<MirrorConfig> {
    match (&pair.source, &pair.target) {
        (Some(source), Some(target)) => Ok(MirrorConfig::new(source, target)),
        (Some(_), None) | (None, Some(_)) => Err(CliError::user(
            "both --source and --target are required when not using a config file",
        )),
        (None, None) => {
            if let Some(path) = &pair.config {
                return Ok(MirrorConfig::load(path)?);
            }
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                return Ok(MirrorConfig::load(default)?);
            }
            Err(CliError::user(
                "no configuration: pass --source/--target, --config, or create mirror.toml",
            ))
        }
    }
}
