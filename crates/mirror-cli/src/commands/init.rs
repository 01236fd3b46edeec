//! Init command: write a starter config file

use std::path::Path;

use colored::Colorize;

use mirror_core::MirrorConfig;

use crate::error::{CliError, Result};

/// Write a starter `mirror.toml` for a source/target pair
pub fn run_init(source: &Path, target: &Path, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = MirrorConfig::new(source, target);
    config.save(path)?;

    println!(
        "{} Wrote {} ({} -> {}).",
        "OK".green().bold(),
        path.display(),
        source.display(),
        target.display()
    );
    println!("Run {} to start mirroring.", "mirror watch".cyan());

    Ok(())
}
