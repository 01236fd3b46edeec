//! Drift check command

use colored::Colorize;

use mirror_core::{CheckStatus, MirrorEngine};

use crate::cli::PairArgs;
use crate::error::Result;

use super::resolve_config;

/// Report drift between source and target
pub fn run_check(pair: &PairArgs, json: bool) -> Result<()> {
    let config = resolve_config(pair)?;
    config.validate()?;

    let engine = MirrorEngine::new(&config);
    let report = engine.check()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.status {
        CheckStatus::InSync => {
            println!(
                "{} Target matches source. No drift detected.",
                "OK".green().bold()
            );
        }
        CheckStatus::Drifted => {
            println!(
                "{} Target has drifted from source:",
                "DRIFTED".red().bold()
            );
            for item in &report.missing {
                println!("   {} {}: {}", "-".yellow(), item.path.cyan(), item.description);
            }
            for item in &report.extraneous {
                println!("   {} {}: {}", "+".yellow(), item.path.cyan(), item.description);
            }
            for item in &report.mismatched {
                println!("   {} {}: {}", "!".red(), item.path.cyan(), item.description);
            }
            println!();
            println!("Run {} to repair.", "mirror sync".cyan());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_test_utils::temp_tree;

    #[test]
    fn check_runs_on_identical_trees() {
        let source = temp_tree(&[("a.txt", "1")]);
        let target = temp_tree(&[("a.txt", "1")]);

        let pair = PairArgs {
            config: None,
            source: Some(source.path().to_path_buf()),
            target: Some(target.path().to_path_buf()),
        };

        run_check(&pair, false).unwrap();
        run_check(&pair, true).unwrap();
    }
}
