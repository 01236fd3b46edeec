//! Mirror configuration loading and validation

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mirror_fs::NormalizedPath;

use crate::{Error, Result};

/// Default poll interval in seconds when falling back to fingerprinting
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// How the daemon detects source changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Try push-mode notification, fall back to polling
    #[default]
    Auto,
    /// Require push-mode notification; fail if unavailable
    Watch,
    /// Force periodic fingerprint polling
    Poll,
}

impl std::str::FromStr for TriggerMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "watch" => Ok(Self::Watch),
            "poll" => Ok(Self::Poll),
            other => Err(Error::InvalidTrigger {
                mode: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Watch => "watch",
            Self::Poll => "poll",
        };
        write!(f, "{}", s)
    }
}

/// Configuration for one mirror pair
///
/// The source tree is read-only from the daemon's perspective and mutated
/// by other processes; the target tree is exclusively owned by the daemon
/// and fully overwritten to match the source on every sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Directory to mirror from
    pub source: PathBuf,
    /// Directory to mirror into
    pub target: PathBuf,
    /// Change-detection strategy
    #[serde(default)]
    pub trigger: TriggerMode,
    /// Poll-mode fingerprint interval in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl MirrorConfig {
    /// Create a config with default trigger and interval settings
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            trigger: TriggerMode::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or does not
    /// parse in the detected format.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let extension = NormalizedPath::new(path).extension().unwrap_or("").to_string();

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::ConfigSerialize {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        })?;
        mirror_fs::io::write_atomic(path, content.as_bytes())?;
        Ok(())
    }

    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate the configured paths.
    ///
    /// The source must exist and be a directory. Source and target must not
    /// be nested inside one another: a target under the source would be
    /// re-copied into itself, and a source under the target would be
    /// deleted as extraneous.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let raw_source = NormalizedPath::new(&self.source);
        if !raw_source.is_dir() {
            return Err(Error::InvalidConfig {
                message: format!("source is not a directory: {}", raw_source),
            });
        }

        // Compare both as-given and resolved forms; the target may not
        // exist yet, and either side may reach the other through a symlink
        let source = raw_source.canonicalize()?;
        let raw_target = NormalizedPath::new(&self.target);
        let target = if raw_target.exists() {
            raw_target.canonicalize()?
        } else {
            raw_target.clone()
        };

        if target.is_within(&source) || raw_target.is_within(&raw_source) {
            return Err(Error::InvalidConfig {
                message: format!("target {} lies inside source {}", raw_target, raw_source),
            });
        }
        if source.is_within(&target) || raw_source.is_within(&raw_target) {
            return Err(Error::InvalidConfig {
                message: format!("source {} lies inside target {}", raw_source, raw_target),
            });
        }

        if self.poll_interval_secs == 0 {
            return Err(Error::InvalidConfig {
                message: "poll_interval_secs must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
