//! Run configuration
//!
//! Loadable from TOML. Every field has a default, so an empty file is a
//! valid configuration.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one anonymisation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymiseConfig {
    /// Title written to the output `ReplayName` (default: random id)
    #[serde(default = "default_replay_name")]
    pub replay_name: String,
    /// Player kept visible under the `"Guest"` sentinel
    #[serde(default)]
    pub guest_name: Option<String>,
    /// Seed for bot identity assignment (default: random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Empty `messages` in the content body (default: true)
    #[serde(default = "default_true")]
    pub clear_messages: bool,
    /// Fail on frame player names the header never mentioned (default: false)
    ///
    /// When off, a name first seen in the frames is bound to a fresh pool
    /// identity instead of aborting the run. A missing or non-string name is
    /// fatal either way.
    #[serde(default)]
    pub strict_players: bool,
    /// Clock used for `MatchStartEpoch` and `Date`; `None` reads the local clock
    #[serde(skip)]
    pub timestamp: Option<DateTime<Local>>,
}

fn default_replay_name() -> String {
    format!("Anonymised replay #{:016x}", rand::random::<u64>())
}

fn default_true() -> bool {
    true
}

impl Default for AnonymiseConfig {
    fn default() -> Self {
        Self {
            replay_name: default_replay_name(),
            guest_name: None,
            seed: None,
            clear_messages: true,
            strict_players: false,
            timestamp: None,
        }
    }
}

const CONFIG_FILE: &str = "config.toml";

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/replay-anonymiser`
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "replay-anonymiser")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads `config.toml` from the configuration directory.
///
/// A missing directory or file yields the defaults; a file that exists but
/// does not parse is an error.
pub fn load() -> Result<AnonymiseConfig, ConfigError> {
    match config_dir() {
        Some(dir) => load_from(&dir),
        None => Ok(AnonymiseConfig::default()),
    }
}

/// Loads `config.toml` from `dir`, falling back to the defaults when absent
pub fn load_from(dir: &Path) -> Result<AnonymiseConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        AnonymiseConfig::from_file(&path)
    } else {
        Ok(AnonymiseConfig::default())
    }
}

impl AnonymiseConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded anonymiser config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replay_name.trim().is_empty() {
            return Err(ConfigError::EmptyReplayName);
        }
        Ok(())
    }

    pub fn with_replay_name(mut self, name: impl Into<String>) -> Self {
        self.replay_name = name.into();
        self
    }

    pub fn with_guest(mut self, name: impl Into<String>) -> Self {
        self.guest_name = Some(name.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
