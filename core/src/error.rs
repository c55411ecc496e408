//! Anonymisation error types

use std::fmt;

/// Fatal failure of one anonymisation run
///
/// A run that returns an error produces no document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnonymiseError {
    /// Every bot identity is already bound to another player
    #[error("bot identity pool exhausted ({pool_size} identities all assigned)")]
    PoolExhausted { pool_size: usize },

    /// A name-substitution site carried no usable player name, or named a
    /// player the registry never saw while strict checking was enabled
    #[error("unknown player reference at {site}: {}", .name.as_deref().unwrap_or("<missing>"))]
    UnknownPlayerReference {
        site: SubstitutionSite,
        name: Option<String>,
    },

    /// Applying the aggregate delta would push a size counter out of range
    #[error("size counter {counter} out of range: {value} {delta:+}")]
    SizeOutOfRange {
        counter: &'static str,
        value: u32,
        delta: i64,
    },
}

/// Where a player name was being substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionSite {
    /// `Goals[].PlayerName` in the header
    GoalScorer,
    /// `PlayerStats[].Name` in the header
    PlayerStats,
    /// `Engine.PlayerReplicationInfo:PlayerName` in a frame
    FrameEntry,
}

impl fmt::Display for SubstitutionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionSite::GoalScorer => write!(f, "Goals.PlayerName"),
            SubstitutionSite::PlayerStats => write!(f, "PlayerStats.Name"),
            SubstitutionSite::FrameEntry => write!(f, "frame PlayerName entry"),
        }
    }
}

/// Configuration loading/validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("replay name must not be empty")]
    EmptyReplayName,
}
