//! Known-key sets used to spot schema drift
//!
//! Drift is never fatal. Unknown keys pass through unanonymised and missing
//! keys are simply not rewritten; both are reported so newer document
//! variants get noticed.

use hashbrown::HashSet;
use serde::Serialize;

/// A property scope with its expected keys
#[derive(Debug, Clone, Copy)]
pub struct KeyScope {
    pub name: &'static str,
    /// Keys every well-formed document carries
    pub required: &'static [&'static str],
    /// Keys that are known but may be absent
    pub optional: &'static [&'static str],
}

impl KeyScope {
    pub fn is_known(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }

    /// Compare the keys actually present against this scope
    pub fn check<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Vec<SchemaDrift> {
        let present: Vec<&str> = keys.into_iter().collect();
        let mut drift = Vec::new();

        for key in &present {
            if !self.is_known(key) {
                drift.push(SchemaDrift::new(self.name, key, DriftKind::Unknown));
            }
        }

        let seen: HashSet<&str> = present.iter().copied().collect();
        for key in self.required {
            if !seen.contains(key) {
                drift.push(SchemaDrift::new(self.name, key, DriftKind::Missing));
            }
        }

        for finding in &drift {
            tracing::debug!(scope = finding.scope, key = %finding.key, kind = ?finding.kind, "schema drift");
        }
        drift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// Key outside the known set, passed through untouched
    Unknown,
    /// Expected key absent from the document
    Missing,
}

/// One schema drift finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDrift {
    pub scope: &'static str,
    pub key: String,
    pub kind: DriftKind,
}

impl SchemaDrift {
    pub fn new(scope: &'static str, key: &str, kind: DriftKind) -> Self {
        Self {
            scope,
            key: key.to_string(),
            kind,
        }
    }
}

pub const HEADER_SCOPE: KeyScope = KeyScope {
    name: "HeaderProperties",
    required: &[
        "Date",
        "Goals",
        "Id",
        "KeyframeDelay",
        "MapName",
        "MatchType",
        "MaxChannels",
        "MaxReplaySizeMB",
        "NumFrames",
        "PlayerName",
        "PlayerStats",
        "RecordFPS",
        "TeamSize",
    ],
    optional: &[
        "BuildID",
        "BuildVersion",
        "Changelist",
        "GameVersion",
        "HighLights",
        "MatchGuid",
        "MatchStartEpoch",
        "PrimaryPlayerTeam",
        "ReplayLastSaveVersion",
        "ReplayName",
        "ReplayVersion",
        "ReserveMegabytes",
        "Team0Score",
        "Team1Score",
        "TotalSecondsPlayed",
        "UnfairTeamSize",
    ],
};

pub const PLAYER_STATS_SCOPE: KeyScope = KeyScope {
    name: "PlayerStats",
    required: &[
        "Name", "Platform", "OnlineID", "Team", "Score", "Goals", "Assists", "Saves", "Shots",
        "bBot",
    ],
    optional: &["PlayerID"],
};

pub const GOALS_SCOPE: KeyScope = KeyScope {
    name: "Goals",
    required: &["frame", "PlayerName", "PlayerTeam"],
    optional: &[],
};

pub const PLAYER_ID_SCOPE: KeyScope = KeyScope {
    name: "PlayerID",
    required: &[],
    optional: &["Uid", "NpId", "EpicAccountId", "Platform", "SplitscreenID"],
};

pub const NP_ID_SCOPE: KeyScope = KeyScope {
    name: "NpId",
    required: &["Handle", "Opt", "Reserved"],
    optional: &[],
};

pub const HANDLE_SCOPE: KeyScope = KeyScope {
    name: "Handle",
    required: &["Data", "Term", "Dummy"],
    optional: &[],
};
