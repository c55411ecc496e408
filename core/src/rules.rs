//! Field classification tables
//!
//! Every field the engine touches is listed here, keyed by the exact name
//! the codec emits. Anything not listed passes through.

/// Rewrite applied to a top-level header property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    ReplayName,
    MatchStartEpoch,
    Date,
    Goals,
    PlayerStats,
}

/// Rewrite applied inside one `PlayerStats` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatRule {
    Name,
    Platform,
    OnlineId,
    Bot,
    PlayerId,
}

/// Rewrite applied inside a `PlayerID` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIdRule {
    Uid,
    NpId,
    EpicAccountId,
    Platform,
}

/// Rewrite applied inside an `NpId` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpIdRule {
    Handle,
    Opt,
    Reserved,
}

/// Bucket of a replicated frame entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRule {
    /// Identity or telemetry, removed from the frame
    Delete,
    PlayerName,
    TeamPaint,
    LoadoutsOnline,
    Loadout,
    CameraSettings,
    PassThrough,
}

pub const HEADER_RULES: &[(&str, HeaderRule)] = &[
    ("ReplayName", HeaderRule::ReplayName),
    ("MatchStartEpoch", HeaderRule::MatchStartEpoch),
    ("Date", HeaderRule::Date),
    ("Goals", HeaderRule::Goals),
    ("PlayerStats", HeaderRule::PlayerStats),
];

pub const STAT_RULES: &[(&str, StatRule)] = &[
    ("Name", StatRule::Name),
    ("Platform", StatRule::Platform),
    ("OnlineID", StatRule::OnlineId),
    ("bBot", StatRule::Bot),
    ("PlayerID", StatRule::PlayerId),
];

pub const PLAYER_ID_RULES: &[(&str, PlayerIdRule)] = &[
    ("Uid", PlayerIdRule::Uid),
    ("NpId", PlayerIdRule::NpId),
    ("EpicAccountId", PlayerIdRule::EpicAccountId),
    ("Platform", PlayerIdRule::Platform),
];

pub const NP_ID_RULES: &[(&str, NpIdRule)] = &[
    ("Handle", NpIdRule::Handle),
    ("Opt", NpIdRule::Opt),
    ("Reserved", NpIdRule::Reserved),
];

/// Key of the goal scorer inside a `Goals` entry
pub const GOAL_PLAYER_NAME: &str = "PlayerName";

/// Key of the zeroed id inside an `NpId.Handle` struct
pub const HANDLE_DATA: &str = "Data";

pub const PLAYER_NAME_ENTRY: &str = "Engine.PlayerReplicationInfo:PlayerName";
pub const BOT_FLAG_ENTRY: &str = "Engine.PlayerReplicationInfo:bBot";
pub const BOT_PRODUCT_ENTRY: &str = "TAGame.PRI_TA:BotProductName";

pub const ENTRY_RULES: &[(&str, EntryRule)] = &[
    ("ProjectX.GRI_X:Reservations", EntryRule::Delete),
    ("Engine.PlayerReplicationInfo:UniqueId", EntryRule::Delete),
    ("Engine.PlayerReplicationInfo:Ping", EntryRule::Delete),
    ("TAGame.PRI_TA:PartyLeader", EntryRule::Delete),
    ("TAGame.PRI_TA:SteeringSensitivity", EntryRule::Delete),
    ("TAGame.PRI_TA:Title", EntryRule::Delete),
    ("Engine.PlayerReplicationInfo:PlayerID", EntryRule::Delete),
    (PLAYER_NAME_ENTRY, EntryRule::PlayerName),
    ("TAGame.Car_TA:TeamPaint", EntryRule::TeamPaint),
    ("TAGame.PRI_TA:ClientLoadoutsOnline", EntryRule::LoadoutsOnline),
    ("TAGame.PRI_TA:ClientLoadouts", EntryRule::Loadout),
    (
        "TAGame.CameraSettingsActor_TA:ProfileSettings",
        EntryRule::CameraSettings,
    ),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, rule)| *rule)
}

pub fn header_rule(key: &str) -> Option<HeaderRule> {
    lookup(HEADER_RULES, key)
}

pub fn stat_rule(key: &str) -> Option<StatRule> {
    lookup(STAT_RULES, key)
}

pub fn player_id_rule(key: &str) -> Option<PlayerIdRule> {
    lookup(PLAYER_ID_RULES, key)
}

pub fn np_id_rule(key: &str) -> Option<NpIdRule> {
    lookup(NP_ID_RULES, key)
}

/// Classify a frame entry by its attribute name
pub fn entry_rule(name: &str) -> EntryRule {
    lookup(ENTRY_RULES, name).unwrap_or(EntryRule::PassThrough)
}
