//! Shared builders for unit and integration tests

use chrono::{DateTime, Local, TimeZone};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde_json::{Value, json};

use anonymiser_shared::{
    CompressedId, Content, ContentBody, Document, EntryList, Frame, FrameReplication, Header,
    HeaderBody, KeyFrame, PropertyKind, PropertyMap, PropertyNode, PropertyValue,
    ReplicatedEntry, ReplicationValue,
};

use crate::registry::{BOT_PRODUCT_ID_BASE, BotIdentity, BotRegistry};
use crate::rules::PLAYER_NAME_ENTRY;

pub const HEADER_SIZE: u32 = 5_000;
pub const CONTENT_SIZE: u32 = 90_000;
pub const STREAM_SIZE: u32 = 80_000;

// ============================================================================
// Properties
// ============================================================================

pub fn str_prop(value: &str) -> PropertyNode {
    PropertyNode::string(value)
}

pub fn int_prop(value: i32) -> PropertyNode {
    PropertyNode::new(PropertyKind::IntProperty, 4, PropertyValue::Int(value))
}

pub fn qword_prop(value: &str) -> PropertyNode {
    PropertyNode::new(
        PropertyKind::QWordProperty,
        8,
        PropertyValue::QWord(value.to_string()),
    )
}

pub fn array_prop(items: Vec<PropertyMap>) -> PropertyNode {
    PropertyNode::new(PropertyKind::ArrayProperty, 1_000, PropertyValue::Array(items))
}

pub fn map(pairs: Vec<(&str, PropertyNode)>) -> PropertyMap {
    let mut map = PropertyMap::default();
    for (key, node) in pairs {
        map.insert(key, node);
    }
    map
}

pub fn goal(scorer: &str) -> PropertyMap {
    map(vec![
        ("frame", int_prop(1200)),
        ("PlayerName", str_prop(scorer)),
        ("PlayerTeam", int_prop(0)),
    ])
}

/// Stat block with every known key except `PlayerID`
pub fn stat_block(name: &str) -> PropertyMap {
    map(vec![
        ("Name", str_prop(name)),
        (
            "Platform",
            PropertyNode::new(
                PropertyKind::ByteProperty,
                29,
                PropertyValue::Byte(json!(["OnlinePlatform", {"Right": "OnlinePlatform_Steam"}])),
            ),
        ),
        ("OnlineID", qword_prop("76561198000000001")),
        ("Team", int_prop(0)),
        ("Score", int_prop(320)),
        ("Goals", int_prop(1)),
        ("Assists", int_prop(0)),
        ("Saves", int_prop(2)),
        ("Shots", int_prop(3)),
        (
            "bBot",
            PropertyNode::new(PropertyKind::BoolProperty, 0, PropertyValue::Bool(0)),
        ),
    ])
}

/// Header properties carrying every required key
pub fn header_properties(players: &[&str], scorers: &[&str]) -> PropertyMap {
    map(vec![
        ("TeamSize", int_prop(players.len().div_ceil(2) as i32)),
        ("Goals", array_prop(scorers.iter().map(|s| goal(s)).collect())),
        ("PlayerStats", array_prop(players.iter().map(|p| stat_block(p)).collect())),
        ("Id", str_prop("6E1DF4C14A4B8D3F5F3E0A8B0D2C3A11")),
        ("MapName", PropertyNode::new(PropertyKind::NameProperty, 9, PropertyValue::Name("stadium_p".into()))),
        ("Date", str_prop("2021-05-09 21-14-03")),
        ("MatchStartEpoch", qword_prop("1620587643")),
        ("NumFrames", int_prop(9000)),
        ("MatchType", PropertyNode::new(PropertyKind::NameProperty, 6, PropertyValue::Name("Online".into()))),
        ("PlayerName", str_prop(players.first().copied().unwrap_or("Nobody"))),
        ("KeyframeDelay", PropertyNode::new(PropertyKind::FloatProperty, 4, PropertyValue::Float(2.0))),
        ("MaxChannels", int_prop(1023)),
        ("MaxReplaySizeMB", int_prop(500)),
        ("RecordFPS", PropertyNode::new(PropertyKind::FloatProperty, 4, PropertyValue::Float(30.0))),
    ])
}

// ============================================================================
// Frames
// ============================================================================

pub fn entry(name: &str, value: Value) -> ReplicatedEntry {
    ReplicatedEntry::new(CompressedId::new(111, 0), name, value)
}

pub fn name_entry(player: &str) -> ReplicatedEntry {
    entry(PLAYER_NAME_ENTRY, json!({"string": player}))
}

pub fn updated(actor: u32, entries: Vec<ReplicatedEntry>) -> FrameReplication {
    FrameReplication {
        actor_id: CompressedId::new(2047, actor),
        value: ReplicationValue {
            updated: Some(EntryList::Entries(entries)),
            ..Default::default()
        },
    }
}

pub fn spawned(actor: u32, entries: Vec<ReplicatedEntry>) -> FrameReplication {
    FrameReplication {
        actor_id: CompressedId::new(2047, actor),
        value: ReplicationValue {
            spawned: Some(EntryList::Entries(entries)),
            ..Default::default()
        },
    }
}

pub fn destroyed(actor: u32) -> FrameReplication {
    FrameReplication {
        actor_id: CompressedId::new(2047, actor),
        value: ReplicationValue {
            destroyed: Some(json!([])),
            ..Default::default()
        },
    }
}

pub fn frame(replications: Vec<FrameReplication>) -> Frame {
    Frame {
        delta: 0.033,
        time: 1.5,
        replications,
    }
}

/// One frame with a name update per player
pub fn name_frame(players: &[&str]) -> Frame {
    frame(
        players
            .iter()
            .zip(10..)
            .map(|(p, actor)| updated(actor, vec![name_entry(p)]))
            .collect(),
    )
}

// ============================================================================
// Documents
// ============================================================================

pub fn key_frames(count: u32) -> Vec<KeyFrame> {
    (0..count)
        .map(|i| KeyFrame {
            frame: i * 300,
            position: i * 40_000,
            time: i as f32 * 10.0,
        })
        .collect()
}

pub fn document(properties: PropertyMap, frames: Vec<Frame>) -> Document {
    Document {
        header: Header {
            body: HeaderBody {
                engine_version: 868,
                licensee_version: 32,
                patch_version: Some(10),
                label: "TAGame.Replay_Soccar_TA".to_string(),
                properties,
            },
            crc: 0x1234_5678,
            size: HEADER_SIZE,
        },
        content: Content {
            body: ContentBody {
                frames,
                key_frames: key_frames(3),
                stream_size: STREAM_SIZE,
                messages: vec![json!({"frame": 10, "name": "Alice", "value": "gg"})],
                caches: Vec::new(),
                class_mappings: Vec::new(),
                levels: vec![json!("stadium_p")],
                marks: Vec::new(),
                names: Vec::new(),
                objects: vec![json!("Engine.PlayerReplicationInfo:PlayerName")],
                packages: Vec::new(),
                unknown: Vec::new(),
            },
            crc: 0x8765_4321,
            size: CONTENT_SIZE,
        },
    }
}

/// Document where every player appears in stats, as a scorer, and in one frame
pub fn match_document(players: &[&str]) -> Document {
    document(
        header_properties(players, players),
        vec![name_frame(players)],
    )
}

// ============================================================================
// Registry and clock
// ============================================================================

pub fn pool(names: &[&str]) -> Vec<BotIdentity> {
    names
        .iter()
        .zip(BOT_PRODUCT_ID_BASE..)
        .map(|(name, id)| BotIdentity::new(*name, id))
        .collect()
}

pub fn registry(names: &[&str]) -> BotRegistry {
    BotRegistry::with_pool(pool(names), Pcg64::seed_from_u64(11))
}

pub fn fixed_time() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 3, 7, 9, 5, 2)
        .single()
        .expect("unambiguous local time")
}

/// Text of a string-like property
pub fn text_at(properties: &PropertyMap, key: &str) -> Option<String> {
    properties
        .get(key)
        .and_then(|node| node.value.as_text())
        .map(str::to_string)
}
