//! Network frame replication records
//!
//! Attribute payloads vary per replicated field, so entry values stay as
//! raw JSON. The engine reaches into the handful of payloads it rewrites
//! and passes everything else through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compressed integer as the codec writes it (`value` bounded by `limit`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedId {
    pub limit: u32,
    pub value: u32,
}

impl CompressedId {
    pub const fn new(limit: u32, value: u32) -> Self {
        Self { limit, value }
    }
}

/// One named attribute inside an actor update or spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedEntry {
    pub id: CompressedId,
    /// Fully qualified attribute name, e.g. `Engine.PlayerReplicationInfo:PlayerName`
    pub name: String,
    pub value: Value,
}

impl ReplicatedEntry {
    pub fn new(id: CompressedId, name: impl Into<String>, value: Value) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}

/// Payload of a `spawned`/`updated` slot
///
/// Attribute lists decode as [`EntryList::Entries`]; anything else (spawn
/// metadata objects, future shapes) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryList {
    Entries(Vec<ReplicatedEntry>),
    Opaque(Value),
}

impl EntryList {
    pub fn entries_mut(&mut self) -> Option<&mut Vec<ReplicatedEntry>> {
        match self {
            EntryList::Entries(entries) => Some(entries),
            EntryList::Opaque(_) => None,
        }
    }
}

/// What happened to an actor in this frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawned: Option<EntryList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<EntryList>,
    /// Empty marker for destroyed actors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destroyed: Option<Value>,
}

impl ReplicationValue {
    /// The populated attribute slot, `spawned` taking precedence
    pub fn entries_mut(&mut self) -> Option<&mut Vec<ReplicatedEntry>> {
        match (&mut self.spawned, &mut self.updated) {
            (Some(list), _) => list.entries_mut(),
            (None, Some(list)) => list.entries_mut(),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReplication {
    pub actor_id: CompressedId,
    pub value: ReplicationValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub delta: f32,
    pub time: f32,
    pub replications: Vec<FrameReplication>,
}
