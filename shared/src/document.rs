//! Decoded replay container
//!
//! Mirrors the codec's JSON output: a header section and a content
//! section, each with a checksum and a declared byte size the codec trusts
//! verbatim on re-encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::property::PropertyMap;
use crate::replication::Frame;

/// Complete decoded replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub header: Header,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub body: HeaderBody,
    pub crc: u32,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBody {
    pub engine_version: u32,
    pub licensee_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_version: Option<u32>,
    pub label: String,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub body: ContentBody,
    pub crc: u32,
    pub size: u32,
}

/// Network stream plus the lookup tables the codec needs to decode it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBody {
    pub frames: Vec<Frame>,
    pub key_frames: Vec<KeyFrame>,
    pub stream_size: u32,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub caches: Vec<Value>,
    #[serde(default)]
    pub class_mappings: Vec<Value>,
    #[serde(default)]
    pub levels: Vec<Value>,
    #[serde(default)]
    pub marks: Vec<Value>,
    #[serde(default)]
    pub names: Vec<Value>,
    #[serde(default)]
    pub objects: Vec<Value>,
    #[serde(default)]
    pub packages: Vec<Value>,
    #[serde(default)]
    pub unknown: Vec<Value>,
}

/// Seek point into the network stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    pub frame: u32,
    /// Bit offset of the frame inside the stream
    ///
    /// Decodes from `position` or `positions`; always encodes as the codec's
    /// `position`, so only that spelling round-trips unchanged.
    #[serde(alias = "positions")]
    pub position: u32,
    pub time: f32,
}

impl Document {
    /// Decode from the codec's JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encode back to JSON text for the codec
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
