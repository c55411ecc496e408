//! Header property tree
//!
//! Properties are ordered `(key, node)` pairs. Every node carries the
//! serialized size the codec will trust when re-encoding, so any mutation
//! goes through [`PropertyNode`] methods that keep `size` in step with
//! `value`.

use serde::{Deserialize, Serialize};

/// Schema tag of a property node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    IntProperty,
    StrProperty,
    BoolProperty,
    FloatProperty,
    QWordProperty,
    ByteProperty,
    ArrayProperty,
    NameProperty,
    StructProperty,
}

impl PropertyKind {
    /// Whether the declared size of this kind follows the string length rule
    pub fn is_string(self) -> bool {
        matches!(self, PropertyKind::StrProperty | PropertyKind::NameProperty)
    }

    /// Whether the declared size is owned by the enclosing aggregate
    pub fn is_aggregate(self) -> bool {
        matches!(self, PropertyKind::ArrayProperty | PropertyKind::StructProperty)
    }
}

/// Typed property payload, one variant per schema kind
///
/// Encoded externally tagged, e.g. `{"str": "Foo"}` or `{"q_word": "0"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Int(i32),
    Str(String),
    /// Booleans are stored as a `0`/`1` byte
    Bool(u8),
    Float(f32),
    /// 64-bit values travel as decimal strings
    QWord(String),
    /// Enum byte, `[enum_name, {"Right": variant}]` in practice
    Byte(serde_json::Value),
    Array(Vec<PropertyMap>),
    Struct(StructValue),
    Name(String),
}

impl PropertyValue {
    /// Borrow the text of a string-like payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) | PropertyValue::Name(s) | PropertyValue::QWord(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<PropertyMap>> {
        match self {
            PropertyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructValue> {
        match self {
            PropertyValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// Named struct payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructValue {
    pub name: String,
    pub fields: PropertyMap,
}

/// Length of a string as the codec counts it (UTF-16 code units)
pub fn encoded_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// One schema-tagged value with its declared serialized size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyNode {
    pub index: u32,
    pub kind: PropertyKind,
    pub size: u32,
    pub value: PropertyValue,
    /// Declared size before the first mutation through this node
    #[serde(skip)]
    original_size: Option<u32>,
}

impl PartialEq for PropertyNode {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.kind == other.kind
            && self.size == other.size
            && self.value == other.value
    }
}

impl PropertyNode {
    /// Create a node with an explicit declared size
    pub fn new(kind: PropertyKind, size: u32, value: PropertyValue) -> Self {
        Self {
            index: 0,
            kind,
            size,
            value,
            original_size: None,
        }
    }

    /// Create a string node whose size follows the string length rule
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let size = encoded_len(&value);
        Self::new(PropertyKind::StrProperty, size, PropertyValue::Str(value))
    }

    /// Declared size as it was before any mutation
    pub fn original_size(&self) -> u32 {
        self.original_size.unwrap_or(self.size)
    }

    /// Signed change of the declared size since the node was decoded
    pub fn size_delta(&self) -> i64 {
        i64::from(self.size) - i64::from(self.original_size())
    }

    fn remember_original(&mut self) {
        self.original_size.get_or_insert(self.size);
    }

    /// Replace the payload and recompute the declared size
    ///
    /// String kinds recompute from the new text. Scalar kinds keep their
    /// declared size (it is a schema constant), and aggregate kinds leave
    /// their size to the enclosing roll-up.
    pub fn set_value(&mut self, value: PropertyValue) {
        self.remember_original();
        self.value = value;
        self.recompute_size();
    }

    /// Replace the payload with an explicit schema-constant size
    pub fn set_value_sized(&mut self, value: PropertyValue, size: u32) {
        self.remember_original();
        self.value = value;
        self.size = size;
    }

    /// Replace kind, payload and size wholesale, keeping the index
    pub fn replace(&mut self, kind: PropertyKind, value: PropertyValue, size: u32) {
        self.remember_original();
        self.kind = kind;
        self.value = value;
        self.size = size;
    }

    /// Re-derive `size` from `value` where the kind defines a rule
    pub fn recompute_size(&mut self) {
        if self.kind.is_string() {
            if let Some(text) = self.value.as_text() {
                self.size = encoded_len(text);
            }
        }
    }
}

/// Ordered property pairs plus the opaque terminator key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMap {
    pub elements: Vec<(String, PropertyNode)>,
    pub last_key: String,
}

impl Default for PropertyMap {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            last_key: "None".to_string(),
        }
    }
}

impl PropertyMap {
    pub fn get(&self, key: &str) -> Option<&PropertyNode> {
        self.elements.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyNode> {
        self.elements
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append a new pair, or replace the node of an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, node: PropertyNode) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = node,
            None => self.elements.push((key, node)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut PropertyNode)> {
        self.elements.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sum of declared size changes of every leaf node, recursing into
    /// aggregates
    ///
    /// Aggregate sizes are derived from their children and are not counted
    /// a second time.
    pub fn total_size_delta(&self) -> i64 {
        self.elements
            .iter()
            .map(|(_, node)| node_total_delta(node))
            .sum()
    }

    /// Roll leaf size changes up into every enclosing array and struct node,
    /// deepest first
    ///
    /// Each aggregate ends at its decoded size plus the net change of its
    /// subtree. Returns the net change of this map. Idempotent.
    pub fn settle_aggregate_sizes(&mut self) -> i64 {
        self.elements
            .iter_mut()
            .map(|(_, node)| node.settle_aggregate_size())
            .sum()
    }
}

impl PropertyNode {
    fn settle_aggregate_size(&mut self) -> i64 {
        let nested: i64 = match &mut self.value {
            PropertyValue::Array(items) => items
                .iter_mut()
                .map(PropertyMap::settle_aggregate_sizes)
                .sum(),
            PropertyValue::Struct(s) => s.fields.settle_aggregate_sizes(),
            _ => return self.size_delta(),
        };
        if nested != 0 || self.original_size.is_some() {
            self.remember_original();
            let settled = i64::from(self.original_size()) + nested;
            self.size = settled.clamp(0, i64::from(u32::MAX)) as u32;
        }
        nested
    }
}

fn node_total_delta(node: &PropertyNode) -> i64 {
    match &node.value {
        PropertyValue::Array(items) => items.iter().map(PropertyMap::total_size_delta).sum(),
        PropertyValue::Struct(s) => s.fields.total_size_delta(),
        _ => node.size_delta(),
    }
}
