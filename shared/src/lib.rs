//! Shared types for the replay anonymiser.
//!
//! The decoded replay schema exchanged with the external codec: the
//! [`Document`] tree, its header property nodes and the network frame
//! replications. Everything here round-trips the codec's JSON form.

pub mod document;
pub mod property;
pub mod replication;

pub use document::{Content, ContentBody, Document, Header, HeaderBody, KeyFrame};
pub use property::{
    PropertyKind, PropertyMap, PropertyNode, PropertyValue, StructValue, encoded_len,
};
pub use replication::{
    CompressedId, EntryList, Frame, FrameReplication, ReplicatedEntry, ReplicationValue,
};
