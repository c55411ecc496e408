//! Replay anonymiser core
//!
//! Rewrites a decoded replay document so no player can be identified from
//! it, while keeping every declared size the codec relies on exact.
//!
//! # Architecture
//!
//! - [`BotRegistry`] - Stable name to pseudonym bindings for one run
//! - [`HeaderRewriter`] - Header property pass (titles, timestamps, stats, goals)
//! - [`FrameRewriter`] - Frame replication pass (names, cosmetics, identity entries)
//! - [`SizeLedger`] - Rolls name length changes into the root size counters
//! - [`Anonymiser`] - Runs the passes in order and reports what changed
//!
//! ```ignore
//! use anonymiser_core::{AnonymiseConfig, anonymise};
//!
//! let config = AnonymiseConfig::default().with_guest("Alice");
//! let document = anonymise(document, &config)?;
//! ```

// Nested `json!` fixtures in the integration tests
#![cfg_attr(test, recursion_limit = "256")]

pub mod anonymiser;
pub mod config;
pub mod error;
pub mod frames;
pub mod header;
#[cfg(test)]
mod integration;
pub mod key_frames;
pub mod payload;
pub mod propagate;
pub mod registry;
pub mod rules;
pub mod schema;
#[cfg(test)]
pub mod test_utils;

pub use anonymiser::{AnonymiseReport, Anonymiser, anonymise, anonymise_json};
pub use config::AnonymiseConfig;
pub use error::{AnonymiseError, ConfigError, SubstitutionSite};
pub use frames::{FrameOutcome, FrameRewriter};
pub use header::{HeaderOutcome, HeaderRewriter};
pub use key_frames::truncate_key_frames;
pub use propagate::{SIZE_FACTOR, SizeLedger};
pub use registry::{BotIdentity, BotRegistry, ResolvedIdentity, default_pool};
pub use schema::{DriftKind, SchemaDrift};

// Re-export the document model so callers need only this crate
pub use anonymiser_shared::{Document, PropertyKind, PropertyMap, PropertyNode, PropertyValue};
