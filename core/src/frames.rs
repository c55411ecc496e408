//! Frame replication rewriting
//!
//! Each attribute list is classified against the entry rule table, rewritten
//! in place, stripped of identity entries, and finally tagged with bot
//! markers when a player name was swapped for a pool identity.

use rand::Rng;
use serde_json::{Value, json};

use anonymiser_shared::{CompressedId, Frame, ReplicatedEntry, encoded_len};

use crate::error::{AnonymiseError, SubstitutionSite};
use crate::payload;
use crate::registry::{BotRegistry, ResolvedIdentity};
use crate::rules::{BOT_FLAG_ENTRY, BOT_PRODUCT_ENTRY, EntryRule, entry_rule};

/// Schema id of the appended `bBot` marker
pub const BOT_FLAG_ID: CompressedId = CompressedId::new(111, 25);
/// Schema id of the appended `BotProductName` marker
pub const BOT_PRODUCT_ID: CompressedId = CompressedId::new(111, 48);

/// Key of the player name text inside a `PlayerName` payload
const NAME_TEXT: &str = "string";

/// What one content pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Sum of pseudonym length changes (new - old)
    pub name_delta: i64,
    pub substitutions: u32,
    pub removed_entries: usize,
    pub appended_markers: usize,
}

pub fn bot_flag_marker() -> ReplicatedEntry {
    ReplicatedEntry::new(BOT_FLAG_ID, BOT_FLAG_ENTRY, json!({"boolean": true}))
}

pub fn bot_product_marker(product_id: u32) -> ReplicatedEntry {
    ReplicatedEntry::new(BOT_PRODUCT_ID, BOT_PRODUCT_ENTRY, json!({"int": product_id}))
}

/// Content pass over the frame stream
pub struct FrameRewriter<'a, R> {
    registry: &'a mut BotRegistry<R>,
    guest: Option<&'a str>,
    /// Only names already bound by the header pass may appear
    strict: bool,
    outcome: FrameOutcome,
}

impl<'a, R: Rng> FrameRewriter<'a, R> {
    pub fn new(registry: &'a mut BotRegistry<R>, guest: Option<&'a str>, strict: bool) -> Self {
        Self {
            registry,
            guest,
            strict,
            outcome: FrameOutcome::default(),
        }
    }

    pub fn rewrite(mut self, frames: &mut [Frame]) -> Result<FrameOutcome, AnonymiseError> {
        for frame in frames {
            for replication in &mut frame.replications {
                // Destroyed actors and opaque spawn payloads carry no attributes
                let Some(entries) = replication.value.entries_mut() else {
                    continue;
                };
                self.rewrite_entries(entries)?;
            }
        }
        Ok(self.outcome)
    }

    /// Rewrite one attribute list in place
    pub fn rewrite_entries(
        &mut self,
        entries: &mut Vec<ReplicatedEntry>,
    ) -> Result<(), AnonymiseError> {
        let mut doomed = Vec::new();
        let mut product_id = None;

        for (index, entry) in entries.iter_mut().enumerate() {
            let rule = entry_rule(&entry.name);
            let scrubbed = match rule {
                EntryRule::Delete => {
                    doomed.push(index);
                    true
                }
                EntryRule::PlayerName => {
                    // The last name in the list decides the markers
                    product_id = self.substitute(&mut entry.value)?.product_id;
                    true
                }
                EntryRule::TeamPaint => payload::scrub_team_paint(&mut entry.value),
                EntryRule::LoadoutsOnline => payload::clear_online_loadouts(&mut entry.value),
                EntryRule::Loadout => payload::scrub_loadout(&mut entry.value),
                EntryRule::CameraSettings => payload::scrub_camera(&mut entry.value),
                EntryRule::PassThrough => true,
            };
            if !scrubbed {
                tracing::warn!(entry = %entry.name, "unexpected payload shape, left untouched");
            }
        }

        // Each removal shifts every later index down by one
        for (removed, index) in doomed.iter().enumerate() {
            entries.remove(index - removed);
        }
        if !doomed.is_empty() {
            tracing::debug!(removed = doomed.len(), "removed identity entries");
            self.outcome.removed_entries += doomed.len();
        }

        if let Some(product_id) = product_id {
            entries.push(bot_flag_marker());
            entries.push(bot_product_marker(product_id));
            self.outcome.appended_markers += 2;
        }
        Ok(())
    }

    fn substitute(&mut self, value: &mut Value) -> Result<ResolvedIdentity, AnonymiseError> {
        let site = SubstitutionSite::FrameEntry;
        let Some(original) = value.get(NAME_TEXT).and_then(Value::as_str).map(str::to_string)
        else {
            tracing::warn!(payload = %value, "player name entry without a name");
            return Err(AnonymiseError::UnknownPlayerReference { site, name: None });
        };

        let resolved = if self.strict {
            self.registry.lookup(&original, self.guest).ok_or_else(|| {
                AnonymiseError::UnknownPlayerReference {
                    site,
                    name: Some(original.clone()),
                }
            })?
        } else {
            self.registry.resolve(&original, self.guest)?
        };

        self.outcome.name_delta +=
            i64::from(encoded_len(&resolved.display_name)) - i64::from(encoded_len(&original));
        self.outcome.substitutions += 1;
        if let Some(text) = value.get_mut(NAME_TEXT) {
            *text = Value::String(resolved.display_name.clone());
        }
        Ok(resolved)
    }
}
