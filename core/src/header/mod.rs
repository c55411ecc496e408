//! Header property rewriting
//!
//! Walks the header property map against the header rule table. Player
//! names go through the shared [`BotRegistry`]; everything else is replaced
//! with fixed neutral values. Keys outside the table pass through.

mod player_id;
mod stats;

use chrono::{DateTime, Datelike, Local, Timelike};
use rand::Rng;

use anonymiser_shared::{HeaderBody, PropertyKind, PropertyNode, PropertyValue, encoded_len};

use crate::error::{AnonymiseError, SubstitutionSite};
use crate::registry::BotRegistry;
use crate::rules::{HeaderRule, header_rule};
use crate::schema::{HEADER_SCOPE, SchemaDrift};

pub use player_id::{neutral_platform, scrub_player_id};

const REPLAY_NAME: &str = "ReplayName";

/// What one header pass changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderOutcome {
    /// Sum of pseudonym length changes (new - old)
    pub name_delta: i64,
    pub substitutions: u32,
    /// Net declared size change of the property tree, already rolled up
    /// into every enclosing array and struct node
    pub property_delta: i64,
    pub drift: Vec<SchemaDrift>,
}

/// Header pass over one document
pub struct HeaderRewriter<'a, R> {
    registry: &'a mut BotRegistry<R>,
    guest: Option<&'a str>,
    replay_name: &'a str,
    timestamp: DateTime<Local>,
    outcome: HeaderOutcome,
}

impl<'a, R: Rng> HeaderRewriter<'a, R> {
    pub fn new(
        registry: &'a mut BotRegistry<R>,
        guest: Option<&'a str>,
        replay_name: &'a str,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            registry,
            guest,
            replay_name,
            timestamp,
            outcome: HeaderOutcome::default(),
        }
    }

    pub fn rewrite(mut self, body: &mut HeaderBody) -> Result<HeaderOutcome, AnonymiseError> {
        let properties = &mut body.properties;
        self.outcome.drift.extend(HEADER_SCOPE.check(properties.keys()));

        // The output always carries a title, even when the source had none
        if !properties.contains_key(REPLAY_NAME) {
            properties.insert(
                REPLAY_NAME,
                PropertyNode::new(PropertyKind::StrProperty, 0, PropertyValue::Str(String::new())),
            );
        }

        for (key, node) in properties.iter_mut() {
            let Some(rule) = header_rule(key) else {
                continue;
            };
            match rule {
                HeaderRule::ReplayName => {
                    node.set_value(text_value(node.kind, self.replay_name.to_string()));
                }
                HeaderRule::MatchStartEpoch => {
                    let epoch = match_start_epoch(&self.timestamp);
                    match node.kind {
                        PropertyKind::QWordProperty => node.set_value(PropertyValue::QWord(epoch)),
                        kind if kind.is_string() => node.set_value(text_value(kind, epoch)),
                        kind => {
                            tracing::warn!(?kind, "MatchStartEpoch has unexpected kind, left as is")
                        }
                    }
                }
                HeaderRule::Date => {
                    node.set_value(text_value(node.kind, replay_date(&self.timestamp)));
                }
                HeaderRule::Goals => self.rewrite_goals(node)?,
                HeaderRule::PlayerStats => self.rewrite_player_stats(node)?,
            }
        }

        self.outcome.property_delta = properties.settle_aggregate_sizes();
        Ok(self.outcome)
    }

    /// Swap the player name held by `node` for its pseudonym
    fn substitute(
        &mut self,
        node: Option<&mut PropertyNode>,
        site: SubstitutionSite,
    ) -> Result<(), AnonymiseError> {
        let missing = AnonymiseError::UnknownPlayerReference { site, name: None };
        let Some(node) = node else {
            return Err(missing);
        };
        let original = match &node.value {
            PropertyValue::Str(name) | PropertyValue::Name(name) => name.clone(),
            _ => return Err(missing),
        };

        let resolved = self.registry.resolve(&original, self.guest)?;
        self.outcome.name_delta +=
            i64::from(encoded_len(&resolved.display_name)) - i64::from(encoded_len(&original));
        self.outcome.substitutions += 1;
        node.set_value(text_value(node.kind, resolved.display_name));
        Ok(())
    }
}

/// Wrap text in the payload variant matching a string kind
fn text_value(kind: PropertyKind, text: String) -> PropertyValue {
    match kind {
        PropertyKind::NameProperty => PropertyValue::Name(text),
        _ => PropertyValue::Str(text),
    }
}

/// First ten digits of the epoch-millisecond timestamp
pub fn match_start_epoch(timestamp: &DateTime<Local>) -> String {
    timestamp.timestamp_millis().to_string().chars().take(10).collect()
}

/// `Y-M-D h-m-s`, no zero padding
pub fn replay_date(timestamp: &DateTime<Local>) -> String {
    format!(
        "{}-{}-{} {}-{}-{}",
        timestamp.year(),
        timestamp.month(),
        timestamp.day(),
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second()
    )
}
