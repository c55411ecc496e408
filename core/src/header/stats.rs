//! `Goals` and `PlayerStats` array rewriting

use rand::Rng;

use anonymiser_shared::{PropertyKind, PropertyNode, PropertyValue};

use super::HeaderRewriter;
use super::player_id::{neutral_platform, scrub_player_id};
use crate::error::{AnonymiseError, SubstitutionSite};
use crate::rules::{GOAL_PLAYER_NAME, StatRule, stat_rule};
use crate::schema::{GOALS_SCOPE, PLAYER_STATS_SCOPE};

/// Declared size of a zeroed 64-bit id
pub const ZEROED_ID_SIZE: u32 = 8;

impl<R: Rng> HeaderRewriter<'_, R> {
    pub(super) fn rewrite_goals(&mut self, node: &mut PropertyNode) -> Result<(), AnonymiseError> {
        let kind = node.kind;
        let Some(goals) = node.value.as_array_mut() else {
            tracing::warn!(?kind, "Goals is not an array, left untouched");
            return Ok(());
        };

        for goal in goals {
            self.outcome.drift.extend(GOALS_SCOPE.check(goal.keys()));
            self.substitute(goal.get_mut(GOAL_PLAYER_NAME), SubstitutionSite::GoalScorer)?;
        }
        Ok(())
    }

    pub(super) fn rewrite_player_stats(
        &mut self,
        node: &mut PropertyNode,
    ) -> Result<(), AnonymiseError> {
        let kind = node.kind;
        let Some(players) = node.value.as_array_mut() else {
            tracing::warn!(?kind, "PlayerStats is not an array, left untouched");
            return Ok(());
        };

        for player in players {
            self.outcome.drift.extend(PLAYER_STATS_SCOPE.check(player.keys()));

            // A stat block without a name is an upstream ordering bug
            if !player.contains_key("Name") {
                return Err(AnonymiseError::UnknownPlayerReference {
                    site: SubstitutionSite::PlayerStats,
                    name: None,
                });
            }

            for (key, stat) in player.iter_mut() {
                let Some(rule) = stat_rule(key) else {
                    continue;
                };
                match rule {
                    StatRule::Name => self.substitute(Some(stat), SubstitutionSite::PlayerStats)?,
                    StatRule::Platform => {
                        let (value, size) = neutral_platform();
                        stat.replace(PropertyKind::ByteProperty, value, size);
                    }
                    StatRule::OnlineId => stat.replace(
                        PropertyKind::QWordProperty,
                        PropertyValue::QWord("0".to_string()),
                        ZEROED_ID_SIZE,
                    ),
                    StatRule::Bot => {
                        stat.replace(PropertyKind::BoolProperty, PropertyValue::Bool(1), 0)
                    }
                    StatRule::PlayerId => {
                        let drift = scrub_player_id(stat);
                        self.outcome.drift.extend(drift);
                    }
                }
            }
        }
        Ok(())
    }
}
