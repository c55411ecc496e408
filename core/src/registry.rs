//! Bot identity registry
//!
//! Maps real player names to pseudonyms drawn from a fixed pool of bot
//! identities. Bindings are stable for the lifetime of one registry, so the
//! same player resolves to the same bot in the header and in every frame.
//! Occurrence counters are per pass and cleared with
//! [`BotRegistry::reset_counters`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::AnonymiseError;

/// Display name used for the configured guest player
pub const GUEST_DISPLAY_NAME: &str = "Guest";

/// Product id of the first bot in the pool
pub const BOT_PRODUCT_ID_BASE: u32 = 1000;

/// Built-in bot names, in pool order
pub const BOT_NAMES: [&str; 53] = [
    "Armstrong",
    "Bandit",
    "Beast",
    "Boomer",
    "Buzz",
    "Casper",
    "Caveman",
    "C-Block",
    "Centice",
    "Chipper",
    "Cougar",
    "Dude",
    "Foamer",
    "Fury",
    "Gerwin",
    "Goose",
    "Heater",
    "Hollywood",
    "Hound",
    "Iceman",
    "Imp",
    "Jester",
    "Junker",
    "Khan",
    "Maverick",
    "Middy",
    "Merlin",
    "Mountain",
    "Myrtle",
    "Outlaw",
    "Poncho",
    "Rainmaker",
    "Raja",
    "Rex",
    "Roundhouse",
    "Sabretooth",
    "Saltie",
    "Samara",
    "Scout",
    "Shepard",
    "Slider",
    "Squall",
    "Sticks",
    "Stinger",
    "Storm",
    "Sundown",
    "Sultan",
    "Swabbie",
    "Tusk",
    "Tex",
    "Viper",
    "Wolfman",
    "Yuri",
];

/// A pseudonym: display name plus bot product id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub name: String,
    pub product_id: u32,
}

impl BotIdentity {
    pub fn new(name: impl Into<String>, product_id: u32) -> Self {
        Self {
            name: name.into(),
            product_id,
        }
    }
}

/// The built-in pool, product ids counting up from [`BOT_PRODUCT_ID_BASE`]
pub fn default_pool() -> Vec<BotIdentity> {
    BOT_NAMES
        .iter()
        .zip(BOT_PRODUCT_ID_BASE..)
        .map(|(name, id)| BotIdentity::new(*name, id))
        .collect()
}

/// Result of resolving one player name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub display_name: String,
    /// `None` for the guest sentinel
    pub product_id: Option<u32>,
}

impl ResolvedIdentity {
    fn guest() -> Self {
        Self {
            display_name: GUEST_DISPLAY_NAME.to_string(),
            product_id: None,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.product_id.is_none()
    }
}

#[derive(Debug)]
struct Slot {
    identity: BotIdentity,
    assigned_to: Option<String>,
    occurrences: u32,
}

/// Pool of bot identities with per-run player bindings
pub struct BotRegistry<R = Pcg64> {
    slots: Vec<Slot>,
    rng: R,
}

impl BotRegistry<Pcg64> {
    /// Default pool with a randomly seeded source
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Default pool with a deterministic source
    pub fn seeded(seed: u64) -> Self {
        Self::with_pool(default_pool(), Pcg64::seed_from_u64(seed))
    }
}

impl Default for BotRegistry<Pcg64> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BotRegistry<R> {
    /// Registry over a custom pool and random source
    pub fn with_pool(pool: Vec<BotIdentity>, rng: R) -> Self {
        let slots = pool
            .into_iter()
            .map(|identity| Slot {
                identity,
                assigned_to: None,
                occurrences: 0,
            })
            .collect();
        Self { slots, rng }
    }

    /// Resolve a player name, binding a free identity on first sight
    ///
    /// The guest player resolves to the sentinel without touching the pool.
    ///
    /// # Errors
    ///
    /// Returns [`AnonymiseError::PoolExhausted`] when the name is new and
    /// every identity is already bound.
    pub fn resolve(
        &mut self,
        original: &str,
        guest: Option<&str>,
    ) -> Result<ResolvedIdentity, AnonymiseError> {
        if let Some(resolved) = self.lookup(original, guest) {
            return Ok(resolved);
        }

        let free: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.assigned_to.is_none())
            .map(|(i, _)| i)
            .collect();
        if free.is_empty() {
            return Err(AnonymiseError::PoolExhausted {
                pool_size: self.slots.len(),
            });
        }

        let pick = free[self.rng.random_range(0..free.len())];
        let slot = &mut self.slots[pick];
        slot.assigned_to = Some(original.to_string());
        slot.occurrences += 1;
        tracing::debug!(bot = %slot.identity.name, "bound new player to bot identity");

        Ok(ResolvedIdentity {
            display_name: slot.identity.name.clone(),
            product_id: Some(slot.identity.product_id),
        })
    }

    /// Resolve a name only if it is the guest or already bound
    pub fn lookup(&mut self, original: &str, guest: Option<&str>) -> Option<ResolvedIdentity> {
        if guest == Some(original) {
            return Some(ResolvedIdentity::guest());
        }

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.assigned_to.as_deref() == Some(original))?;
        slot.occurrences += 1;
        Some(ResolvedIdentity {
            display_name: slot.identity.name.clone(),
            product_id: Some(slot.identity.product_id),
        })
    }

    /// Identity currently bound to a player, if any
    pub fn assignment(&self, original: &str) -> Option<&BotIdentity> {
        self.slots
            .iter()
            .find(|slot| slot.assigned_to.as_deref() == Some(original))
            .map(|slot| &slot.identity)
    }

    /// Clear occurrence counters, keeping bindings
    pub fn reset_counters(&mut self) {
        for slot in &mut self.slots {
            slot.occurrences = 0;
        }
    }

    /// Drop every binding and counter
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.assigned_to = None;
            slot.occurrences = 0;
        }
    }

    /// Sum of occurrence counters since the last reset
    pub fn occurrences(&self) -> u32 {
        self.slots.iter().map(|slot| slot.occurrences).sum()
    }

    /// Occurrences of one bound player since the last reset
    pub fn occurrences_of(&self, original: &str) -> u32 {
        self.slots
            .iter()
            .find(|slot| slot.assigned_to.as_deref() == Some(original))
            .map_or(0, |slot| slot.occurrences)
    }

    pub fn assigned_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.assigned_to.is_some())
            .count()
    }

    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }
}
