//! Duel configuration.
//!
//! The caller configures a duel at start-up with a `DuelConfig`: starting
//! life, opening hand, zone capacities, per-turn allowances and the RNG
//! seed. `build()` validates the values before they reach the initializer.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Capacity limits for the on-field zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCapacity {
    /// Monster zone slots.
    pub monster: usize,
    /// Spell/trap zone slots.
    pub spell_trap: usize,
    /// Field zone slots.
    pub field: usize,
}

impl Default for ZoneCapacity {
    fn default() -> Self {
        Self {
            monster: 5,
            spell_trap: 5,
            field: 1,
        }
    }
}

/// Complete duel configuration.
///
/// ```
/// use rust_duel::core::DuelConfig;
///
/// let config = DuelConfig::new()
///     .with_starting_life(4000)
///     .with_opening_hand(0)
///     .with_seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.starting_life, 4000);
/// assert_eq!(config.normal_summons_per_turn, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Life points each side starts with.
    pub starting_life: i64,

    /// Cards drawn into the opening hand.
    pub opening_hand: usize,

    /// On-field zone capacities.
    pub capacity: ZoneCapacity,

    /// Normal summons (or sets) allowed per turn.
    pub normal_summons_per_turn: u32,

    /// Seed for deck shuffles.
    pub seed: u64,

    /// Shuffle the deck when the game is initialized.
    pub shuffle_on_start: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            starting_life: 8000,
            opening_hand: 5,
            capacity: ZoneCapacity::default(),
            normal_summons_per_turn: 1,
            seed: 0,
            shuffle_on_start: true,
        }
    }
}

impl DuelConfig {
    /// Create a configuration with standard values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting life points.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set the on-field zone capacities.
    #[must_use]
    pub fn with_capacity(mut self, capacity: ZoneCapacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the normal summon allowance per turn.
    #[must_use]
    pub fn with_normal_summons(mut self, count: u32) -> Self {
        self.normal_summons_per_turn = count;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep the deck in list order (top = last entry) instead of shuffling.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_on_start = false;
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<Self, EngineError> {
        if self.starting_life <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "starting life must be positive, got {}",
                self.starting_life
            )));
        }
        if self.capacity.monster == 0 || self.capacity.spell_trap == 0 || self.capacity.field == 0 {
            return Err(EngineError::InvalidConfig(
                "zone capacities must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DuelConfig::new();

        assert_eq!(config.starting_life, 8000);
        assert_eq!(config.opening_hand, 5);
        assert_eq!(config.capacity.monster, 5);
        assert_eq!(config.capacity.spell_trap, 5);
        assert_eq!(config.capacity.field, 1);
        assert!(config.shuffle_on_start);
    }

    #[test]
    fn test_builder() {
        let config = DuelConfig::new()
            .with_starting_life(2000)
            .with_opening_hand(3)
            .with_normal_summons(2)
            .with_seed(99)
            .without_shuffle()
            .build()
            .unwrap();

        assert_eq!(config.starting_life, 2000);
        assert_eq!(config.opening_hand, 3);
        assert_eq!(config.normal_summons_per_turn, 2);
        assert_eq!(config.seed, 99);
        assert!(!config.shuffle_on_start);
    }

    #[test]
    fn test_rejects_non_positive_life() {
        let err = DuelConfig::new().with_starting_life(0).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let capacity = ZoneCapacity {
            monster: 0,
            ..ZoneCapacity::default()
        };
        assert!(DuelConfig::new().with_capacity(capacity).build().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = DuelConfig::new().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DuelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
