//! Zone collections for card locations and movement.
//!
//! `Zones` holds one persistent vector per zone. Cloning is O(1) and a
//! move only copies the paths it touches, so every snapshot can keep its
//! own `Zones` without deep copies.
//!
//! Ordered zones use index 0 as the bottom and the last element as the top
//! (the deck is drawn from the end).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, Placement};
use crate::core::config::ZoneCapacity;
use crate::core::entity::InstanceId;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// The fixed set of zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneName {
    Deck,
    Hand,
    MonsterZone,
    SpellTrapZone,
    FieldZone,
    Graveyard,
    Banished,
}

impl ZoneName {
    /// Every zone, in storage order.
    pub const ALL: [ZoneName; 7] = [
        ZoneName::Deck,
        ZoneName::Hand,
        ZoneName::MonsterZone,
        ZoneName::SpellTrapZone,
        ZoneName::FieldZone,
        ZoneName::Graveyard,
        ZoneName::Banished,
    ];

    /// Monster, spell/trap and field zones.
    #[must_use]
    pub const fn is_on_field(self) -> bool {
        matches!(
            self,
            ZoneName::MonsterZone | ZoneName::SpellTrapZone | ZoneName::FieldZone
        )
    }

    /// Capacity limit for this zone, `None` if unlimited.
    #[must_use]
    pub const fn capacity(self, limits: &ZoneCapacity) -> Option<usize> {
        match self {
            ZoneName::MonsterZone => Some(limits.monster),
            ZoneName::SpellTrapZone => Some(limits.spell_trap),
            ZoneName::FieldZone => Some(limits.field),
            _ => None,
        }
    }
}

impl std::fmt::Display for ZoneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZoneName::Deck => "deck",
            ZoneName::Hand => "hand",
            ZoneName::MonsterZone => "monster zone",
            ZoneName::SpellTrapZone => "spell/trap zone",
            ZoneName::FieldZone => "field zone",
            ZoneName::Graveyard => "graveyard",
            ZoneName::Banished => "banished",
        };
        f.write_str(name)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of deck).
    #[default]
    Top,
    /// Add to bottom of zone.
    Bottom,
}

/// Card collections for every zone.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use rust_duel::cards::{CardData, CardId, CardInstance, SpellType};
/// use rust_duel::core::InstanceId;
/// use rust_duel::zones::{ZoneName, ZonePosition, Zones};
///
/// let pot = Arc::new(CardData::spell(CardId::new(1), "Pot", SpellType::Normal));
/// let mut zones = Zones::new();
/// zones.insert(CardInstance::new(InstanceId(1), pot.clone(), ZoneName::Deck), ZonePosition::Top);
/// zones.insert(CardInstance::new(InstanceId(2), pot, ZoneName::Deck), ZonePosition::Top);
///
/// assert_eq!(zones.top(ZoneName::Deck).map(|c| c.instance_id), Some(InstanceId(2)));
/// assert_eq!(zones.len(ZoneName::Deck), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    deck: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    monster_zone: Vector<CardInstance>,
    spell_trap_zone: Vector<CardInstance>,
    field_zone: Vector<CardInstance>,
    graveyard: Vector<CardInstance>,
    banished: Vector<CardInstance>,
}

impl Zones {
    /// Create empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a zone, bottom to top.
    #[must_use]
    pub fn zone(&self, name: ZoneName) -> &Vector<CardInstance> {
        match name {
            ZoneName::Deck => &self.deck,
            ZoneName::Hand => &self.hand,
            ZoneName::MonsterZone => &self.monster_zone,
            ZoneName::SpellTrapZone => &self.spell_trap_zone,
            ZoneName::FieldZone => &self.field_zone,
            ZoneName::Graveyard => &self.graveyard,
            ZoneName::Banished => &self.banished,
        }
    }

    fn zone_mut(&mut self, name: ZoneName) -> &mut Vector<CardInstance> {
        match name {
            ZoneName::Deck => &mut self.deck,
            ZoneName::Hand => &mut self.hand,
            ZoneName::MonsterZone => &mut self.monster_zone,
            ZoneName::SpellTrapZone => &mut self.spell_trap_zone,
            ZoneName::FieldZone => &mut self.field_zone,
            ZoneName::Graveyard => &mut self.graveyard,
            ZoneName::Banished => &mut self.banished,
        }
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, name: ZoneName) -> usize {
        self.zone(name).len()
    }

    /// Total number of instances across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        ZoneName::ALL.iter().map(|&z| self.len(z)).sum()
    }

    /// Check if a zone has room under the given capacity limits.
    #[must_use]
    pub fn has_space(&self, name: ZoneName, limits: &ZoneCapacity) -> bool {
        name.capacity(limits).map_or(true, |cap| self.len(name) < cap)
    }

    /// Top card of a zone (last element).
    #[must_use]
    pub fn top(&self, name: ZoneName) -> Option<&CardInstance> {
        self.zone(name).last()
    }

    /// Find an instance anywhere.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        ZoneName::ALL
            .iter()
            .find_map(|&z| self.zone(z).iter().find(|c| c.instance_id == id))
    }

    /// Zone and index of an instance.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(ZoneName, usize)> {
        ZoneName::ALL.iter().find_map(|&z| {
            self.zone(z)
                .iter()
                .position(|c| c.instance_id == id)
                .map(|idx| (z, idx))
        })
    }

    /// Check if an instance is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, id: InstanceId, zone: ZoneName) -> bool {
        self.zone(zone).iter().any(|c| c.instance_id == id)
    }

    /// Iterate over every instance with its zone, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneName, &CardInstance)> {
        ZoneName::ALL
            .into_iter()
            .flat_map(move |z| self.zone(z).iter().map(move |c| (z, c)))
    }

    /// Instances currently on the field.
    pub fn on_field(&self) -> impl Iterator<Item = &CardInstance> {
        self.iter()
            .filter(|(z, _)| z.is_on_field())
            .map(|(_, c)| c)
    }

    /// Every instance id, in storage order.
    #[must_use]
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.iter().map(|(_, c)| c.instance_id).collect()
    }

    /// Add an instance to the zone it records as its location.
    pub fn insert(&mut self, instance: CardInstance, position: ZonePosition) {
        let zone = self.zone_mut(instance.location());
        match position {
            ZonePosition::Top => zone.push_back(instance),
            ZonePosition::Bottom => zone.push_front(instance),
        }
    }

    /// Remove an instance from wherever it is.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let (zone, idx) = self.locate(id)?;
        Some(self.zone_mut(zone).remove(idx))
    }

    /// Move an instance to `to`, keeping its id.
    ///
    /// Returns the zone it came from, or `None` if the id is unknown.
    pub fn move_to(
        &mut self,
        id: InstanceId,
        to: ZoneName,
        placement: Placement,
        position: ZonePosition,
    ) -> Option<ZoneName> {
        let instance = self.remove(id)?;
        let from = instance.location();
        self.insert(instance.moved_to(to, placement), position);
        Some(from)
    }

    /// Apply `f` to an instance in place. Returns `false` if not found.
    pub fn update<F>(&mut self, id: InstanceId, f: F) -> bool
    where
        F: FnOnce(&mut CardInstance),
    {
        match self.locate(id) {
            Some((zone, idx)) => {
                let zone = self.zone_mut(zone);
                if let Some(instance) = zone.get_mut(idx) {
                    f(instance);
                }
                true
            }
            None => false,
        }
    }

    /// Apply `f` to every on-field instance.
    pub fn update_on_field<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut CardInstance),
    {
        for zone in ZoneName::ALL.into_iter().filter(|z| z.is_on_field()) {
            for instance in self.zone_mut(zone).iter_mut() {
                f(instance);
            }
        }
    }

    /// Shuffle the deck.
    pub fn shuffle_deck(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardInstance> = self.deck.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }

    /// Check the zone invariants: no id appears twice, every recorded
    /// location matches the holding zone, and field state is present
    /// exactly on the field.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for (zone, card) in self.iter() {
            if !seen.insert(card.instance_id) {
                return Err(EngineError::Invariant(format!(
                    "{} appears in more than one place",
                    card.instance_id
                )));
            }
            if card.location() != zone {
                return Err(EngineError::Invariant(format!(
                    "{} records {} but is held by {}",
                    card.instance_id,
                    card.location(),
                    zone
                )));
            }
            if card.is_on_field() != zone.is_on_field() {
                return Err(EngineError::Invariant(format!(
                    "{} has field state mismatched with {}",
                    card.instance_id, zone
                )));
            }
        }
        Ok(())
    }
}
