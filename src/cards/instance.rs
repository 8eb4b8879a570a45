//! Card instances - one physical copy of a card during a game.
//!
//! A `CardInstance` shares its species data through an `Arc<CardData>` and
//! adds the instance id, the current location and, while on the field, a
//! `StateOnField`.
//!
//! ## Field state
//!
//! `field` is `Some` exactly when `location` is an on-field zone. The only
//! way to change location is `moved_to`, which drops the field state when
//! the card leaves the field and builds a fresh one when it enters.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardData, CardId, EffectId};
use crate::core::entity::InstanceId;
use crate::zones::ZoneName;

/// Face orientation of a card on the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    #[default]
    FaceUp,
    FaceDown,
}

/// Battle position of a monster on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePosition {
    Attack,
    Defense,
}

/// Counter types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    /// Spell Counter.
    Spell,
    /// Any other counter, identified by number.
    Generic(u16),
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterKind::Spell => f.write_str("spell counter"),
            CounterKind::Generic(n) => write!(f, "counter #{}", n),
        }
    }
}

/// A stack of counters of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counter {
    pub kind: CounterKind,
    pub count: u32,
}

/// Per-instance state that only exists while the card is on the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOnField {
    pub face: Face,

    /// `None` for spells and traps.
    pub position: Option<BattlePosition>,

    /// Set or summoned during the current turn.
    pub placed_this_turn: bool,

    counters: SmallVec<[Counter; 2]>,

    activated: SmallVec<[EffectId; 2]>,
}

impl StateOnField {
    /// Fresh field state for a card entering the field.
    #[must_use]
    pub fn new(face: Face, position: Option<BattlePosition>) -> Self {
        Self {
            face,
            position,
            placed_this_turn: false,
            counters: SmallVec::new(),
            activated: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face == Face::FaceUp
    }

    /// Number of counters of `kind`. Absent kinds count zero.
    #[must_use]
    pub fn counter(&self, kind: CounterKind) -> u32 {
        self.counters
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.count)
    }

    /// All non-zero counters.
    #[must_use]
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Set the count for `kind`. Zero removes the entry.
    pub fn set_counter(&mut self, kind: CounterKind, count: u32) {
        match self.counters.iter().position(|c| c.kind == kind) {
            Some(idx) if count == 0 => {
                self.counters.remove(idx);
            }
            Some(idx) => self.counters[idx].count = count,
            None if count == 0 => {}
            None => self.counters.push(Counter { kind, count }),
        }
    }

    /// Has this instance already activated `effect` (this turn, on this visit)?
    #[must_use]
    pub fn has_activated(&self, effect: EffectId) -> bool {
        self.activated.contains(&effect)
    }

    /// Record an activation of `effect`.
    pub fn mark_activated(&mut self, effect: EffectId) {
        if !self.activated.contains(&effect) {
            self.activated.push(effect);
        }
    }

    /// Forget turn-scoped flags at the start of a new turn.
    pub fn reset_for_turn(&mut self) {
        self.placed_this_turn = false;
        self.activated.clear();
    }
}

/// How a card is placed when it moves onto the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub face: Face,
    pub position: Option<BattlePosition>,
}

impl Placement {
    /// Face-up, no battle position (spells and traps).
    pub const FACE_UP: Placement = Placement {
        face: Face::FaceUp,
        position: None,
    };

    /// Face-down, no battle position (set spells and traps).
    pub const SET: Placement = Placement {
        face: Face::FaceDown,
        position: None,
    };

    /// Face-up attack position.
    pub const ATTACK: Placement = Placement {
        face: Face::FaceUp,
        position: Some(BattlePosition::Attack),
    };

    /// Face-down defense position.
    pub const SET_MONSTER: Placement = Placement {
        face: Face::FaceDown,
        position: Some(BattlePosition::Defense),
    };
}

/// One physical copy of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique for the whole game; kept across moves.
    pub instance_id: InstanceId,

    /// Shared species data.
    pub data: Arc<CardData>,

    location: ZoneName,

    field: Option<StateOnField>,
}

impl CardInstance {
    /// Create an instance at a location. On-field locations get face-up
    /// field state with no battle position.
    #[must_use]
    pub fn new(instance_id: InstanceId, data: Arc<CardData>, location: ZoneName) -> Self {
        let field = location
            .is_on_field()
            .then(|| StateOnField::new(Face::FaceUp, None));
        Self {
            instance_id,
            data,
            location,
            field,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.data.id
    }

    /// Printed name. Use the rule queries for the effective name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    #[must_use]
    pub fn location(&self) -> ZoneName {
        self.location
    }

    #[must_use]
    pub fn field(&self) -> Option<&StateOnField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut StateOnField> {
        self.field.as_mut()
    }

    #[must_use]
    pub fn is_on_field(&self) -> bool {
        self.field.is_some()
    }

    /// On the field and face-up.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.field.as_ref().is_some_and(StateOnField::is_face_up)
    }

    /// Counters of `kind`; zero when off the field.
    #[must_use]
    pub fn counter(&self, kind: CounterKind) -> u32 {
        self.field.as_ref().map_or(0, |f| f.counter(kind))
    }

    /// The same instance at a new location.
    ///
    /// Leaving the field clears the field state. Entering the field (or
    /// moving between field zones) builds a fresh one from `placement`.
    #[must_use]
    pub fn moved_to(mut self, location: ZoneName, placement: Placement) -> Self {
        self.location = location;
        self.field = location
            .is_on_field()
            .then(|| StateOnField::new(placement.face, placement.position));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::{EffectCategory, SpellType};

    fn spell() -> Arc<CardData> {
        Arc::new(CardData::spell(CardId::new(1), "Test Spell", SpellType::Continuous))
    }

    #[test]
    fn test_new_in_deck_has_no_field_state() {
        let instance = CardInstance::new(InstanceId(1), spell(), ZoneName::Deck);

        assert_eq!(instance.location(), ZoneName::Deck);
        assert!(instance.field().is_none());
        assert_eq!(instance.counter(CounterKind::Spell), 0);
    }

    #[test]
    fn test_field_state_follows_location() {
        let instance = CardInstance::new(InstanceId(1), spell(), ZoneName::Hand);

        let on_field = instance.moved_to(ZoneName::SpellTrapZone, Placement::SET);
        assert!(on_field.is_on_field());
        assert!(!on_field.is_face_up());

        let gone = on_field.moved_to(ZoneName::Graveyard, Placement::FACE_UP);
        assert!(gone.field().is_none());
        assert_eq!(gone.instance_id, InstanceId(1));
    }

    #[test]
    fn test_reentering_field_resets_counters() {
        let mut instance = CardInstance::new(InstanceId(1), spell(), ZoneName::SpellTrapZone);
        instance
            .field_mut()
            .unwrap()
            .set_counter(CounterKind::Spell, 2);
        assert_eq!(instance.counter(CounterKind::Spell), 2);

        let back = instance
            .moved_to(ZoneName::Hand, Placement::FACE_UP)
            .moved_to(ZoneName::SpellTrapZone, Placement::FACE_UP);
        assert_eq!(back.counter(CounterKind::Spell), 0);
    }

    #[test]
    fn test_counters() {
        let mut field = StateOnField::new(Face::FaceUp, None);

        field.set_counter(CounterKind::Spell, 3);
        field.set_counter(CounterKind::Generic(9), 1);
        assert_eq!(field.counter(CounterKind::Spell), 3);
        assert_eq!(field.counters().len(), 2);

        field.set_counter(CounterKind::Spell, 0);
        assert_eq!(field.counter(CounterKind::Spell), 0);
        assert_eq!(field.counters().len(), 1);
    }

    #[test]
    fn test_activated_effects() {
        let effect = EffectId::new(CardId::new(1), EffectCategory::Ignition);
        let mut field = StateOnField::new(Face::FaceUp, Some(BattlePosition::Attack));
        field.placed_this_turn = true;

        field.mark_activated(effect);
        field.mark_activated(effect);
        assert!(field.has_activated(effect));

        field.reset_for_turn();
        assert!(!field.has_activated(effect));
        assert!(!field.placed_this_turn);
    }

    #[test]
    fn test_instance_serialization() {
        let mut instance = CardInstance::new(InstanceId(4), spell(), ZoneName::FieldZone);
        instance
            .field_mut()
            .unwrap()
            .set_counter(CounterKind::Spell, 1);

        let json = serde_json::to_string(&instance).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(instance, deserialized);
    }
}
