//! Game event types.
//!
//! Steps emit typed events alongside their next snapshot. The sequencer
//! hands each event to the trigger collector, which may contribute steps
//! to splice into the running activation.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, EffectId};
use crate::core::{InstanceId, Side};

/// Discriminant of a `GameEvent`, used to index triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SpellActivated,
    TrapActivated,
    EffectActivated,
    CardsDrawn,
    CardDestroyed,
    LifeChanged,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::SpellActivated => "spell_activated",
            EventKind::TrapActivated => "trap_activated",
            EventKind::EffectActivated => "effect_activated",
            EventKind::CardsDrawn => "cards_drawn",
            EventKind::CardDestroyed => "card_destroyed",
            EventKind::LifeChanged => "life_changed",
        };
        f.write_str(name)
    }
}

/// Something that happened during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A spell card was activated.
    SpellActivated {
        card_id: CardId,
        instance_id: InstanceId,
    },

    /// A trap card was activated.
    TrapActivated {
        card_id: CardId,
        instance_id: InstanceId,
    },

    /// An ignition effect of a card on the field was activated.
    EffectActivated {
        effect: EffectId,
        instance_id: InstanceId,
    },

    /// Cards moved from the deck to the hand by a draw.
    CardsDrawn { count: usize },

    /// A card was destroyed and sent to the graveyard.
    CardDestroyed {
        card_id: CardId,
        instance_id: InstanceId,
    },

    /// A side's life points changed by `delta`.
    LifeChanged { side: Side, delta: i64 },
}

impl GameEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::SpellActivated { .. } => EventKind::SpellActivated,
            GameEvent::TrapActivated { .. } => EventKind::TrapActivated,
            GameEvent::EffectActivated { .. } => EventKind::EffectActivated,
            GameEvent::CardsDrawn { .. } => EventKind::CardsDrawn,
            GameEvent::CardDestroyed { .. } => EventKind::CardDestroyed,
            GameEvent::LifeChanged { .. } => EventKind::LifeChanged,
        }
    }

    /// The instance that caused the event, if any.
    #[must_use]
    pub fn instance(&self) -> Option<InstanceId> {
        match self {
            GameEvent::SpellActivated { instance_id, .. }
            | GameEvent::TrapActivated { instance_id, .. }
            | GameEvent::EffectActivated { instance_id, .. }
            | GameEvent::CardDestroyed { instance_id, .. } => Some(*instance_id),
            GameEvent::CardsDrawn { .. } | GameEvent::LifeChanged { .. } => None,
        }
    }
}
