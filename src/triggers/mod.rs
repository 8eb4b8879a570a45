//! Event-driven triggers.
//!
//! Steps emit [`GameEvent`]s. After each step the sequencer asks a
//! [`TriggerCollector`] for the steps those events contribute and splices
//! them in directly after the emitting step.
//!
//! ## Key Components
//!
//! - [`GameEvent`] / [`EventKind`]: typed events and their discriminants
//! - [`Trigger`]: a handler listening for one or more event kinds
//! - [`TriggerRegistry`]: storage indexed by event kind
//! - [`TriggerCollector`]: the seam the sequencer calls through
//!
//! ## Example Usage
//!
//! ```
//! use rust_duel::cards::{CardData, CardId, CardRegistry, SpellType};
//! use rust_duel::core::{DuelConfig, GameState, InstanceId};
//! use rust_duel::effects::steps;
//! use rust_duel::triggers::{EventKind, GameEvent, Trigger, TriggerCollector, TriggerId, TriggerRegistry};
//!
//! let mut registry = TriggerRegistry::new();
//! registry
//!     .register(Trigger::new(TriggerId::new(1), "Echo", EventKind::SpellActivated, |_, _| {
//!         vec![steps::notify("echo", "A spell was activated")]
//!     }))
//!     .unwrap();
//!
//! let mut catalog = CardRegistry::new();
//! catalog.register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal)).unwrap();
//! let state = GameState::new(&DuelConfig::new().with_opening_hand(0), &catalog, &[CardId::new(1)]).unwrap();
//!
//! let event = GameEvent::SpellActivated { card_id: CardId::new(1), instance_id: InstanceId(1) };
//! assert_eq!(registry.collect_steps(&state, &event).len(), 1);
//! ```

mod event;
mod registry;

pub use event::{EventKind, GameEvent};
pub use registry::{Trigger, TriggerHandler, TriggerId, TriggerRegistry};

use crate::core::GameState;
use crate::effects::AtomicStep;

/// Source of steps contributed in response to events.
pub trait TriggerCollector {
    /// Steps to run right after the step that emitted `event`.
    fn collect_steps(&self, state: &GameState, event: &GameEvent) -> Vec<AtomicStep>;
}

impl TriggerCollector for TriggerRegistry {
    fn collect_steps(&self, state: &GameState, event: &GameEvent) -> Vec<AtomicStep> {
        self.collect(state, event)
    }
}

/// A collector that never contributes steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTriggers;

impl TriggerCollector for NoTriggers {
    fn collect_steps(&self, _state: &GameState, _event: &GameEvent) -> Vec<AtomicStep> {
        Vec::new()
    }
}
