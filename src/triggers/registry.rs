//! Trigger registry.
//!
//! The registry stores triggers and indexes them by event kind. When a step
//! emits an event, `collect` runs every active trigger listening for that
//! kind and concatenates the steps they contribute, in trigger id order.
//!
//! A trigger owned by a card is active only while a copy of that card is
//! face-up on the field.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{GameState, Registry, RegistryError};
use crate::effects::AtomicStep;

use super::event::{EventKind, GameEvent};

/// Unique identifier for a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// Trigger body: inspects the snapshot after the emitting step and returns
/// the steps to splice in (possibly none).
pub type TriggerHandler = Arc<dyn Fn(&GameState, &GameEvent) -> Vec<AtomicStep> + Send + Sync>;

/// A trigger definition.
#[derive(Clone)]
pub struct Trigger {
    /// Unique identifier.
    pub id: TriggerId,

    /// Human-readable name (for debugging).
    pub name: String,

    /// The card species that owns this trigger, if any.
    pub card_id: Option<CardId>,

    /// Event kind this trigger listens for.
    pub event_kind: EventKind,

    handler: TriggerHandler,
}

impl Trigger {
    /// Create a new trigger listening for one event kind.
    pub fn new<F>(id: TriggerId, name: impl Into<String>, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&GameState, &GameEvent) -> Vec<AtomicStep> + Send + Sync + 'static,
    {
        Self {
            id,
            name: name.into(),
            card_id: None,
            event_kind: kind,
            handler: Arc::new(handler),
        }
    }

    /// Set the owning card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card_id = Some(card);
        self
    }

    /// Whether the trigger can fire against `state`.
    #[must_use]
    pub fn is_active(&self, state: &GameState) -> bool {
        self.card_id.map_or(true, |card| {
            state
                .zones()
                .on_field()
                .any(|c| c.card_id() == card && c.is_face_up())
        })
    }

    /// Run the handler.
    #[must_use]
    pub fn fire(&self, state: &GameState, event: &GameEvent) -> Vec<AtomicStep> {
        (self.handler)(state, event)
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("card_id", &self.card_id)
            .field("event_kind", &self.event_kind)
            .finish_non_exhaustive()
    }
}

/// Registry for triggers.
#[derive(Clone, Debug)]
pub struct TriggerRegistry {
    /// All registered triggers.
    triggers: Registry<TriggerId, Trigger>,

    /// Index by event kind for fast lookup.
    by_event_kind: FxHashMap<EventKind, Vec<TriggerId>>,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: Registry::new("triggers"),
            by_event_kind: FxHashMap::default(),
        }
    }

    /// Register a trigger. Duplicate ids are rejected.
    pub fn register(&mut self, trigger: Trigger) -> Result<(), RegistryError> {
        let id = trigger.id;
        let kind = trigger.event_kind;
        self.triggers.register(id, trigger)?;
        self.by_event_kind.entry(kind).or_default().push(id);
        Ok(())
    }

    /// Get a trigger by ID.
    pub fn get(&self, id: TriggerId) -> Result<&Trigger, RegistryError> {
        self.triggers.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Triggers listening for an event kind, in firing order.
    #[must_use]
    pub fn listening(&self, kind: EventKind) -> Vec<&Trigger> {
        let mut found: Vec<&Trigger> = self
            .by_event_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.triggers.find(id))
            .collect();
        found.sort_by_key(|t| t.id);
        found
    }

    /// Steps contributed by every active trigger listening for `event`.
    #[must_use]
    pub fn collect(&self, state: &GameState, event: &GameEvent) -> Vec<AtomicStep> {
        self.listening(event.kind())
            .into_iter()
            .filter(|trigger| trigger.is_active(state))
            .flat_map(|trigger| trigger.fire(state, event))
            .collect()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.triggers.clear();
        self.by_event_kind.clear();
    }
}
