//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the read-only catalog the engine consults by
//! numeric id. It is filled once at start-up; a lookup for an id that was
//! never registered is a wiring error.

use std::sync::Arc;

use super::definition::{CardData, CardId};
use crate::core::error::RegistryError;
use crate::core::registry::Registry;

/// Read-only lookup of card definitions by id.
///
/// The initializer only needs this trait, so callers can supply their own
/// catalog instead of a `CardRegistry`.
pub trait CardCatalog {
    /// Look up a definition. An unknown id is an error.
    fn lookup(&self, id: CardId) -> Result<Arc<CardData>, RegistryError>;
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardCatalog, CardData, CardId, CardRegistry, SpellType};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardData::spell(CardId::new(55144522), "Pot of Greed", SpellType::Normal))
///     .unwrap();
///
/// let found = registry.lookup(CardId::new(55144522)).unwrap();
/// assert_eq!(found.name, "Pot of Greed");
/// assert!(registry.lookup(CardId::new(1)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct CardRegistry {
    cards: Registry<CardId, Arc<CardData>>,
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Registry::new("card catalog"),
        }
    }

    /// Register a card definition. Duplicate ids are rejected.
    pub fn register(&mut self, card: CardData) -> Result<(), RegistryError> {
        self.cards.register(card.id, Arc::new(card))
    }

    /// Register every definition in `cards`, stopping at the first duplicate.
    pub fn register_all(
        &mut self,
        cards: impl IntoIterator<Item = CardData>,
    ) -> Result<(), RegistryError> {
        cards.into_iter().try_for_each(|card| self.register(card))
    }

    /// Get a card definition by ID.
    pub fn get(&self, id: CardId) -> Result<&Arc<CardData>, RegistryError> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardData> {
        self.cards.iter().map(|(_, card)| card.as_ref())
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardData>
    where
        F: Fn(&CardData) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl CardCatalog for CardRegistry {
    fn lookup(&self, id: CardId) -> Result<Arc<CardData>, RegistryError> {
        self.get(id).map(Arc::clone)
    }
}
