use std::sync::Arc;

use crate::cards::{CardId, EffectCategory};
use crate::core::{Registry, RegistryError};

use super::chainable::ChainableAction;

/// Registry of chainable actions, split by category.
///
/// A card may have one activation effect and one ignition effect.
#[derive(Clone)]
pub struct ChainableActionRegistry {
    activation: Registry<CardId, Arc<dyn ChainableAction>>,
    ignition: Registry<CardId, Arc<dyn ChainableAction>>,
}

impl Default for ChainableActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainableActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            activation: Registry::new("activation effects"),
            ignition: Registry::new("ignition effects"),
        }
    }

    fn table(&self, category: EffectCategory) -> &Registry<CardId, Arc<dyn ChainableAction>> {
        match category {
            EffectCategory::Activation => &self.activation,
            EffectCategory::Ignition => &self.ignition,
        }
    }

    /// Register an action under its card id and category.
    pub fn register<A>(&mut self, action: A) -> Result<(), RegistryError>
    where
        A: ChainableAction + 'static,
    {
        let action: Arc<dyn ChainableAction> = Arc::new(action);
        let card = action.card_id();
        match action.category() {
            EffectCategory::Activation => self.activation.register(card, action),
            EffectCategory::Ignition => self.ignition.register(card, action),
        }
    }

    /// Look up the action for a card and category.
    pub fn get(&self, card: CardId, category: EffectCategory) -> Result<&Arc<dyn ChainableAction>, RegistryError> {
        self.table(category).get(card)
    }

    #[must_use]
    pub fn contains(&self, card: CardId, category: EffectCategory) -> bool {
        self.table(category).contains(card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.activation.len() + self.ignition.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Card ids with an effect of `category`, ascending.
    #[must_use]
    pub fn ids(&self, category: EffectCategory) -> Vec<CardId> {
        self.table(category).ids()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.activation.clear();
        self.ignition.clear();
    }
}

impl std::fmt::Debug for ChainableActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainableActionRegistry")
            .field("activation", &self.activation.ids())
            .field("ignition", &self.ignition.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActivationTemplate, CardEffect};

    #[test]
    fn test_categories_are_separate() {
        let mut registry = ChainableActionRegistry::new();
        registry
            .register(CardEffect::new(CardId::new(1), ActivationTemplate::ContinuousSpell))
            .unwrap();
        registry
            .register(CardEffect::new(CardId::new(1), ActivationTemplate::Ignition))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get(CardId::new(1), EffectCategory::Ignition).is_ok());
        assert!(!registry.contains(CardId::new(2), EffectCategory::Activation));
    }

    #[test]
    fn test_duplicate_and_unknown() {
        let mut registry = ChainableActionRegistry::new();
        registry
            .register(CardEffect::new(CardId::new(1), ActivationTemplate::NormalSpell))
            .unwrap();

        let dup = registry
            .register(CardEffect::new(CardId::new(1), ActivationTemplate::FieldSpell))
            .unwrap_err();
        assert!(matches!(dup, RegistryError::Duplicate { .. }));

        let unknown = registry.get(CardId::new(5), EffectCategory::Activation).err().unwrap();
        assert_eq!(unknown.id(), "Card(5)");
        assert!(unknown.to_string().contains("Card(1)"));

        registry.clear();
        assert!(registry.is_empty());
    }
}
