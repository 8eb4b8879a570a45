//! Storage for additional rules and the triggers they own.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{GameState, Registry, RegistryError};
use crate::effects::AtomicStep;
use crate::triggers::{GameEvent, Trigger, TriggerCollector, TriggerRegistry};

use super::rule::{AdditionalRule, RuleCategory, RuleId};

/// Registry of additional rules, indexed by category.
///
/// The registry also owns the event triggers, so it is the single trigger
/// collector the sequencer talks to.
#[derive(Clone)]
pub struct AdditionalRuleRegistry {
    rules: Registry<RuleId, Arc<dyn AdditionalRule>>,
    by_category: FxHashMap<RuleCategory, Vec<RuleId>>,
    triggers: TriggerRegistry,
}

impl Default for AdditionalRuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdditionalRuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Registry::new("additional rules"),
            by_category: FxHashMap::default(),
            triggers: TriggerRegistry::new(),
        }
    }

    /// Register a rule under its own id.
    pub fn register<R>(&mut self, rule: R) -> Result<(), RegistryError>
    where
        R: AdditionalRule + 'static,
    {
        self.register_arc(Arc::new(rule))
    }

    /// Register an already shared rule.
    pub fn register_arc(&mut self, rule: Arc<dyn AdditionalRule>) -> Result<(), RegistryError> {
        let id = rule.id();
        let category = rule.category();
        self.rules.register(id, rule)?;
        self.by_category.entry(category).or_default().push(id);
        Ok(())
    }

    /// Look up a rule by id.
    pub fn get(&self, id: RuleId) -> Result<&Arc<dyn AdditionalRule>, RegistryError> {
        self.rules.get(id)
    }

    /// Rules of one category, in registration order.
    pub fn by_category(&self, category: RuleCategory) -> impl Iterator<Item = &Arc<dyn AdditionalRule>> {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.rules.find(id))
    }

    /// Register an event trigger.
    pub fn register_trigger(&mut self, trigger: Trigger) -> Result<(), RegistryError> {
        self.triggers.register(trigger)
    }

    #[must_use]
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered rule ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<RuleId> {
        self.rules.ids()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.rules.clear();
        self.by_category.clear();
        self.triggers.clear();
    }
}

impl TriggerCollector for AdditionalRuleRegistry {
    fn collect_steps(&self, state: &GameState, event: &GameEvent) -> Vec<AtomicStep> {
        self.triggers.collect(state, event)
    }
}

impl std::fmt::Debug for AdditionalRuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self
            .rules
            .iter()
            .map(|(id, rule)| format!("{} {}", id, rule.name()))
            .collect();
        f.debug_struct("AdditionalRuleRegistry")
            .field("rules", &names)
            .field("triggers", &self.triggers.len())
            .finish()
    }
}
