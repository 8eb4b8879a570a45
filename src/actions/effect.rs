//! Card effects built from a template plus closures.

use std::sync::Arc;

use crate::cards::{CardId, EffectCategory};
use crate::core::{ErrorCode, GameState, InstanceId, ValidationError, ValidationResult};
use crate::effects::{steps, AtomicStep};
use crate::rules::AdditionalRuleRegistry;
use crate::stack::SpellSpeed;

use super::chainable::ChainableAction;
use super::template::{ActivationTemplate, OncePerTurn};

/// The effect's own activation requirement, checked after the template's.
pub type Requirement = Arc<dyn Fn(&GameState, InstanceId) -> ValidationResult + Send + Sync>;

/// Builds the effect body for a source instance.
pub type Resolution = Arc<dyn Fn(&GameState, InstanceId) -> Vec<AtomicStep> + Send + Sync>;

/// A chainable action made of an activation template, an optional
/// requirement and a resolution.
///
/// ## Example
///
/// ```
/// use rust_duel::actions::{ActivationTemplate, CardEffect, ChainableAction};
/// use rust_duel::cards::{CardId, EffectCategory};
/// use rust_duel::effects::steps;
///
/// let pot = CardEffect::new(CardId::new(55144522), ActivationTemplate::NormalSpell)
///     .with_resolution(|_state, _source| vec![steps::draw(2)]);
///
/// assert_eq!(pot.category(), EffectCategory::Activation);
/// ```
#[derive(Clone)]
pub struct CardEffect {
    card_id: CardId,
    template: ActivationTemplate,
    once_per_turn: OncePerTurn,
    requirement: Option<Requirement>,
    resolution: Option<Resolution>,
}

impl CardEffect {
    /// An effect with no requirement and an empty body.
    ///
    /// Ignition effects are always once per turn per instance.
    #[must_use]
    pub fn new(card_id: CardId, template: ActivationTemplate) -> Self {
        let once_per_turn = match template {
            ActivationTemplate::Ignition => OncePerTurn::Instance,
            _ => OncePerTurn::Unlimited,
        };
        Self {
            card_id,
            template,
            once_per_turn,
            requirement: None,
            resolution: None,
        }
    }

    /// Restrict activations per turn (builder pattern). Ignition effects
    /// keep their per-instance restriction.
    #[must_use]
    pub fn with_once_per_turn(mut self, once: OncePerTurn) -> Self {
        if self.template != ActivationTemplate::Ignition {
            self.once_per_turn = once;
        }
        self
    }

    /// Set the requirement (builder pattern).
    #[must_use]
    pub fn with_requirement<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&GameState, InstanceId) -> ValidationResult + Send + Sync + 'static,
    {
        self.requirement = Some(Arc::new(requirement));
        self
    }

    /// Set the resolution (builder pattern).
    #[must_use]
    pub fn with_resolution<F>(mut self, resolution: F) -> Self
    where
        F: Fn(&GameState, InstanceId) -> Vec<AtomicStep> + Send + Sync + 'static,
    {
        self.resolution = Some(Arc::new(resolution));
        self
    }

    #[must_use]
    pub fn template(&self) -> ActivationTemplate {
        self.template
    }

    #[must_use]
    pub fn once_per_turn(&self) -> OncePerTurn {
        self.once_per_turn
    }
}

impl ChainableAction for CardEffect {
    fn card_id(&self) -> CardId {
        self.card_id
    }

    fn category(&self) -> EffectCategory {
        self.template.category()
    }

    fn spell_speed(&self) -> SpellSpeed {
        self.template.spell_speed()
    }

    fn can_activate(
        &self,
        rules: &AdditionalRuleRegistry,
        state: &GameState,
        source: InstanceId,
    ) -> ValidationResult {
        self.template
            .validate(rules, state, source, self.effect_id(), self.once_per_turn)?;
        match &self.requirement {
            Some(requirement) => requirement(state, source),
            None => Ok(()),
        }
    }

    fn create_activation_steps(&self, state: &GameState, source: InstanceId) -> Vec<AtomicStep> {
        match state.instance(source) {
            Some(card) => self
                .template
                .activation_steps(card, self.effect_id(), self.once_per_turn),
            None => vec![missing_source(source)],
        }
    }

    fn create_resolution_steps(&self, state: &GameState, source: InstanceId) -> Vec<AtomicStep> {
        let mut body = match &self.resolution {
            Some(resolution) => resolution(state, source),
            None => Vec::new(),
        };
        if self.template.is_self_contained() {
            body.push(steps::send_to_graveyard(source));
        }
        body
    }
}

fn missing_source(source: InstanceId) -> AtomicStep {
    AtomicStep::new("activate", "Activate", move |_, _| {
        Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} does not exist", source),
        ))
    })
}

impl std::fmt::Debug for CardEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardEffect")
            .field("card_id", &self.card_id)
            .field("template", &self.template)
            .field("once_per_turn", &self.once_per_turn)
            .field("has_requirement", &self.requirement.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardRegistry, SpellType};
    use crate::core::{DuelConfig, Phase};

    fn main_phase_state() -> GameState {
        let mut catalog = CardRegistry::new();
        catalog
            .register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal))
            .unwrap();
        let config = DuelConfig::new().with_opening_hand(1).without_shuffle();
        let mut state = GameState::new(&config, &catalog, &[CardId::new(1); 4]).unwrap();
        state.set_phase(Phase::Main);
        state
    }

    #[test]
    fn test_requirement_runs_after_template() {
        let effect = CardEffect::new(CardId::new(1), ActivationTemplate::NormalSpell)
            .with_requirement(|_, _| Err(ValidationError::conditions_not_met("never")));
        let rules = AdditionalRuleRegistry::new();
        let state = main_phase_state();
        let source = state.zone(crate::zones::ZoneName::Hand)[0].instance_id;

        let err = effect.can_activate(&rules, &state, source).unwrap_err();
        assert_eq!(err.message, "never");
    }

    #[test]
    fn test_self_contained_ends_in_graveyard() {
        let effect = CardEffect::new(CardId::new(1), ActivationTemplate::NormalSpell)
            .with_resolution(|_, _| vec![steps::draw(2)]);
        let ids: Vec<_> = effect
            .create_resolution_steps(&main_phase_state(), InstanceId(4))
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(ids, vec!["draw", "send_to_graveyard"]);
    }

    #[test]
    fn test_ignition_is_once_per_instance() {
        let effect = CardEffect::new(CardId::new(1), ActivationTemplate::Ignition)
            .with_once_per_turn(OncePerTurn::Unlimited);
        assert_eq!(effect.once_per_turn(), OncePerTurn::Instance);
        assert!(effect.create_resolution_steps(&main_phase_state(), InstanceId(1)).is_empty());
    }
}
