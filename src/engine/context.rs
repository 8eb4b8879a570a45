use tracing::info;

use crate::actions::{ChainableAction, ChainableActionRegistry};
use crate::cards::{CardId, CardRegistry, EffectCategory};
use crate::core::{DuelConfig, EngineError, GameState, InstanceId, RegistryError, ValidationError, ValidationResult};
use crate::effects::{ConditionRegistry, DslEffect, StepRegistry};
use crate::rules::{AdditionalRuleRegistry, VictoryEvaluator};
use crate::stack::Sequencer;

/// Every registry the engine needs, threaded explicitly.
///
/// Registries are filled at start-up and only read afterwards, so a
/// context can be shared by any number of games.
#[derive(Clone, Debug)]
pub struct EngineContext {
    config: DuelConfig,
    cards: CardRegistry,
    actions: ChainableActionRegistry,
    rules: AdditionalRuleRegistry,
    conditions: ConditionRegistry,
    steps: StepRegistry,
}

/// Result of `begin_activation`.
#[derive(Debug)]
pub enum Activation<'c> {
    /// The activation passed validation; run the sequencer.
    Ready(Sequencer<'c>),
    /// `can_activate` refused.
    Rejected(ValidationError),
}

impl EngineContext {
    /// A context with empty card, action and rule registries and the
    /// built-in DSL vocabulary.
    #[must_use]
    pub fn new(config: DuelConfig) -> Self {
        Self {
            config,
            cards: CardRegistry::new(),
            actions: ChainableActionRegistry::new(),
            rules: AdditionalRuleRegistry::new(),
            conditions: ConditionRegistry::with_builtins(),
            steps: StepRegistry::with_builtins(),
        }
    }

    /// A context with the built-in card library registered.
    pub fn with_library(config: DuelConfig) -> Result<Self, EngineError> {
        let mut ctx = Self::new(config);
        crate::library::register_all(&mut ctx)?;
        info!(
            cards = ctx.cards.len(),
            actions = ctx.actions.len(),
            rules = ctx.rules.len(),
            "card library registered"
        );
        Ok(ctx)
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut CardRegistry {
        &mut self.cards
    }

    #[must_use]
    pub fn actions(&self) -> &ChainableActionRegistry {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ChainableActionRegistry {
        &mut self.actions
    }

    #[must_use]
    pub fn rules(&self) -> &AdditionalRuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut AdditionalRuleRegistry {
        &mut self.rules
    }

    #[must_use]
    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionRegistry {
        &mut self.conditions
    }

    #[must_use]
    pub fn steps(&self) -> &StepRegistry {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepRegistry {
        &mut self.steps
    }

    /// Compile a DSL effect and register it as a chainable action.
    pub fn register_dsl_effect(&mut self, effect: &DslEffect) -> Result<(), RegistryError> {
        let compiled = effect.compile(&self.conditions, &self.steps)?;
        self.actions.register(compiled)
    }

    /// The opening snapshot for a deck list.
    pub fn new_game(&self, deck: &[CardId]) -> Result<GameState, EngineError> {
        GameState::new(&self.config, &self.cards, deck)
    }

    /// The action registered for `instance`'s card under `category`.
    pub fn action_for(
        &self,
        state: &GameState,
        instance: InstanceId,
        category: EffectCategory,
    ) -> Result<&dyn ChainableAction, EngineError> {
        let card = state
            .instance(instance)
            .ok_or(EngineError::UnknownInstance(instance))?;
        let action = self.actions.get(card.card_id(), category)?;
        Ok(action.as_ref())
    }

    /// Validate an activation without running it.
    ///
    /// The outer `Result` is an integration failure (unknown instance or no
    /// registered effect); the inner one is the validation verdict.
    pub fn can_activate(
        &self,
        state: &GameState,
        instance: InstanceId,
        category: EffectCategory,
    ) -> Result<ValidationResult, EngineError> {
        let action = self.action_for(state, instance, category)?;
        Ok(action.can_activate(&self.rules, state, instance))
    }

    /// Validate an activation and build its sequencer.
    pub fn begin_activation(
        &self,
        state: &GameState,
        instance: InstanceId,
        category: EffectCategory,
    ) -> Result<Activation<'_>, EngineError> {
        let action = self.action_for(state, instance, category)?;
        if let Err(error) = action.can_activate(&self.rules, state, instance) {
            info!(%instance, %error, "activation refused");
            return Ok(Activation::Rejected(error));
        }

        let mut steps = action.create_activation_steps(state, instance);
        steps.extend(action.create_resolution_steps(state, instance));
        info!(%instance, effect = %action.effect_id(), steps = steps.len(), "activation started");
        Ok(Activation::Ready(Sequencer::new(state.clone(), steps, &self.rules)))
    }

    /// Evaluate victory and record the result on the snapshot.
    #[must_use]
    pub fn evaluate_victory(&self, state: &GameState, draw_due: bool) -> GameState {
        VictoryEvaluator::new(&self.rules).apply(state, draw_due)
    }

    /// Apply self-destruction rules, then evaluate victory.
    ///
    /// Callers run this after a resolution completes.
    pub fn settle(&self, state: &GameState) -> Result<GameState, ValidationError> {
        let destroyed = self.rules.apply_self_destruction(state)?;
        Ok(self.evaluate_victory(&destroyed.state, false))
    }
}
