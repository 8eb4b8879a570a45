//! Typed effect DSL.
//!
//! A [`DslEffect`] describes a card effect as data: a template, a list of
//! [`DslCondition`]s and a list of [`DslStep`]s. Compiling it resolves each
//! condition and step through a kind-keyed registry, so an unregistered
//! kind fails at registration time rather than mid-game.
//!
//! ## Example
//!
//! ```
//! use rust_duel::actions::{ActivationTemplate, ChainableAction, OncePerTurn};
//! use rust_duel::cards::CardId;
//! use rust_duel::effects::{ConditionRegistry, DslCondition, DslEffect, DslStep, StepRegistry};
//!
//! let effect = DslEffect {
//!     card_id: CardId::new(93946239),
//!     template: ActivationTemplate::NormalSpell,
//!     once_per_turn: OncePerTurn::Unlimited,
//!     conditions: vec![DslCondition::HandAtLeast { count: 3, excluding_source: true }],
//!     steps: vec![DslStep::Draw(1)],
//! };
//!
//! let compiled = effect
//!     .compile(&ConditionRegistry::with_builtins(), &StepRegistry::with_builtins())
//!     .unwrap();
//! assert_eq!(compiled.card_id(), CardId::new(93946239));
//! ```

use serde::{Deserialize, Serialize};

use crate::actions::{ActivationTemplate, CardEffect, OncePerTurn};
use crate::cards::{CardId, CounterKind};
use crate::core::{
    ErrorCode, GameState, InstanceId, Phase, Registry, RegistryError, Side, ValidationError,
    ValidationResult,
};
use crate::zones::ZoneName;

use super::selection::CardFilter;
use super::step::AtomicStep;
use super::steps;

/// Activation conditions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DslCondition {
    /// At least `count` cards in hand, optionally not counting the source.
    HandAtLeast { count: usize, excluding_source: bool },
    /// At least this many cards in the deck.
    DeckAtLeast(usize),
    /// The source holds at least `count` counters of `kind`.
    CountersAtLeast { kind: CounterKind, count: u32 },
    /// The source is face-up on the field.
    OnField,
    /// The current phase.
    InPhase(Phase),
    /// At least one card in `zone` matches `filter`.
    ZoneHas { zone: ZoneName, filter: CardFilter },
}

/// Discriminant of [`DslCondition`], the condition registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    HandAtLeast,
    DeckAtLeast,
    CountersAtLeast,
    OnField,
    InPhase,
    ZoneHas,
}

impl DslCondition {
    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            DslCondition::HandAtLeast { .. } => ConditionKind::HandAtLeast,
            DslCondition::DeckAtLeast(_) => ConditionKind::DeckAtLeast,
            DslCondition::CountersAtLeast { .. } => ConditionKind::CountersAtLeast,
            DslCondition::OnField => ConditionKind::OnField,
            DslCondition::InPhase(_) => ConditionKind::InPhase,
            DslCondition::ZoneHas { .. } => ConditionKind::ZoneHas,
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConditionKind::HandAtLeast => "hand_at_least",
            ConditionKind::DeckAtLeast => "deck_at_least",
            ConditionKind::CountersAtLeast => "counters_at_least",
            ConditionKind::OnField => "on_field",
            ConditionKind::InPhase => "in_phase",
            ConditionKind::ZoneHas => "zone_has",
        };
        f.write_str(name)
    }
}

/// Effect body steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DslStep {
    Draw(usize),
    DrawUntil(usize),
    /// Interactive discard of exactly this many cards.
    Discard(usize),
    GainLife { side: Side, amount: u32 },
    LoseLife { side: Side, amount: u32 },
    /// Counters on the source.
    AddCounters { kind: CounterKind, amount: u32, limit: Option<u32> },
    /// Counters off the source.
    RemoveCounters { kind: CounterKind, amount: u32 },
    /// Interactive deck search.
    Search(CardFilter),
    /// Interactive pick from a zone into the hand.
    AddToHand { from: ZoneName, filter: CardFilter },
    SendSourceToGraveyard,
}

/// Discriminant of [`DslStep`], the step registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Draw,
    DrawUntil,
    Discard,
    GainLife,
    LoseLife,
    AddCounters,
    RemoveCounters,
    Search,
    AddToHand,
    SendSourceToGraveyard,
}

impl DslStep {
    #[must_use]
    pub fn kind(&self) -> StepKind {
        match self {
            DslStep::Draw(_) => StepKind::Draw,
            DslStep::DrawUntil(_) => StepKind::DrawUntil,
            DslStep::Discard(_) => StepKind::Discard,
            DslStep::GainLife { .. } => StepKind::GainLife,
            DslStep::LoseLife { .. } => StepKind::LoseLife,
            DslStep::AddCounters { .. } => StepKind::AddCounters,
            DslStep::RemoveCounters { .. } => StepKind::RemoveCounters,
            DslStep::Search(_) => StepKind::Search,
            DslStep::AddToHand { .. } => StepKind::AddToHand,
            DslStep::SendSourceToGraveyard => StepKind::SendSourceToGraveyard,
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepKind::Draw => "draw",
            StepKind::DrawUntil => "draw_until",
            StepKind::Discard => "discard",
            StepKind::GainLife => "gain_life",
            StepKind::LoseLife => "lose_life",
            StepKind::AddCounters => "add_counters",
            StepKind::RemoveCounters => "remove_counters",
            StepKind::Search => "search",
            StepKind::AddToHand => "add_to_hand",
            StepKind::SendSourceToGraveyard => "send_source_to_graveyard",
        };
        f.write_str(name)
    }
}

/// Evaluates one condition for a source instance.
pub type ConditionHandler = fn(&DslCondition, &GameState, InstanceId) -> ValidationResult;

/// Builds the step for one DSL step and a source instance.
pub type StepHandler = fn(&DslStep, InstanceId) -> AtomicStep;

/// Named conditions, keyed by kind.
#[derive(Clone)]
pub struct ConditionRegistry {
    handlers: Registry<ConditionKind, ConditionHandler>,
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Registry::new("dsl conditions"),
        }
    }

    /// A registry holding a handler for every condition kind.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(ConditionKind, ConditionHandler); 6] = [
            (ConditionKind::HandAtLeast, hand_at_least),
            (ConditionKind::DeckAtLeast, deck_at_least),
            (ConditionKind::CountersAtLeast, counters_at_least),
            (ConditionKind::OnField, on_field),
            (ConditionKind::InPhase, in_phase),
            (ConditionKind::ZoneHas, zone_has),
        ];
        for (kind, handler) in builtins {
            // Kinds in the table are distinct, so this cannot fail.
            let _ = registry.register(kind, handler);
        }
        registry
    }

    pub fn register(&mut self, kind: ConditionKind, handler: ConditionHandler) -> Result<(), RegistryError> {
        self.handlers.register(kind, handler)
    }

    pub fn get(&self, kind: ConditionKind) -> Result<ConditionHandler, RegistryError> {
        self.handlers.get(kind).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

/// Named steps, keyed by kind.
#[derive(Clone)]
pub struct StepRegistry {
    handlers: Registry<StepKind, StepHandler>,
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Registry::new("dsl steps"),
        }
    }

    /// A registry holding a handler for every step kind.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [StepKind; 10] = [
            StepKind::Draw,
            StepKind::DrawUntil,
            StepKind::Discard,
            StepKind::GainLife,
            StepKind::LoseLife,
            StepKind::AddCounters,
            StepKind::RemoveCounters,
            StepKind::Search,
            StepKind::AddToHand,
            StepKind::SendSourceToGraveyard,
        ];
        for kind in builtins {
            // Kinds in the table are distinct, so this cannot fail.
            let _ = registry.register(kind, builtin_step);
        }
        registry
    }

    pub fn register(&mut self, kind: StepKind, handler: StepHandler) -> Result<(), RegistryError> {
        self.handlers.register(kind, handler)
    }

    pub fn get(&self, kind: StepKind) -> Result<StepHandler, RegistryError> {
        self.handlers.get(kind).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.handlers.ids()).finish()
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.handlers.ids()).finish()
    }
}

/// A card effect described as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslEffect {
    pub card_id: CardId,
    pub template: ActivationTemplate,
    #[serde(default)]
    pub once_per_turn: OncePerTurn,
    #[serde(default)]
    pub conditions: Vec<DslCondition>,
    pub steps: Vec<DslStep>,
}

impl DslEffect {
    /// Resolve every condition and step handler and build the effect.
    pub fn compile(
        &self,
        conditions: &ConditionRegistry,
        steps: &StepRegistry,
    ) -> Result<CardEffect, RegistryError> {
        let checks = self
            .conditions
            .iter()
            .map(|c| conditions.get(c.kind()).map(|handler| (c.clone(), handler)))
            .collect::<Result<Vec<_>, _>>()?;
        let body = self
            .steps
            .iter()
            .map(|s| steps.get(s.kind()).map(|handler| (s.clone(), handler)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CardEffect::new(self.card_id, self.template)
            .with_once_per_turn(self.once_per_turn)
            .with_requirement(move |state, source| {
                checks
                    .iter()
                    .try_for_each(|(condition, handler)| handler(condition, state, source))
            })
            .with_resolution(move |_, source| {
                body.iter().map(|(step, handler)| handler(step, source)).collect()
            }))
    }
}

fn mismatch(expected: ConditionKind, got: &DslCondition) -> ValidationError {
    ValidationError::conditions_not_met(format!(
        "{} handler cannot evaluate {}",
        expected,
        got.kind()
    ))
}

fn hand_at_least(condition: &DslCondition, state: &GameState, source: InstanceId) -> ValidationResult {
    let DslCondition::HandAtLeast { count, excluding_source } = condition else {
        return Err(mismatch(ConditionKind::HandAtLeast, condition));
    };
    let hand = state
        .zone(ZoneName::Hand)
        .iter()
        .filter(|c| !(*excluding_source && c.instance_id == source))
        .count();
    if hand >= *count {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::InsufficientHand,
            format!("needs {} other card(s) in hand, has {}", count, hand),
        ))
    }
}

fn deck_at_least(condition: &DslCondition, state: &GameState, _source: InstanceId) -> ValidationResult {
    let DslCondition::DeckAtLeast(count) = condition else {
        return Err(mismatch(ConditionKind::DeckAtLeast, condition));
    };
    let deck = state.zones().len(ZoneName::Deck);
    if deck >= *count {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::InsufficientDeck,
            format!("needs {} card(s) in the deck, has {}", count, deck),
        ))
    }
}

fn counters_at_least(condition: &DslCondition, state: &GameState, source: InstanceId) -> ValidationResult {
    let DslCondition::CountersAtLeast { kind, count } = condition else {
        return Err(mismatch(ConditionKind::CountersAtLeast, condition));
    };
    let held = state.instance(source).map_or(0, |c| c.counter(*kind));
    if held >= *count {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::InsufficientCounters,
            format!("needs {} {}(s), has {}", count, kind, held),
        ))
    }
}

fn on_field(condition: &DslCondition, state: &GameState, source: InstanceId) -> ValidationResult {
    if !matches!(condition, DslCondition::OnField) {
        return Err(mismatch(ConditionKind::OnField, condition));
    }
    match state.instance(source) {
        Some(card) if card.is_on_field() && card.is_face_up() => Ok(()),
        _ => Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is not face-up on the field", source),
        )),
    }
}

fn in_phase(condition: &DslCondition, state: &GameState, _source: InstanceId) -> ValidationResult {
    let DslCondition::InPhase(phase) = condition else {
        return Err(mismatch(ConditionKind::InPhase, condition));
    };
    if state.phase() == *phase {
        Ok(())
    } else {
        Err(ValidationError::conditions_not_met(format!(
            "only in the {} phase",
            phase
        )))
    }
}

fn zone_has(condition: &DslCondition, state: &GameState, _source: InstanceId) -> ValidationResult {
    let DslCondition::ZoneHas { zone, filter } = condition else {
        return Err(mismatch(ConditionKind::ZoneHas, condition));
    };
    if state.zone(*zone).iter().any(|c| filter.matches(c)) {
        Ok(())
    } else {
        Err(ValidationError::conditions_not_met(format!(
            "no suitable card in the {}",
            zone
        )))
    }
}

fn builtin_step(step: &DslStep, source: InstanceId) -> AtomicStep {
    match step {
        DslStep::Draw(count) => steps::draw(*count),
        DslStep::DrawUntil(size) => steps::draw_until(*size),
        DslStep::Discard(count) => steps::discard(*count),
        DslStep::GainLife { side, amount } => steps::gain_life(*side, *amount),
        DslStep::LoseLife { side, amount } => steps::lose_life(*side, *amount),
        DslStep::AddCounters { kind, amount, limit } => {
            steps::add_counters(source, *kind, *amount, *limit)
        }
        DslStep::RemoveCounters { kind, amount } => steps::remove_counters(source, *kind, *amount),
        DslStep::Search(filter) => steps::search(filter.clone()),
        DslStep::AddToHand { from, filter } => steps::add_to_hand_from(*from, filter.clone()),
        DslStep::SendSourceToGraveyard => steps::send_to_graveyard(source),
    }
}
