//! # rust-duel
//!
//! An effect resolution engine for solo play of a collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: every operation takes a `GameState` and
//!    returns a new one. Zones and turn flags are persistent `im`
//!    structures, so a snapshot clone is O(1).
//!
//! 2. **Fail closed**: validation failures are values. A failing step
//!    returns an error and no snapshot, so nothing is half-applied.
//!
//! 3. **Explicit context**: registries live in an `EngineContext` threaded
//!    through every call. There are no global singletons.
//!
//! ## Architecture
//!
//! - **Activation protocol**: `can_activate`, then activation steps, then
//!   resolution steps, all shaped by a closed set of activation templates.
//!
//! - **Additional rules**: continuous effects intercept name and stat
//!   reads, permission checks, destruction and victory without the engine
//!   knowing about individual cards.
//!
//! - **Sequencer**: runs steps in order, suspends at interactive ones and
//!   splices in steps contributed by event triggers.
//!
//! ## Modules
//!
//! - `core`: ids, sides, configuration, errors, registries, RNG, snapshot
//! - `zones`: zone collections and card moves
//! - `cards`: card definitions, instances and the catalog
//! - `effects`: atomic steps, pure operations, selections and the DSL
//! - `triggers`: events and event triggers
//! - `rules`: additional rules and the victory evaluator
//! - `stack`: the step sequencer and the reserved chain
//! - `actions`: the activation protocol and templates
//! - `engine`: the command boundary, turns and summoning
//! - `library`: built-in cards

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod triggers;
pub mod rules;
pub mod stack;
pub mod actions;
pub mod engine;
pub mod library;

// Re-export commonly used types
pub use crate::core::{
    DuelConfig, EngineError, ErrorCode, GameResult, GameState, InstanceId, Phase, RegistryError,
    Side, ValidationError, ValidationResult, VictoryReason,
};

pub use crate::zones::{ZoneName, Zones};

pub use crate::cards::{CardData, CardId, CardInstance, CardRegistry, EffectCategory, EffectId};

pub use crate::effects::{AtomicStep, CardFilter, CardSelection, DslEffect, StepOutput, StepResult};

pub use crate::triggers::{GameEvent, Trigger, TriggerCollector, TriggerRegistry};

pub use crate::rules::{AdditionalRule, AdditionalRuleRegistry, RuleCategory, VictoryEvaluator};

pub use crate::stack::{Sequencer, SequencerOutcome, SequencerState};

pub use crate::actions::{ActivationTemplate, CardEffect, ChainableAction, ChainableActionRegistry};

pub use crate::engine::{Activation, EngineContext};
