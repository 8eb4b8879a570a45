//! Effect building blocks.
//!
//! Card effects are sequences of [`AtomicStep`]s. Each step is a pure
//! transition from one snapshot to the next:
//!
//! - [`operations`]: the pure state operations (draw, discard, search,
//!   counters, life points...)
//! - [`steps`]: prebuilt steps over those operations
//! - [`CardSelection`]: what an interactive step lets the player pick
//! - [`DslEffect`]: effects described as data and compiled through the
//!   kind-keyed [`ConditionRegistry`] and [`StepRegistry`]
//!
//! ## Fail-closed steps
//!
//! A step either returns the next snapshot or a `ValidationError`. There is
//! no third outcome, so a failing step leaves its input untouched.

mod dsl;
pub mod operations;
mod selection;
mod step;
pub mod steps;

pub use dsl::{
    ConditionHandler, ConditionKind, ConditionRegistry, DslCondition, DslEffect, DslStep,
    StepHandler, StepKind, StepRegistry,
};
pub use selection::{CardFilter, CardSelection, SelectionRequest, SelectionSource};
pub use step::{AtomicStep, NotificationLevel, StepAction, StepOutput, StepResult};
