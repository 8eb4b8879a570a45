//! Atomic steps.
//!
//! An `AtomicStep` is one state transition of an activation: an action
//! from `(snapshot, selected ids)` to a `StepResult`. A step either
//! succeeds with the next snapshot (plus a message and any events) or fails
//! with a `ValidationError`. Failure carries no snapshot, so a failing step
//! can never leave a partially applied state behind.
//!
//! ## Example
//!
//! ```
//! use rust_duel::core::ValidationError;
//! use rust_duel::effects::{AtomicStep, NotificationLevel};
//!
//! let refuse = AtomicStep::new("refuse", "Always fails", |_state, _selected| {
//!     Err(ValidationError::conditions_not_met("nothing to do"))
//! })
//! .with_notification(NotificationLevel::Silent);
//!
//! assert_eq!(refuse.id(), "refuse");
//! assert!(!refuse.is_interactive());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::selection::{CardSelection, SelectionRequest};
use crate::core::{ErrorCode, GameState, InstanceId, ValidationError, ValidationResult};
use crate::triggers::GameEvent;

/// How a step is surfaced to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Runs without any notice.
    Silent,
    /// Runs immediately; the message is shown.
    #[default]
    Informational,
    /// Suspends the sequencer until a selection is supplied.
    Interactive,
}

/// Successful step outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutput {
    pub state: GameState,
    pub message: Option<String>,
    pub events: SmallVec<[GameEvent; 2]>,
}

impl StepOutput {
    /// Output with a new snapshot and nothing else.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            message: None,
            events: SmallVec::new(),
        }
    }

    /// Attach a message (builder pattern).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach an event (builder pattern).
    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Result of running a step.
pub type StepResult = Result<StepOutput, ValidationError>;

/// Step action: `(snapshot, selected ids) -> result`.
pub type StepAction = Arc<dyn Fn(&GameState, &[InstanceId]) -> StepResult + Send + Sync>;

/// One atomic state transition.
#[derive(Clone)]
pub struct AtomicStep {
    id: String,
    summary: String,
    description: String,
    notification: NotificationLevel,
    selection: Option<CardSelection>,
    action: StepAction,
}

impl AtomicStep {
    /// Create an informational step.
    pub fn new<F>(id: impl Into<String>, summary: impl Into<String>, action: F) -> Self
    where
        F: Fn(&GameState, &[InstanceId]) -> StepResult + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            summary: summary.into(),
            description: String::new(),
            notification: NotificationLevel::default(),
            selection: None,
            action: Arc::new(action),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the notification level (builder pattern).
    #[must_use]
    pub fn with_notification(mut self, level: NotificationLevel) -> Self {
        self.notification = level;
        self
    }

    /// Attach a card selection. The step becomes interactive.
    #[must_use]
    pub fn with_selection(mut self, selection: CardSelection) -> Self {
        self.selection = Some(selection);
        self.notification = NotificationLevel::Interactive;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn notification(&self) -> NotificationLevel {
        self.notification
    }

    #[must_use]
    pub fn selection(&self) -> Option<&CardSelection> {
        self.selection.as_ref()
    }

    /// Interactive steps wait for a selection before running.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.notification == NotificationLevel::Interactive
    }

    /// The request shown while this step waits. `None` for steps that run
    /// immediately.
    ///
    /// An interactive step without a selection asks for confirmation only:
    /// no candidates, and the only valid answer is an empty selection.
    #[must_use]
    pub fn request(&self, state: &GameState) -> Option<SelectionRequest> {
        if !self.is_interactive() {
            return None;
        }
        Some(match &self.selection {
            Some(selection) => selection.request(&self.id, &self.summary, state),
            None => SelectionRequest {
                step_id: self.id.clone(),
                summary: self.summary.clone(),
                candidates: Vec::new(),
                min: 0,
                max: 0,
                cancelable: false,
            },
        })
    }

    /// Validate the ids supplied for this step.
    pub fn validate_selection(&self, state: &GameState, chosen: &[InstanceId]) -> ValidationResult {
        match &self.selection {
            Some(selection) => selection.validate(state, chosen),
            None if chosen.is_empty() => Ok(()),
            None => Err(ValidationError::new(
                ErrorCode::InvalidSelection,
                format!("{} takes no cards, got {}", self.summary, chosen.len()),
            )),
        }
    }

    /// Run the action.
    pub fn execute(&self, state: &GameState, selected: &[InstanceId]) -> StepResult {
        (self.action)(state, selected)
    }
}

impl std::fmt::Debug for AtomicStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicStep")
            .field("id", &self.id)
            .field("summary", &self.summary)
            .field("notification", &self.notification)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
