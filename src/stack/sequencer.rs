//! Atomic-step sequencer.
//!
//! The sequencer runs one activation's steps in order against a snapshot it
//! owns. Non-interactive steps run as soon as they are reached. An
//! interactive step suspends the run until the caller supplies a selection
//! (or cancels, if the step allows it).
//!
//! After every successful step, the events it emitted are handed to the
//! trigger collector, and any steps it returns are spliced in directly
//! after the step that emitted them.
//!
//! A failing step ends the run. Earlier steps stay applied; the outcome
//! reports the snapshot from just before the failing step.
//!
//! ```text
//! Idle ──start──▶ Running(i) ──▶ Complete
//!                   │    ▲
//!       interactive ▼    │ provide_selection
//!          AwaitingSelection(i)
//!                   │
//!      fail / cancel▼
//!                Aborted
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{EngineError, ErrorCode, GameState, InstanceId, ValidationError};
use crate::effects::{AtomicStep, SelectionRequest};
use crate::triggers::{GameEvent, TriggerCollector};

/// Where the sequencer is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerState {
    Idle,
    Running(usize),
    AwaitingSelection { index: usize, request: SelectionRequest },
    Complete,
    Aborted(String),
}

/// What a call to the sequencer produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SequencerOutcome {
    /// Every step ran.
    Completed { state: GameState },
    /// Suspended at an interactive step.
    AwaitingSelection(SelectionRequest),
    /// A step failed. `state` is the snapshot from just before it.
    Failed {
        state: GameState,
        step_id: String,
        error: ValidationError,
    },
    /// Cancelled at a cancelable step. `state` is the pre-activation snapshot.
    Cancelled { state: GameState },
    /// A selection or cancel was refused; still awaiting the same request.
    Rejected {
        error: ValidationError,
        request: SelectionRequest,
    },
}

/// Runs a list of steps for one activation.
pub struct Sequencer<'c> {
    steps: Vec<AtomicStep>,
    cursor: usize,
    state: GameState,
    initial: GameState,
    status: SequencerState,
    collector: &'c dyn TriggerCollector,
    messages: Vec<String>,
    events: Vec<GameEvent>,
}

impl<'c> Sequencer<'c> {
    /// A sequencer ready to run `steps` from `state`.
    #[must_use]
    pub fn new(state: GameState, steps: Vec<AtomicStep>, collector: &'c dyn TriggerCollector) -> Self {
        Self {
            steps,
            cursor: 0,
            initial: state.clone(),
            state,
            status: SequencerState::Idle,
            collector,
            messages: Vec::new(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> &SequencerState {
        &self.status
    }

    /// The snapshot after the last successful step.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The snapshot the run started from.
    #[must_use]
    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    /// The step list, including spliced steps.
    #[must_use]
    pub fn steps(&self) -> &[AtomicStep] {
        &self.steps
    }

    /// Index of the next step to run.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Messages from successful steps, in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Events from successful steps, in order.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Run until completion, failure or the first interactive step.
    pub fn start(&mut self) -> Result<SequencerOutcome, EngineError> {
        if self.status != SequencerState::Idle {
            return Err(EngineError::SequencerState { expected: "idle" });
        }
        info!(steps = self.steps.len(), "resolution started");
        Ok(self.run())
    }

    /// Supply the selection for the pending interactive step.
    ///
    /// An invalid selection is rejected and the request stays pending.
    pub fn provide_selection(&mut self, chosen: &[InstanceId]) -> Result<SequencerOutcome, EngineError> {
        let SequencerState::AwaitingSelection { request, .. } = &self.status else {
            return Err(EngineError::SequencerState {
                expected: "awaiting a selection",
            });
        };
        let request = request.clone();

        let step = self.steps[self.cursor].clone();
        if let Err(error) = step.validate_selection(&self.state, chosen) {
            debug!(step = step.id(), %error, "selection rejected");
            return Ok(SequencerOutcome::Rejected { error, request });
        }

        self.status = SequencerState::Running(self.cursor);
        if let Some(failed) = self.execute(&step, chosen) {
            return Ok(failed);
        }
        Ok(self.run())
    }

    /// Cancel the pending interactive step.
    ///
    /// Only cancelable steps can be cancelled. Cancelling aborts the run and
    /// reports the pre-activation snapshot; any other step refuses with
    /// `NotCancelable` and keeps waiting.
    pub fn cancel(&mut self) -> Result<SequencerOutcome, EngineError> {
        let SequencerState::AwaitingSelection { request, .. } = &self.status else {
            return Err(EngineError::SequencerState {
                expected: "awaiting a selection",
            });
        };
        let request = request.clone();

        if !request.cancelable {
            return Ok(SequencerOutcome::Rejected {
                error: ValidationError::new(
                    ErrorCode::NotCancelable,
                    format!("{} cannot be cancelled", request.summary),
                ),
                request,
            });
        }

        warn!(step = %request.step_id, "resolution cancelled");
        self.status = SequencerState::Aborted("cancelled".to_string());
        self.state = self.initial.clone();
        Ok(SequencerOutcome::Cancelled {
            state: self.initial.clone(),
        })
    }

    fn run(&mut self) -> SequencerOutcome {
        while self.cursor < self.steps.len() {
            self.status = SequencerState::Running(self.cursor);
            let step = self.steps[self.cursor].clone();

            if let Some(request) = step.request(&self.state) {
                if request.candidates.len() < request.min {
                    let error = ValidationError::new(
                        ErrorCode::InvalidSelection,
                        format!(
                            "{} needs {} card(s), only {} available",
                            step.summary(),
                            request.min,
                            request.candidates.len()
                        ),
                    );
                    return self.fail(&step, error);
                }
                debug!(step = step.id(), candidates = request.candidates.len(), "awaiting selection");
                self.status = SequencerState::AwaitingSelection {
                    index: self.cursor,
                    request: request.clone(),
                };
                return SequencerOutcome::AwaitingSelection(request);
            }

            if let Some(failed) = self.execute(&step, &[]) {
                return failed;
            }
        }

        self.status = SequencerState::Complete;
        info!(steps = self.steps.len(), "resolution complete");
        SequencerOutcome::Completed {
            state: self.state.clone(),
        }
    }

    /// Run one step and splice in triggered steps. Returns the failure
    /// outcome if the step failed.
    fn execute(&mut self, step: &AtomicStep, selected: &[InstanceId]) -> Option<SequencerOutcome> {
        let output = match step.execute(&self.state, selected) {
            Ok(output) => output,
            Err(error) => return Some(self.fail(step, error)),
        };
        debug!(step = step.id(), index = self.cursor, "step executed");

        self.state = output.state;
        if let Some(message) = output.message {
            self.messages.push(message);
        }

        let mut triggered = Vec::new();
        for event in &output.events {
            let added = self.collector.collect_steps(&self.state, event);
            if !added.is_empty() {
                debug!(event = %event.kind(), count = added.len(), "spliced triggered steps");
            }
            triggered.extend(added);
        }
        self.events.extend(output.events);

        let at = self.cursor + 1;
        self.steps.splice(at..at, triggered);
        self.cursor = at;
        None
    }

    fn fail(&mut self, step: &AtomicStep, error: ValidationError) -> SequencerOutcome {
        warn!(step = step.id(), %error, "step failed");
        self.status = SequencerState::Aborted(error.message.clone());
        SequencerOutcome::Failed {
            state: self.state.clone(),
            step_id: step.id().to_string(),
            error,
        }
    }
}

impl std::fmt::Debug for Sequencer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("steps", &self.steps.iter().map(AtomicStep::id).collect::<Vec<_>>())
            .field("cursor", &self.cursor)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
