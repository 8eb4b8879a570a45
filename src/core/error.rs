//! Error types.
//!
//! Two classes are kept apart:
//!
//! - **Validation failures** (`ValidationError`, tagged with an `ErrorCode`)
//!   are ordinary values. A card that cannot be activated, or a step whose
//!   precondition fails, reports one and the caller branches on it.
//! - **Integration failures** (`RegistryError`, `EngineError`) mean the
//!   engine was wired incorrectly: an unknown identifier, a duplicate
//!   registration, a broken snapshot invariant. They are returned as `Err`
//!   from the wiring APIs and are expected to be propagated to the top.

use serde::{Deserialize, Serialize};

/// Closed set of validation failure codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Generic requirement failure (phase, once-per-turn, missing targets).
    ConditionsNotMet,
    /// Not enough counters to pay a cost.
    InsufficientCounters,
    /// Not enough cards in the deck.
    InsufficientDeck,
    /// Not enough cards in the hand.
    InsufficientHand,
    /// The destination zone is full.
    ZoneFull,
    /// An additional rule forbids the action.
    ActionProhibited,
    /// The source card is not where the effect requires it to be.
    InvalidSource,
    /// The selection did not satisfy the request.
    InvalidSelection,
    /// A cancel was requested on a non-cancelable step.
    NotCancelable,
}

impl ErrorCode {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ConditionsNotMet => "conditions_not_met",
            ErrorCode::InsufficientCounters => "insufficient_counters",
            ErrorCode::InsufficientDeck => "insufficient_deck",
            ErrorCode::InsufficientHand => "insufficient_hand",
            ErrorCode::ZoneFull => "zone_full",
            ErrorCode::ActionProhibited => "action_prohibited",
            ErrorCode::InvalidSource => "invalid_source",
            ErrorCode::InvalidSelection => "invalid_selection",
            ErrorCode::NotCancelable => "not_cancelable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for `ErrorCode::ConditionsNotMet`.
    pub fn conditions_not_met(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConditionsNotMet, message)
    }
}

/// Result of `can_activate` and other pure validation checks.
pub type ValidationResult = Result<(), ValidationError>;

/// Registry wiring failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{registry}: identifier {id} is already registered")]
    Duplicate { registry: &'static str, id: String },

    #[error("{registry}: unknown identifier {id} (available: [{available}])")]
    Unknown {
        registry: &'static str,
        id: String,
        available: String,
    },
}

impl RegistryError {
    /// The identifier the error is about.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            RegistryError::Duplicate { id, .. } | RegistryError::Unknown { id, .. } => id,
        }
    }
}

/// Engine integration failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("instance {0} not found in any zone")]
    UnknownInstance(super::InstanceId),

    #[error("snapshot invariant violated: {0}")]
    Invariant(String),

    #[error("sequencer is not {expected}")]
    SequencerState { expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::InsufficientCounters, "needs 3 spell counters");
        assert_eq!(err.to_string(), "insufficient_counters: needs 3 spell counters");
    }

    #[test]
    fn test_registry_error_names_identifier() {
        let err = RegistryError::Unknown {
            registry: "cards",
            id: "Card(99)".to_string(),
            available: "Card(1), Card(2)".to_string(),
        };

        let text = err.to_string();
        assert!(text.contains("Card(99)"));
        assert!(text.contains("Card(1), Card(2)"));
        assert_eq!(err.id(), "Card(99)");
    }

    #[test]
    fn test_engine_error_from_registry() {
        let err: EngineError = RegistryError::Duplicate {
            registry: "rules",
            id: "exodia".to_string(),
        }
        .into();

        assert!(matches!(err, EngineError::Registry(RegistryError::Duplicate { .. })));
        assert!(err.to_string().contains("already registered"));
    }
}
