//! Turn phases.
//!
//! Solo play uses a fixed four-phase cycle. Battle is not simulated.

use serde::{Deserialize, Serialize};

/// A phase of the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Draw,
    Standby,
    Main,
    End,
}

impl Phase {
    /// The phase that follows this one. `End` wraps to `Draw`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Draw => Phase::Standby,
            Phase::Standby => Phase::Main,
            Phase::Main => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    /// True if advancing from this phase starts a new turn.
    #[must_use]
    pub const fn ends_turn(self) -> bool {
        matches!(self, Phase::End)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "draw",
            Phase::Standby => "standby",
            Phase::Main => "main",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}
