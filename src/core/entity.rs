//! Instance identification.
//!
//! Every physical card copy in a game has a unique `InstanceId`. Ids are
//! allocated sequentially when the deck is instantiated and are never
//! reused: an instance keeps its id across every zone move.
//!
//! ```
//! use rust_duel::core::InstanceId;
//!
//! let first = InstanceId::first();
//! assert_eq!(first.next(), InstanceId(2));
//! assert_eq!(format!("{}", first), "Instance(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// The first id handed out by the initializer.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
