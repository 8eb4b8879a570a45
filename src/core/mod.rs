//! Core engine types: instance ids, sides, state, phases, RNG, configuration,
//! errors and the shared registry table.

pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod registry;
pub mod rng;
pub mod state;

pub use config::{DuelConfig, ZoneCapacity};
pub use entity::InstanceId;
pub use error::{EngineError, ErrorCode, RegistryError, ValidationError, ValidationResult};
pub use phase::Phase;
pub use player::{Side, SideMap};
pub use registry::Registry;
pub use rng::{GameRng, GameRngState};
pub use state::{GameResult, GameState, VictoryReason};
