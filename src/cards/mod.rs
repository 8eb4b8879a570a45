//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card species
//! - `CardData`: Immutable card definition (kind, frame, sub-type, stats)
//! - `CardInstance`: One physical copy (instance id, location, field state)
//! - `CardRegistry`: Card definition lookup, behind the `CardCatalog` trait

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    CardData, CardId, CardKind, EffectCategory, EffectId, FrameType, MonsterStats, Race,
    SpellType, TrapType,
};
pub use instance::{
    BattlePosition, CardInstance, Counter, CounterKind, Face, Placement, StateOnField,
};
pub use registry::{CardCatalog, CardRegistry};
