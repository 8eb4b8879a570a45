//! Zone system for card locations.
//!
//! Solo play uses a fixed zone set: deck, hand, monster zone, spell/trap
//! zone, field zone, graveyard and banished. The three on-field zones have
//! capacity limits taken from `ZoneCapacity`.
//!
//! ## Key Types
//!
//! - `ZoneName`: The closed set of zones
//! - `Zones`: Persistent per-zone card collections
//! - `ZonePosition`: Top or bottom insertion

pub mod manager;

pub use manager::{ZoneName, ZonePosition, Zones};
