//! The command boundary.
//!
//! [`EngineContext`] owns every registry. Callers hand it a snapshot and get
//! a new one back; the context itself never stores game state.
//!
//! ## Example Usage
//!
//! ```
//! use rust_duel::cards::EffectCategory;
//! use rust_duel::core::{DuelConfig, Phase};
//! use rust_duel::engine::{advance_to, Activation, EngineContext};
//! use rust_duel::library::ids;
//! use rust_duel::stack::SequencerOutcome;
//!
//! let ctx = EngineContext::with_library(DuelConfig::new().with_opening_hand(1).without_shuffle()).unwrap();
//! let state = advance_to(&ctx.new_game(&[ids::POT_OF_GREED; 3]).unwrap(), Phase::Main);
//! let pot = state.zone(rust_duel::zones::ZoneName::Hand)[0].instance_id;
//!
//! let Activation::Ready(mut sequencer) = ctx.begin_activation(&state, pot, EffectCategory::Activation).unwrap() else {
//!     panic!("Pot of Greed should be activatable");
//! };
//! assert!(matches!(sequencer.start().unwrap(), SequencerOutcome::Completed { .. }));
//! ```

mod context;
mod summon;
mod turn;

pub use context::{Activation, EngineContext};
pub use turn::{advance_phase, advance_to};
