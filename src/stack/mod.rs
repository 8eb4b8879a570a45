//! Resolution.
//!
//! One activation resolves at a time through a [`Sequencer`]. The
//! snapshot's chain list is reserved; [`ChainBlock`] fixes the shape of its
//! entries.
//!
//! ## Example Usage
//!
//! ```
//! use rust_duel::cards::{CardData, CardId, CardRegistry, SpellType};
//! use rust_duel::core::{DuelConfig, GameState};
//! use rust_duel::effects::steps;
//! use rust_duel::stack::{Sequencer, SequencerOutcome};
//! use rust_duel::triggers::NoTriggers;
//! use rust_duel::zones::ZoneName;
//!
//! let mut catalog = CardRegistry::new();
//! catalog.register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal)).unwrap();
//! let config = DuelConfig::new().with_opening_hand(0);
//! let state = GameState::new(&config, &catalog, &[CardId::new(1); 3]).unwrap();
//!
//! let mut sequencer = Sequencer::new(state, vec![steps::draw(2)], &NoTriggers);
//! match sequencer.start().unwrap() {
//!     SequencerOutcome::Completed { state } => {
//!         assert_eq!(state.zones().len(ZoneName::Hand), 2);
//!         assert_eq!(state.zones().len(ZoneName::Deck), 1);
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

mod chain;
mod sequencer;

pub use chain::{ChainBlock, SpellSpeed};
pub use sequencer::{Sequencer, SequencerOutcome, SequencerState};
