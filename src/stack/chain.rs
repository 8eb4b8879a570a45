//! Chain blocks.
//!
//! Only one activation resolves at a time, so the snapshot's chain list is
//! reserved for a future chain resolver. `ChainBlock` fixes its shape.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, EffectCategory};
use crate::core::InstanceId;

/// Spell speed of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpellSpeed {
    One = 1,
    Two = 2,
    Three = 3,
}

impl SpellSpeed {
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// One link of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBlock {
    pub card_id: CardId,
    pub instance_id: InstanceId,
    pub category: EffectCategory,
    pub spell_speed: SpellSpeed,
}

impl ChainBlock {
    #[must_use]
    pub fn new(
        card_id: CardId,
        instance_id: InstanceId,
        category: EffectCategory,
        spell_speed: SpellSpeed,
    ) -> Self {
        Self {
            card_id,
            instance_id,
            category,
            spell_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_speed_order() {
        assert!(SpellSpeed::One < SpellSpeed::Two);
        assert_eq!(SpellSpeed::Three.value(), 3);
    }

    #[test]
    fn test_chain_block_serialization() {
        let block = ChainBlock::new(
            CardId::new(1),
            InstanceId(2),
            EffectCategory::Activation,
            SpellSpeed::Two,
        );
        let json = serde_json::to_string(&block).unwrap();
        let deserialized: ChainBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(block, deserialized);
    }
}
