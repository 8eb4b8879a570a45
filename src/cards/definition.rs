//! Card definitions: static card data.
//!
//! `CardData` holds the immutable properties of a card species. For
//! example, "Pot of Greed" is a normal spell - that is part of the
//! definition. Per-copy data (zone, counters, position) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card species (its printed passcode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Whether an effect is activated as a card (or set card), or used as an
/// ignition effect of a card already on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    Activation,
    Ignition,
}

impl std::fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectCategory::Activation => f.write_str("activation"),
            EffectCategory::Ignition => f.write_str("ignition"),
        }
    }
}

/// Identifies one effect of a card species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId {
    pub card: CardId,
    pub category: EffectCategory,
}

impl EffectId {
    #[must_use]
    pub const fn new(card: CardId, category: EffectCategory) -> Self {
        Self { card, category }
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.card, self.category)
    }
}

/// Broad card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Monster,
    Spell,
    Trap,
}

/// Frame sub-type, as printed on the card frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    Normal,
    Effect,
    Fusion,
    Ritual,
    Spell,
    Trap,
}

/// Spell sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellType {
    Normal,
    QuickPlay,
    Continuous,
    Field,
    Equip,
    Ritual,
}

/// Trap sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapType {
    Normal,
    Continuous,
    Counter,
}

/// Monster type line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Dragon,
    Fairy,
    Fiend,
    Machine,
    Spellcaster,
    Warrior,
    WingedBeast,
    Aqua,
}

/// Printed monster statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterStats {
    pub level: u8,
    pub attack: i32,
    pub defense: i32,
    pub race: Race,
}

impl MonsterStats {
    #[must_use]
    pub const fn new(level: u8, attack: i32, defense: i32, race: Race) -> Self {
        Self {
            level,
            attack,
            defense,
            race,
        }
    }
}

/// Immutable definition of one card species.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardData, CardId, SpellType};
///
/// let pot = CardData::spell(CardId::new(55144522), "Pot of Greed", SpellType::Normal);
///
/// assert!(pot.is_spell());
/// assert_eq!(pot.spell_type, Some(SpellType::Normal));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub frame: FrameType,
    pub spell_type: Option<SpellType>,
    pub trap_type: Option<TrapType>,
    pub stats: Option<MonsterStats>,
}

impl CardData {
    /// Create a monster definition.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, frame: FrameType, stats: MonsterStats) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Monster,
            frame,
            spell_type: None,
            trap_type: None,
            stats: Some(stats),
        }
    }

    /// Create a spell definition.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, spell_type: SpellType) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Spell,
            frame: FrameType::Spell,
            spell_type: Some(spell_type),
            trap_type: None,
            stats: None,
        }
    }

    /// Create a trap definition.
    #[must_use]
    pub fn trap(id: CardId, name: impl Into<String>, trap_type: TrapType) -> Self {
        Self {
            id,
            name: name.into(),
            kind: CardKind::Trap,
            frame: FrameType::Trap,
            spell_type: None,
            trap_type: Some(trap_type),
            stats: None,
        }
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        self.kind == CardKind::Monster
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.kind == CardKind::Trap
    }

    /// Monster level, or 0 for non-monsters.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.stats.map_or(0, |s| s.level)
    }

    /// Monster race, if this is a monster.
    #[must_use]
    pub fn race(&self) -> Option<Race> {
        self.stats.map(|s| s.race)
    }
}
