use crate::cards::{CardData, CardId, FrameType, MonsterStats, Race, SpellType, TrapType};

use super::ids;

fn monster(id: CardId, name: &str, frame: FrameType, level: u8, attack: i32, defense: i32, race: Race) -> CardData {
    CardData::monster(id, name, frame, MonsterStats::new(level, attack, defense, race))
}

/// Definitions for every built-in card.
#[must_use]
pub fn catalog() -> Vec<CardData> {
    use FrameType::{Effect, Normal};

    vec![
        CardData::spell(ids::POT_OF_GREED, "Pot of Greed", SpellType::Normal),
        CardData::spell(ids::GRACEFUL_CHARITY, "Graceful Charity", SpellType::Normal),
        CardData::spell(ids::UPSTART_GOBLIN, "Upstart Goblin", SpellType::Normal),
        CardData::spell(ids::CARD_OF_DEMISE, "Card of Demise", SpellType::Normal),
        CardData::spell(ids::REINFORCEMENT_OF_THE_ARMY, "Reinforcement of the Army", SpellType::Normal),
        CardData::spell(ids::TERRAFORMING, "Terraforming", SpellType::Normal),
        CardData::spell(ids::MAGICAL_STONE_EXCAVATION, "Magical Stone Excavation", SpellType::Normal),
        CardData::spell(ids::INTO_THE_VOID, "Into the Void", SpellType::Normal),
        CardData::spell(ids::MAGICAL_CITADEL_OF_ENDYMION, "Magical Citadel of Endymion", SpellType::Field),
        CardData::spell(ids::YAMI, "Yami", SpellType::Field),
        CardData::spell(ids::SOGEN, "Sogen", SpellType::Field),
        CardData::spell(ids::TOON_WORLD, "Toon World", SpellType::Continuous),
        CardData::trap(ids::JAR_OF_GREED, "Jar of Greed", TrapType::Normal),
        monster(ids::ROYAL_MAGICAL_LIBRARY, "Royal Magical Library", Effect, 4, 0, 2000, Race::Spellcaster),
        monster(ids::EXODIA_THE_FORBIDDEN_ONE, "Exodia the Forbidden One", Effect, 3, 1000, 1000, Race::Spellcaster),
        monster(ids::RIGHT_ARM_OF_THE_FORBIDDEN_ONE, "Right Arm of the Forbidden One", Normal, 1, 200, 300, Race::Spellcaster),
        monster(ids::LEFT_ARM_OF_THE_FORBIDDEN_ONE, "Left Arm of the Forbidden One", Normal, 1, 200, 300, Race::Spellcaster),
        monster(ids::RIGHT_LEG_OF_THE_FORBIDDEN_ONE, "Right Leg of the Forbidden One", Normal, 1, 200, 300, Race::Spellcaster),
        monster(ids::LEFT_LEG_OF_THE_FORBIDDEN_ONE, "Left Leg of the Forbidden One", Normal, 1, 200, 300, Race::Spellcaster),
        monster(ids::HARPIE_LADY, "Harpie Lady", Normal, 4, 1300, 1400, Race::WingedBeast),
        monster(ids::HARPIE_LADY_1, "Harpie Lady 1", Effect, 4, 1300, 1400, Race::WingedBeast),
        monster(ids::HARPIE_LADY_2, "Harpie Lady 2", Effect, 4, 1300, 1400, Race::WingedBeast),
        monster(ids::HARPIE_LADY_3, "Harpie Lady 3", Effect, 4, 1300, 1400, Race::WingedBeast),
        monster(ids::SPELL_CANCELLER, "Spell Canceller", Effect, 5, 1800, 1600, Race::Machine),
        monster(ids::VANITYS_FIEND, "Vanity's Fiend", Effect, 6, 2400, 1200, Race::Fiend),
        monster(ids::CYBER_DRAGON, "Cyber Dragon", Effect, 5, 2100, 1600, Race::Machine),
        monster(ids::TOON_MERMAID, "Toon Mermaid", Effect, 4, 1400, 1500, Race::Aqua),
        monster(ids::CELTIC_GUARDIAN, "Celtic Guardian", Normal, 4, 1400, 1200, Race::Warrior),
        monster(ids::GEMINI_ELF, "Gemini Elf", Normal, 4, 1900, 900, Race::Spellcaster),
        monster(ids::SUMMONED_SKULL, "Summoned Skull", Normal, 6, 2500, 1200, Race::Fiend),
        monster(ids::DARK_MAGICIAN, "Dark Magician", Normal, 7, 2500, 2100, Race::Spellcaster),
        monster(ids::GOBLIN_ATTACK_FORCE, "Goblin Attack Force", Effect, 4, 2300, 0, Race::Warrior),
        monster(ids::HYSTERIC_FAIRY, "Hysteric Fairy", Effect, 4, 1800, 500, Race::Fairy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;

    #[test]
    fn test_catalog_ids_unique() {
        let mut registry = CardRegistry::new();
        registry.register_all(catalog()).unwrap();
        assert_eq!(registry.len(), catalog().len());
    }

    #[test]
    fn test_exodia_pieces_catalogued() {
        let cards = catalog();
        for piece in ids::EXODIA_PIECES {
            assert!(cards.iter().any(|c| c.id == piece && c.is_monster()));
        }
    }
}
