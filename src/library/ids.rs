//! Card passcodes.

use crate::cards::CardId;

pub const POT_OF_GREED: CardId = CardId::new(55144522);
pub const GRACEFUL_CHARITY: CardId = CardId::new(79571449);
pub const UPSTART_GOBLIN: CardId = CardId::new(70368879);
pub const CARD_OF_DEMISE: CardId = CardId::new(59750328);
pub const REINFORCEMENT_OF_THE_ARMY: CardId = CardId::new(32807846);
pub const TERRAFORMING: CardId = CardId::new(73628505);
pub const MAGICAL_STONE_EXCAVATION: CardId = CardId::new(98494543);
pub const INTO_THE_VOID: CardId = CardId::new(93946239);
pub const JAR_OF_GREED: CardId = CardId::new(83968380);
pub const MAGICAL_CITADEL_OF_ENDYMION: CardId = CardId::new(39910367);
pub const ROYAL_MAGICAL_LIBRARY: CardId = CardId::new(70791313);
pub const YAMI: CardId = CardId::new(59197169);
pub const TOON_WORLD: CardId = CardId::new(15259703);
pub const SOGEN: CardId = CardId::new(86318356);

pub const EXODIA_THE_FORBIDDEN_ONE: CardId = CardId::new(33396948);
pub const RIGHT_ARM_OF_THE_FORBIDDEN_ONE: CardId = CardId::new(70903634);
pub const LEFT_ARM_OF_THE_FORBIDDEN_ONE: CardId = CardId::new(7902349);
pub const RIGHT_LEG_OF_THE_FORBIDDEN_ONE: CardId = CardId::new(8124921);
pub const LEFT_LEG_OF_THE_FORBIDDEN_ONE: CardId = CardId::new(44519536);

/// Exodia and its four limbs.
pub const EXODIA_PIECES: [CardId; 5] = [
    EXODIA_THE_FORBIDDEN_ONE,
    RIGHT_ARM_OF_THE_FORBIDDEN_ONE,
    LEFT_ARM_OF_THE_FORBIDDEN_ONE,
    RIGHT_LEG_OF_THE_FORBIDDEN_ONE,
    LEFT_LEG_OF_THE_FORBIDDEN_ONE,
];

pub const HARPIE_LADY: CardId = CardId::new(76812113);
pub const HARPIE_LADY_1: CardId = CardId::new(91932350);
pub const HARPIE_LADY_2: CardId = CardId::new(27927359);
pub const HARPIE_LADY_3: CardId = CardId::new(54415063);

pub const SPELL_CANCELLER: CardId = CardId::new(84636823);
pub const VANITYS_FIEND: CardId = CardId::new(47084486);
pub const CYBER_DRAGON: CardId = CardId::new(70095154);
pub const TOON_MERMAID: CardId = CardId::new(65458948);

pub const CELTIC_GUARDIAN: CardId = CardId::new(91152256);
pub const GEMINI_ELF: CardId = CardId::new(69140098);
pub const SUMMONED_SKULL: CardId = CardId::new(70781052);
pub const DARK_MAGICIAN: CardId = CardId::new(46986414);
pub const GOBLIN_ATTACK_FORCE: CardId = CardId::new(78658564);
pub const HYSTERIC_FAIRY: CardId = CardId::new(21297224);
