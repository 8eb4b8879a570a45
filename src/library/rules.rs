//! Continuous rules and special game rules printed on cards.
//!
//! Each rule uses its card's passcode as its `RuleId`.

use crate::cards::{CardId, CounterKind, Race};
use crate::core::{GameState, RegistryError, Side};
use crate::effects::{operations, steps, StepResult};
use crate::rules::{
    ActionKind, AdditionalRule, AdditionalRuleRegistry, RuleCategory, RuleContext, RuleId,
    RuleValue, SummonKind,
};
use crate::triggers::{EventKind, GameEvent, Trigger, TriggerId};
use crate::zones::ZoneName;

use super::{face_up_on_field, ids};

fn is_face_up_on_field(state: &GameState, card: CardId) -> bool {
    face_up_on_field(state, card).next().is_some()
}

/// Exodia the Forbidden One: all five pieces in hand win the duel.
pub struct ExodiaVictory;

impl AdditionalRule for ExodiaVictory {
    fn id(&self) -> RuleId {
        RuleId::new(ids::EXODIA_THE_FORBIDDEN_ONE.raw())
    }

    fn name(&self) -> &str {
        "Exodia the Forbidden One"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::VictoryCondition
    }

    fn is_effect(&self) -> bool {
        false
    }

    fn can_apply(&self, _state: &GameState, ctx: &RuleContext<'_>) -> bool {
        matches!(ctx, RuleContext::Victory { side: Side::Player })
    }

    fn check_permission(&self, state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        let hand = state.zone(ZoneName::Hand);
        ids::EXODIA_PIECES
            .iter()
            .all(|piece| hand.iter().any(|c| c.card_id() == *piece))
    }
}

/// Harpie Lady 1/2/3: treated as "Harpie Lady" on the field and in the
/// graveyard.
pub struct HarpieLadyName {
    card: CardId,
}

impl HarpieLadyName {
    #[must_use]
    pub fn new(card: CardId) -> Self {
        Self { card }
    }
}

impl AdditionalRule for HarpieLadyName {
    fn id(&self) -> RuleId {
        RuleId::new(self.card.raw())
    }

    fn name(&self) -> &str {
        "Harpie Lady name"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::NameOverride
    }

    fn can_apply(&self, _state: &GameState, ctx: &RuleContext<'_>) -> bool {
        ctx.card().is_some_and(|card| {
            card.card_id() == self.card
                && (card.is_on_field() || card.location() == ZoneName::Graveyard)
        })
    }

    fn apply(&self, _state: &GameState, _ctx: &RuleContext<'_>, _value: RuleValue) -> RuleValue {
        RuleValue::Name("Harpie Lady".to_string())
    }
}

/// Yami: face-up monsters gain or lose 200 ATK/DEF by race.
pub struct YamiModifier;

impl YamiModifier {
    const AMOUNT: i32 = 200;

    fn delta(race: Race) -> i32 {
        match race {
            Race::Fiend | Race::Spellcaster => Self::AMOUNT,
            Race::Fairy => -Self::AMOUNT,
            _ => 0,
        }
    }
}

impl AdditionalRule for YamiModifier {
    fn id(&self) -> RuleId {
        RuleId::new(ids::YAMI.raw())
    }

    fn name(&self) -> &str {
        "Yami"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::StatModifier
    }

    fn can_apply(&self, state: &GameState, ctx: &RuleContext<'_>) -> bool {
        let Some(card) = ctx.card() else {
            return false;
        };
        card.location() == ZoneName::MonsterZone
            && card.is_face_up()
            && card.data.race().is_some_and(|race| Self::delta(race) != 0)
            && is_face_up_on_field(state, ids::YAMI)
    }

    fn apply(&self, _state: &GameState, _ctx: &RuleContext<'_>, value: RuleValue) -> RuleValue {
        match value {
            RuleValue::Stats(mut stats) => {
                let delta = Self::delta(stats.race);
                stats.attack = (stats.attack + delta).max(0);
                stats.defense = (stats.defense + delta).max(0);
                RuleValue::Stats(stats)
            }
            other => other,
        }
    }
}

/// Spell Canceller: no spell can be activated while it is face-up.
pub struct SpellCancellerLock;

impl AdditionalRule for SpellCancellerLock {
    fn id(&self) -> RuleId {
        RuleId::new(ids::SPELL_CANCELLER.raw())
    }

    fn name(&self) -> &str {
        "Spell Canceller"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::ActionPermission
    }

    fn can_apply(&self, state: &GameState, ctx: &RuleContext<'_>) -> bool {
        matches!(ctx, RuleContext::Action(ActionKind::ActivateSpell { .. }))
            && is_face_up_on_field(state, ids::SPELL_CANCELLER)
    }

    fn check_permission(&self, _state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        false
    }
}

/// Vanity's Fiend: special summons are forbidden while it is face-up.
pub struct VanitysFiendLock;

impl AdditionalRule for VanitysFiendLock {
    fn id(&self) -> RuleId {
        RuleId::new(ids::VANITYS_FIEND.raw())
    }

    fn name(&self) -> &str {
        "Vanity's Fiend"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::SummonPermission
    }

    fn can_apply(&self, state: &GameState, ctx: &RuleContext<'_>) -> bool {
        matches!(ctx, RuleContext::Summon { kind: SummonKind::Special, .. })
            && is_face_up_on_field(state, ids::VANITYS_FIEND)
    }

    fn check_permission(&self, _state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        false
    }
}

/// Cyber Dragon: special summoned from the hand only with an empty
/// monster zone.
pub struct CyberDragonCondition;

impl AdditionalRule for CyberDragonCondition {
    fn id(&self) -> RuleId {
        RuleId::new(ids::CYBER_DRAGON.raw())
    }

    fn name(&self) -> &str {
        "Cyber Dragon"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::SummonCondition
    }

    fn is_effect(&self) -> bool {
        false
    }

    fn can_apply(&self, _state: &GameState, ctx: &RuleContext<'_>) -> bool {
        matches!(
            ctx,
            RuleContext::Summon { card, kind: SummonKind::Special }
                if card.card_id() == ids::CYBER_DRAGON && card.location() == ZoneName::Hand
        )
    }

    fn check_permission(&self, state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        state.zone(ZoneName::MonsterZone).is_empty()
    }
}

/// Toon Mermaid: destroyed when no face-up Toon World is on the field.
pub struct ToonMermaidUpkeep;

impl AdditionalRule for ToonMermaidUpkeep {
    fn id(&self) -> RuleId {
        RuleId::new(ids::TOON_MERMAID.raw())
    }

    fn name(&self) -> &str {
        "Toon Mermaid"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::SelfDestruction
    }

    fn can_apply(&self, _state: &GameState, ctx: &RuleContext<'_>) -> bool {
        ctx.card()
            .is_some_and(|card| card.card_id() == ids::TOON_MERMAID && card.is_on_field())
    }

    fn check_permission(&self, state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        !is_face_up_on_field(state, ids::TOON_WORLD)
    }
}

/// Magical Citadel of Endymion: remove a spell counter instead of being
/// destroyed.
pub struct EndymionProtection;

impl AdditionalRule for EndymionProtection {
    fn id(&self) -> RuleId {
        RuleId::new(ids::MAGICAL_CITADEL_OF_ENDYMION.raw())
    }

    fn name(&self) -> &str {
        "Magical Citadel of Endymion"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::ActionReplacement
    }

    fn can_apply(&self, _state: &GameState, ctx: &RuleContext<'_>) -> bool {
        matches!(
            ctx,
            RuleContext::Destroy(card)
                if card.card_id() == ids::MAGICAL_CITADEL_OF_ENDYMION
                    && card.counter(CounterKind::Spell) > 0
        )
    }

    fn replace(&self, state: &GameState, ctx: &RuleContext<'_>) -> Option<StepResult> {
        let card = ctx.card()?;
        Some(
            operations::remove_counters(state, card.instance_id, CounterKind::Spell, 1)
                .map(|out| out.with_message(format!("{} removed a spell counter instead", card.name()))),
        )
    }
}

pub(super) fn register(rules: &mut AdditionalRuleRegistry) -> Result<(), RegistryError> {
    rules.register(ExodiaVictory)?;
    for harpie in [ids::HARPIE_LADY_1, ids::HARPIE_LADY_2, ids::HARPIE_LADY_3] {
        rules.register(HarpieLadyName::new(harpie))?;
    }
    rules.register(YamiModifier)?;
    rules.register(SpellCancellerLock)?;
    rules.register(VanitysFiendLock)?;
    rules.register(CyberDragonCondition)?;
    rules.register(ToonMermaidUpkeep)?;
    rules.register(EndymionProtection)?;

    rules.register_trigger(
        Trigger::new(
            TriggerId::new(ids::MAGICAL_CITADEL_OF_ENDYMION.raw()),
            "Magical Citadel of Endymion counter",
            EventKind::SpellActivated,
            |state, event| {
                let GameEvent::SpellActivated { instance_id, .. } = event else {
                    return Vec::new();
                };
                face_up_on_field(state, ids::MAGICAL_CITADEL_OF_ENDYMION)
                    .filter(|id| id != instance_id)
                    .map(|id| steps::add_counters(id, CounterKind::Spell, 1, None))
                    .collect()
            },
        )
        .with_card(ids::MAGICAL_CITADEL_OF_ENDYMION),
    )
}
