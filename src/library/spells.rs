//! Spell and trap effects.

use crate::actions::{ActivationTemplate, CardEffect, OncePerTurn};
use crate::cards::{CardKind, Race, SpellType};
use crate::core::{ErrorCode, GameState, InstanceId, RegistryError, Side, ValidationError, ValidationResult};
use crate::effects::{steps, CardFilter, DslCondition, DslEffect, DslStep};
use crate::engine::EngineContext;
use crate::zones::ZoneName;

use super::ids;

fn require_deck(state: &GameState, count: usize) -> ValidationResult {
    let deck = state.zones().len(ZoneName::Deck);
    if deck >= count {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::InsufficientDeck,
            format!("needs {} card(s) in the deck, has {}", count, deck),
        ))
    }
}

fn other_hand_cards(state: &GameState, source: InstanceId) -> usize {
    state
        .zone(ZoneName::Hand)
        .iter()
        .filter(|c| c.instance_id != source)
        .count()
}

fn require_in_zone(state: &GameState, zone: ZoneName, filter: &CardFilter) -> ValidationResult {
    if state.zone(zone).iter().any(|c| filter.matches(c)) {
        Ok(())
    } else {
        Err(ValidationError::conditions_not_met(format!(
            "no suitable card in the {}",
            zone
        )))
    }
}

fn warrior_up_to_four() -> CardFilter {
    CardFilter::Monster {
        race: Some(Race::Warrior),
        max_level: Some(4),
    }
}

pub(super) fn register(ctx: &mut EngineContext) -> Result<(), RegistryError> {
    let actions = ctx.actions_mut();

    actions.register(
        CardEffect::new(ids::POT_OF_GREED, ActivationTemplate::NormalSpell)
            .with_requirement(|state, _| require_deck(state, 2))
            .with_resolution(|_, _| vec![steps::draw(2)]),
    )?;

    actions.register(
        CardEffect::new(ids::GRACEFUL_CHARITY, ActivationTemplate::NormalSpell)
            .with_requirement(|state, _| require_deck(state, 3))
            .with_resolution(|_, _| vec![steps::draw(3), steps::discard(2)]),
    )?;

    actions.register(
        CardEffect::new(ids::UPSTART_GOBLIN, ActivationTemplate::NormalSpell)
            .with_requirement(|state, _| require_deck(state, 1))
            .with_resolution(|_, _| vec![steps::draw(1), steps::gain_life(Side::Opponent, 1000)]),
    )?;

    actions.register(
        CardEffect::new(ids::CARD_OF_DEMISE, ActivationTemplate::NormalSpell)
            .with_once_per_turn(OncePerTurn::Card)
            .with_requirement(|state, source| {
                require_deck(state, 3usize.saturating_sub(other_hand_cards(state, source)))
            })
            .with_resolution(|_, _| vec![steps::draw_until(3)]),
    )?;

    actions.register(
        CardEffect::new(ids::REINFORCEMENT_OF_THE_ARMY, ActivationTemplate::NormalSpell)
            .with_requirement(|state, _| require_in_zone(state, ZoneName::Deck, &warrior_up_to_four()))
            .with_resolution(|_, _| vec![steps::search(warrior_up_to_four())]),
    )?;

    actions.register(
        CardEffect::new(ids::TERRAFORMING, ActivationTemplate::NormalSpell)
            .with_requirement(|state, _| {
                require_in_zone(state, ZoneName::Deck, &CardFilter::Spell(SpellType::Field))
            })
            .with_resolution(|_, _| vec![steps::search(CardFilter::Spell(SpellType::Field))]),
    )?;

    actions.register(
        CardEffect::new(ids::MAGICAL_STONE_EXCAVATION, ActivationTemplate::NormalSpell)
            .with_requirement(|state, source| {
                let others = other_hand_cards(state, source);
                if others < 2 {
                    return Err(ValidationError::new(
                        ErrorCode::InsufficientHand,
                        format!("needs 2 other cards in hand to discard, has {}", others),
                    ));
                }
                require_in_zone(state, ZoneName::Graveyard, &CardFilter::Kind(CardKind::Spell))
            })
            .with_resolution(|_, _| {
                vec![
                    steps::discard(2),
                    steps::add_to_hand_from(ZoneName::Graveyard, CardFilter::Kind(CardKind::Spell)),
                ]
            }),
    )?;

    actions.register(
        CardEffect::new(ids::JAR_OF_GREED, ActivationTemplate::NormalTrap)
            .with_requirement(|state, _| require_deck(state, 1))
            .with_resolution(|_, _| vec![steps::draw(1)]),
    )?;

    actions.register(CardEffect::new(ids::MAGICAL_CITADEL_OF_ENDYMION, ActivationTemplate::FieldSpell))?;
    actions.register(CardEffect::new(ids::YAMI, ActivationTemplate::FieldSpell))?;
    actions.register(CardEffect::new(ids::SOGEN, ActivationTemplate::FieldSpell))?;
    actions.register(CardEffect::new(ids::TOON_WORLD, ActivationTemplate::ContinuousSpell))?;

    ctx.register_dsl_effect(&into_the_void())
}

/// Into the Void, expressed in the DSL.
#[must_use]
pub fn into_the_void() -> DslEffect {
    DslEffect {
        card_id: ids::INTO_THE_VOID,
        template: ActivationTemplate::NormalSpell,
        once_per_turn: OncePerTurn::Unlimited,
        conditions: vec![
            DslCondition::HandAtLeast {
                count: 3,
                excluding_source: true,
            },
            DslCondition::DeckAtLeast(1),
        ],
        steps: vec![DslStep::Draw(1)],
    }
}
