//! Additional rule and victory integration tests.
//!
//! Every rule here comes from the built-in library and is observed through
//! the engine's public operations.

use rust_duel::cards::{CardId, CounterKind, EffectCategory};
use rust_duel::core::{DuelConfig, ErrorCode, GameResult, GameState, InstanceId, Phase, Side, VictoryReason};
use rust_duel::effects::operations;
use rust_duel::engine::{advance_to, Activation, EngineContext};
use rust_duel::library::ids;
use rust_duel::rules::RuleId;
use rust_duel::stack::SequencerOutcome;
use rust_duel::zones::ZoneName;

fn context() -> EngineContext {
    EngineContext::with_library(DuelConfig::new()).unwrap()
}

fn game(ctx: &EngineContext, hand: &[CardId], deck: &[CardId]) -> GameState {
    let mut list = deck.to_vec();
    list.extend(hand.iter().rev());
    let config = DuelConfig::new().with_opening_hand(hand.len()).without_shuffle();
    let state = GameState::new(&config, ctx.cards(), &list).unwrap();
    advance_to(&state, Phase::Main)
}

fn hand_card(state: &GameState, card: CardId) -> InstanceId {
    state
        .zone(ZoneName::Hand)
        .iter()
        .find(|c| c.card_id() == card)
        .map(|c| c.instance_id)
        .unwrap_or_else(|| panic!("{} not in hand", card))
}

fn activate(ctx: &EngineContext, state: &GameState, source: InstanceId) -> GameState {
    let Activation::Ready(mut seq) = ctx
        .begin_activation(state, source, EffectCategory::Activation)
        .unwrap()
    else {
        panic!("activation of {} was refused", source);
    };
    match seq.start().unwrap() {
        SequencerOutcome::Completed { state } => state,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

/// Harpie Lady 1 is treated as "Harpie Lady" only once it is on the field.
#[test]
fn test_harpie_lady_name() {
    let ctx = context();
    let state = game(&ctx, &[ids::HARPIE_LADY_1], &[ids::CELTIC_GUARDIAN]);
    let harpie = hand_card(&state, ids::HARPIE_LADY_1);

    let in_hand = state.instance(harpie).unwrap();
    assert_eq!(ctx.rules().effective_name(&state, in_hand), "Harpie Lady 1");

    let summoned = ctx.normal_summon(&state, harpie).unwrap().state;
    let on_field = summoned.instance(harpie).unwrap();
    assert_eq!(ctx.rules().effective_name(&summoned, on_field), "Harpie Lady");
}

/// Yami raises Spellcasters, lowers Fairies and leaves others alone.
#[test]
fn test_yami_modifies_stats() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::YAMI, ids::HYSTERIC_FAIRY, ids::DARK_MAGICIAN],
        &[ids::CELTIC_GUARDIAN],
    );
    let fairy = hand_card(&state, ids::HYSTERIC_FAIRY);
    let magician = hand_card(&state, ids::DARK_MAGICIAN);
    let state = ctx.normal_summon(&state, fairy).unwrap().state;
    let state = ctx.special_summon(&state, magician).unwrap().state;

    let fairy_stats = |s: &GameState| ctx.rules().effective_stats(s, s.instance(fairy).unwrap()).unwrap();
    let magician_stats = |s: &GameState| ctx.rules().effective_stats(s, s.instance(magician).unwrap()).unwrap();
    assert_eq!(fairy_stats(&state).attack, 1800, "no field spell yet");

    let state = activate(&ctx, &state, hand_card(&state, ids::YAMI));

    assert_eq!(fairy_stats(&state).attack, 1600);
    assert_eq!(fairy_stats(&state).defense, 300);
    assert_eq!(magician_stats(&state).attack, 2700);
    assert_eq!(magician_stats(&state).defense, 2300);
}

/// Spell Canceller forbids spell activation while face-up.
#[test]
fn test_spell_canceller_lock() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::SPELL_CANCELLER, ids::POT_OF_GREED],
        &[ids::CELTIC_GUARDIAN; 3],
    );
    let pot = hand_card(&state, ids::POT_OF_GREED);
    assert!(ctx.can_activate(&state, pot, EffectCategory::Activation).unwrap().is_ok());

    let canceller = hand_card(&state, ids::SPELL_CANCELLER);
    let locked = ctx.special_summon(&state, canceller).unwrap().state;

    let verdict = ctx.can_activate(&locked, pot, EffectCategory::Activation).unwrap();
    assert_eq!(verdict.unwrap_err().code, ErrorCode::ActionProhibited);
    assert!(matches!(
        ctx.begin_activation(&locked, pot, EffectCategory::Activation).unwrap(),
        Activation::Rejected(_)
    ));
}

/// Vanity's Fiend forbids special summons while face-up.
#[test]
fn test_vanitys_fiend_lock() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::VANITYS_FIEND, ids::SUMMONED_SKULL, ids::CELTIC_GUARDIAN],
        &[ids::CELTIC_GUARDIAN],
    );
    let fiend = hand_card(&state, ids::VANITYS_FIEND);
    let state = ctx.special_summon(&state, fiend).unwrap().state;

    let skull = hand_card(&state, ids::SUMMONED_SKULL);
    let err = ctx.special_summon(&state, skull).unwrap_err();
    assert_eq!(err.code, ErrorCode::ActionProhibited);

    let guardian = hand_card(&state, ids::CELTIC_GUARDIAN);
    assert!(ctx.normal_summon(&state, guardian).is_ok(), "normal summons are unaffected");
}

/// Cyber Dragon can be special summoned from the hand only with an empty
/// monster zone.
#[test]
fn test_cyber_dragon_condition() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::CYBER_DRAGON, ids::CELTIC_GUARDIAN],
        &[ids::CELTIC_GUARDIAN],
    );
    let dragon = hand_card(&state, ids::CYBER_DRAGON);
    assert!(ctx.special_summon(&state, dragon).is_ok());

    let guardian = hand_card(&state, ids::CELTIC_GUARDIAN);
    let occupied = ctx.normal_summon(&state, guardian).unwrap().state;
    let err = ctx.special_summon(&occupied, dragon).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConditionsNotMet);
}

/// Toon Mermaid is destroyed by `settle` unless Toon World is face-up.
#[test]
fn test_toon_mermaid_upkeep() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::TOON_MERMAID, ids::TOON_WORLD],
        &[ids::CELTIC_GUARDIAN],
    );
    let mermaid = hand_card(&state, ids::TOON_MERMAID);
    let summoned = ctx.normal_summon(&state, mermaid).unwrap().state;

    let alone = ctx.settle(&summoned).unwrap();
    assert_eq!(alone.location(mermaid), Some(ZoneName::Graveyard));

    let with_world = activate(&ctx, &summoned, hand_card(&summoned, ids::TOON_WORLD));
    let kept = ctx.settle(&with_world).unwrap();
    assert_eq!(kept.location(mermaid), Some(ZoneName::MonsterZone));
    assert!(ctx.rules().self_destruct_candidates(&kept).is_empty());
}

/// Endymion loses a spell counter instead of being destroyed.
#[test]
fn test_endymion_replacement() {
    let ctx = context();
    let state = game(
        &ctx,
        &[ids::MAGICAL_CITADEL_OF_ENDYMION, ids::UPSTART_GOBLIN],
        &[ids::CELTIC_GUARDIAN; 2],
    );
    let citadel = hand_card(&state, ids::MAGICAL_CITADEL_OF_ENDYMION);
    let state = activate(&ctx, &state, citadel);
    let state = activate(&ctx, &state, hand_card(&state, ids::UPSTART_GOBLIN));
    assert_eq!(state.instance(citadel).unwrap().counter(CounterKind::Spell), 1);

    let spared = ctx.rules().destroy(&state, citadel).unwrap();
    assert_eq!(spared.state.location(citadel), Some(ZoneName::FieldZone));
    assert_eq!(spared.state.instance(citadel).unwrap().counter(CounterKind::Spell), 0);
    assert!(spared.events.is_empty());

    let destroyed = ctx.rules().destroy(&spared.state, citadel).unwrap();
    assert_eq!(destroyed.state.location(citadel), Some(ZoneName::Graveyard));
    assert_eq!(destroyed.events.len(), 1);
}

/// Destroying a card that is not on the field is refused.
#[test]
fn test_destroy_requires_field() {
    let ctx = context();
    let state = game(&ctx, &[ids::CELTIC_GUARDIAN], &[ids::CELTIC_GUARDIAN]);
    let guardian = hand_card(&state, ids::CELTIC_GUARDIAN);

    let err = ctx.rules().destroy(&state, guardian).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidSource);
}

/// All five Exodia pieces in hand win the duel.
#[test]
fn test_exodia_victory() {
    let ctx = context();
    let mut hand = ids::EXODIA_PIECES.to_vec();
    let partial = game(&ctx, &hand[..4], &[ids::CELTIC_GUARDIAN]);
    assert_eq!(ctx.evaluate_victory(&partial, false).result(), &GameResult::Ongoing);

    hand.push(ids::CELTIC_GUARDIAN);
    let state = game(&ctx, &hand, &[ids::CELTIC_GUARDIAN]);
    let decided = ctx.evaluate_victory(&state, false);

    assert_eq!(
        decided.result(),
        &GameResult::Decided {
            winner: Side::Player,
            reason: VictoryReason::SpecialVictory {
                rule: RuleId::new(ids::EXODIA_THE_FORBIDDEN_ONE.raw()),
                name: "Exodia the Forbidden One".to_string(),
            },
        }
    );
}

/// Depleted life points lose the duel.
#[test]
fn test_life_points_victory() {
    let ctx = context();
    let state = game(&ctx, &[], &[ids::CELTIC_GUARDIAN]);
    let hurt = operations::lose_life(&state, Side::Player, 8000).unwrap().state;

    let decided = ctx.evaluate_victory(&hurt, false);

    assert_eq!(decided.result().winner(), Some(Side::Opponent));
    assert_eq!(decided.result().reason(), Some(&VictoryReason::LifePointsDepleted));
}

/// A decided duel refuses further activations.
#[test]
fn test_decided_duel_is_terminal() {
    let ctx = context();
    let state = game(&ctx, &[ids::POT_OF_GREED], &[ids::CELTIC_GUARDIAN; 3]);
    let hurt = operations::lose_life(&state, Side::Player, 9000).unwrap().state;
    let decided = ctx.evaluate_victory(&hurt, false);
    assert!(decided.is_terminal());

    let pot = hand_card(&decided, ids::POT_OF_GREED);
    let verdict = ctx.can_activate(&decided, pot, EffectCategory::Activation).unwrap();
    assert_eq!(verdict.unwrap_err().code, ErrorCode::ConditionsNotMet);
}
