//! Sequencer integration tests.
//!
//! Covers trigger splicing, fail-closed steps, cancellation and the spell
//! counter triggers of the built-in library.

use rust_duel::cards::{CardData, CardId, CardRegistry, CounterKind, EffectCategory, SpellType};
use rust_duel::core::{DuelConfig, ErrorCode, GameState, InstanceId, Phase};
use rust_duel::effects::{operations, steps, AtomicStep, CardFilter, CardSelection, NotificationLevel, StepOutput};
use rust_duel::engine::{advance_to, Activation, EngineContext};
use rust_duel::library::{ids, LIBRARY_COUNTERS};
use rust_duel::stack::{Sequencer, SequencerOutcome, SequencerState};
use rust_duel::triggers::{EventKind, GameEvent, NoTriggers, Trigger, TriggerId, TriggerRegistry};
use rust_duel::zones::ZoneName;

const SPELL: CardId = CardId::new(10);

fn plain_state(deck: usize) -> GameState {
    let mut catalog = CardRegistry::new();
    catalog
        .register(CardData::spell(SPELL, "Plain Spell", SpellType::Normal))
        .unwrap();
    let config = DuelConfig::new().with_opening_hand(1).without_shuffle();
    GameState::new(&config, &catalog, &vec![SPELL; deck]).unwrap()
}

fn marker(id: &'static str) -> AtomicStep {
    AtomicStep::new(id, id, move |state, _| Ok(StepOutput::new(state.clone()).with_message(id)))
}

fn announce() -> AtomicStep {
    AtomicStep::new("announce", "announce", |state, _| {
        let instance_id = state.zone(ZoneName::Hand)[0].instance_id;
        Ok(StepOutput::new(state.clone())
            .with_message("announce")
            .with_event(GameEvent::SpellActivated { card_id: SPELL, instance_id }))
    })
}

/// Steps contributed by a trigger run right after the emitting step and
/// before the originally scheduled later steps.
#[test]
fn test_triggered_step_is_spliced() {
    let mut triggers = TriggerRegistry::new();
    triggers
        .register(Trigger::new(
            TriggerId::new(1),
            "responder",
            EventKind::SpellActivated,
            |_, _| vec![marker("triggered")],
        ))
        .unwrap();

    let steps = vec![marker("first"), announce(), marker("last")];
    let mut seq = Sequencer::new(plain_state(3), steps, &triggers);
    let outcome = seq.start().unwrap();

    assert!(matches!(outcome, SequencerOutcome::Completed { .. }));
    assert_eq!(seq.messages(), ["first", "announce", "triggered", "last"]);
    assert_eq!(seq.steps().len(), 4);
    assert_eq!(seq.events().len(), 1);
    assert_eq!(*seq.status(), SequencerState::Complete);
}

/// Without a listening trigger nothing is spliced.
#[test]
fn test_no_triggers() {
    let steps = vec![announce(), marker("last")];
    let mut seq = Sequencer::new(plain_state(3), steps, &NoTriggers);
    seq.start().unwrap();

    assert_eq!(seq.messages(), ["announce", "last"]);
}

/// A failing step ends the run without rolling back earlier steps.
#[test]
fn test_failure_keeps_earlier_steps() {
    let initial = plain_state(3);
    let steps = vec![steps::draw(1), steps::draw(5), steps::draw(1)];
    let mut seq = Sequencer::new(initial.clone(), steps, &NoTriggers);

    let SequencerOutcome::Failed { state, step_id, error } = seq.start().unwrap() else {
        panic!("the second draw should fail");
    };

    assert_eq!(step_id, "draw");
    assert_eq!(error.code, ErrorCode::InsufficientDeck);
    assert_eq!(state.zones().len(ZoneName::Hand), 2, "the first draw stays applied");
    assert_eq!(state.zones().len(ZoneName::Deck), 1);
    assert_eq!(seq.initial_state(), &initial);
    assert_eq!(initial.zones().len(ZoneName::Hand), 1, "the input snapshot is untouched");
    assert!(matches!(seq.status(), SequencerState::Aborted(_)));
}

/// An invalid selection is rejected and the same request stays pending.
#[test]
fn test_invalid_selection_is_rejected() {
    let state = plain_state(3);
    let mut seq = Sequencer::new(state, vec![steps::discard(1)], &NoTriggers);
    let SequencerOutcome::AwaitingSelection(request) = seq.start().unwrap() else {
        panic!("expected a selection");
    };

    let outsider = InstanceId(99);
    let SequencerOutcome::Rejected { error, request: pending } = seq.provide_selection(&[outsider]).unwrap() else {
        panic!("expected a rejection");
    };
    assert_eq!(error.code, ErrorCode::InvalidSelection);
    assert_eq!(pending, request);

    let SequencerOutcome::Completed { state } = seq.provide_selection(&request.candidates[..1]).unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(state.zones().len(ZoneName::Graveyard), 1);
}

/// A selection that cannot be satisfied fails the step.
#[test]
fn test_unsatisfiable_selection_fails() {
    let state = plain_state(3);
    let mut seq = Sequencer::new(state, vec![steps::discard(2)], &NoTriggers);

    let SequencerOutcome::Failed { error, .. } = seq.start().unwrap() else {
        panic!("one card in hand cannot cover a discard of two");
    };
    assert_eq!(error.code, ErrorCode::InvalidSelection);
}

/// An interactive step without a selection still waits, and only accepts
/// an empty answer.
#[test]
fn test_interactive_step_waits_for_confirmation() {
    let confirm = marker("confirm").with_notification(NotificationLevel::Interactive);
    let mut seq = Sequencer::new(plain_state(3), vec![confirm, marker("after")], &NoTriggers);

    let SequencerOutcome::AwaitingSelection(request) = seq.start().unwrap() else {
        panic!("expected the run to wait");
    };
    assert_eq!(request.step_id, "confirm");
    assert!(request.candidates.is_empty());
    assert_eq!((request.min, request.max), (0, 0));
    assert!(seq.messages().is_empty(), "the step has not run yet");

    let hand = seq.state().zone(ZoneName::Hand)[0].instance_id;
    let SequencerOutcome::Rejected { error, .. } = seq.provide_selection(&[hand]).unwrap() else {
        panic!("cards are not accepted");
    };
    assert_eq!(error.code, ErrorCode::InvalidSelection);

    assert!(matches!(seq.provide_selection(&[]).unwrap(), SequencerOutcome::Completed { .. }));
    assert_eq!(seq.messages(), ["confirm", "after"]);
}

/// Cancelling a cancelable step reports the pre-activation snapshot.
#[test]
fn test_cancel_returns_initial_snapshot() {
    let initial = plain_state(3);
    let choose = AtomicStep::new("choose", "Choose a card", |state, selected| {
        operations::discard(state, selected)
    })
    .with_selection(CardSelection::from_zone(ZoneName::Hand, CardFilter::Any, 1, 1).cancelable());
    let mut seq = Sequencer::new(initial.clone(), vec![steps::draw(1), choose], &NoTriggers);

    assert!(matches!(seq.start().unwrap(), SequencerOutcome::AwaitingSelection(_)));
    assert_eq!(seq.state().zones().len(ZoneName::Hand), 2);

    let SequencerOutcome::Cancelled { state } = seq.cancel().unwrap() else {
        panic!("expected cancellation");
    };
    assert_eq!(state, initial);
    assert!(seq.provide_selection(&[]).is_err(), "the run is over");
}

/// Non-cancelable steps refuse cancellation and keep waiting.
#[test]
fn test_cancel_refused() {
    let mut seq = Sequencer::new(plain_state(3), vec![steps::discard(1)], &NoTriggers);
    seq.start().unwrap();

    let SequencerOutcome::Rejected { error, .. } = seq.cancel().unwrap() else {
        panic!("expected a refusal");
    };
    assert_eq!(error.code, ErrorCode::NotCancelable);
    assert!(matches!(seq.status(), SequencerState::AwaitingSelection { .. }));
}

/// Calls out of order are integration errors.
#[test]
fn test_out_of_order_calls() {
    let mut seq = Sequencer::new(plain_state(3), vec![steps::draw(1)], &NoTriggers);
    assert!(seq.provide_selection(&[]).is_err());
    assert!(seq.cancel().is_err());

    seq.start().unwrap();
    assert!(seq.start().is_err());
}

fn library_game(ctx: &EngineContext, hand: &[CardId], deck: &[CardId]) -> GameState {
    let mut list = deck.to_vec();
    list.extend(hand.iter().rev());
    let config = DuelConfig::new().with_opening_hand(hand.len()).without_shuffle();
    let state = GameState::new(&config, ctx.cards(), &list).unwrap();
    advance_to(&state, Phase::Main)
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

fn hand_card(state: &GameState, card: CardId) -> InstanceId {
    state
        .zone(ZoneName::Hand)
        .iter()
        .find(|c| c.card_id() == card)
        .map(|c| c.instance_id)
        .unwrap()
}

/// Every spell activation puts a counter on a face-up Royal Magical
/// Library, up to its limit.
#[test]
fn test_library_collects_counters() {
    let ctx = EngineContext::with_library(DuelConfig::new()).unwrap();
    let state = library_game(
        &ctx,
        &[
            ids::ROYAL_MAGICAL_LIBRARY,
            ids::UPSTART_GOBLIN,
            ids::UPSTART_GOBLIN,
            ids::UPSTART_GOBLIN,
            ids::UPSTART_GOBLIN,
        ],
        &[ids::CELTIC_GUARDIAN; 6],
    );
    let library = hand_card(&state, ids::ROYAL_MAGICAL_LIBRARY);
    let mut state = ctx.normal_summon(&state, library).unwrap().state;

    for expected in 1..=4 {
        let goblin = hand_card(&state, ids::UPSTART_GOBLIN);
        state = activate(&ctx, &state, goblin);
        let held = state.instance(library).unwrap().counter(CounterKind::Spell);
        assert_eq!(held, expected.min(LIBRARY_COUNTERS), "after {} activations", expected);
    }
}

/// Endymion counts other spells' activations but not its own.
#[test]
fn test_endymion_collects_counters() {
    let ctx = EngineContext::with_library(DuelConfig::new()).unwrap();
    let state = library_game(
        &ctx,
        &[ids::MAGICAL_CITADEL_OF_ENDYMION, ids::POT_OF_GREED],
        &[ids::CELTIC_GUARDIAN; 3],
    );
    let citadel = hand_card(&state, ids::MAGICAL_CITADEL_OF_ENDYMION);

    let state = activate(&ctx, &state, citadel);
    assert_eq!(state.instance(citadel).unwrap().counter(CounterKind::Spell), 0);

    let pot = hand_card(&state, ids::POT_OF_GREED);
    let state = activate(&ctx, &state, pot);
    assert_eq!(state.instance(citadel).unwrap().counter(CounterKind::Spell), 1);
}
