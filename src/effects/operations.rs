//! Pure state operations.
//!
//! Every operation takes a snapshot by reference and returns a
//! `StepResult`: a new snapshot on success, or a `ValidationError` with the
//! input untouched. Card moves keep the instance id and respect the
//! on-field zone capacities.

use crate::cards::{CounterKind, Placement};
use crate::core::{ErrorCode, GameState, InstanceId, Side, ValidationError};
use crate::triggers::GameEvent;
use crate::zones::{ZoneName, ZonePosition};

use super::step::{StepOutput, StepResult};

fn missing(id: InstanceId) -> ValidationError {
    ValidationError::new(ErrorCode::InvalidSource, format!("{} does not exist", id))
}

fn require_in(state: &GameState, id: InstanceId, zone: ZoneName) -> Result<(), ValidationError> {
    match state.location(id) {
        Some(at) if at == zone => Ok(()),
        Some(at) => Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is in the {}, not the {}", id, at, zone),
        )),
        None => Err(missing(id)),
    }
}

/// Move `id` within `next`, checking capacity of the destination.
fn relocate(
    next: &mut GameState,
    id: InstanceId,
    to: ZoneName,
    placement: Placement,
) -> Result<ZoneName, ValidationError> {
    let from = next.location(id).ok_or_else(|| missing(id))?;
    if from != to && !next.zones().has_space(to, &next.config().capacity) {
        return Err(ValidationError::new(
            ErrorCode::ZoneFull,
            format!("the {} is full", to),
        ));
    }
    next.zones_mut()
        .move_to(id, to, placement, ZonePosition::Top)
        .ok_or_else(|| missing(id))
}

/// Move a card to any zone.
pub fn move_card(
    state: &GameState,
    id: InstanceId,
    to: ZoneName,
    placement: Placement,
) -> StepResult {
    let mut next = state.clone();
    let from = relocate(&mut next, id, to, placement)?;
    Ok(StepOutput::new(next).with_message(format!("{} moved from the {} to the {}", id, from, to)))
}

/// Draw `count` cards from the top of the deck.
///
/// Fails with `InsufficientDeck` if the deck holds fewer than `count`.
pub fn draw(state: &GameState, count: usize) -> StepResult {
    let available = state.zones().len(ZoneName::Deck);
    if available < count {
        return Err(ValidationError::new(
            ErrorCode::InsufficientDeck,
            format!("cannot draw {} with {} in the deck", count, available),
        ));
    }
    let mut next = state.clone();
    for _ in 0..count {
        let top = next
            .zones()
            .top(ZoneName::Deck)
            .map(|c| c.instance_id)
            .ok_or_else(|| ValidationError::new(ErrorCode::InsufficientDeck, "deck is empty"))?;
        relocate(&mut next, top, ZoneName::Hand, Placement::FACE_UP)?;
    }
    Ok(StepOutput::new(next)
        .with_message(format!("drew {} card(s)", count))
        .with_event(GameEvent::CardsDrawn { count }))
}

/// Draw until the hand holds `hand_size` cards. Drawing zero is a success.
pub fn draw_until(state: &GameState, hand_size: usize) -> StepResult {
    let needed = hand_size.saturating_sub(state.zones().len(ZoneName::Hand));
    draw(state, needed)
}

/// Send cards from the hand to the graveyard.
pub fn discard(state: &GameState, ids: &[InstanceId]) -> StepResult {
    let mut next = state.clone();
    for &id in ids {
        require_in(&next, id, ZoneName::Hand)?;
        relocate(&mut next, id, ZoneName::Graveyard, Placement::FACE_UP)?;
    }
    Ok(StepOutput::new(next).with_message(format!("discarded {} card(s)", ids.len())))
}

/// Add a card from the deck to the hand, then shuffle the deck.
pub fn search(state: &GameState, id: InstanceId) -> StepResult {
    require_in(state, id, ZoneName::Deck)?;
    let mut next = state.clone();
    relocate(&mut next, id, ZoneName::Hand, Placement::FACE_UP)?;
    next.shuffle_deck();
    Ok(StepOutput::new(next).with_message(format!("added {} from the deck to the hand", id)))
}

/// Add a card from `from` (graveyard, banished, field) to the hand.
pub fn add_to_hand(state: &GameState, id: InstanceId, from: ZoneName) -> StepResult {
    if from == ZoneName::Deck {
        return search(state, id);
    }
    require_in(state, id, from)?;
    let mut next = state.clone();
    relocate(&mut next, id, ZoneName::Hand, Placement::FACE_UP)?;
    Ok(StepOutput::new(next).with_message(format!("added {} from the {} to the hand", id, from)))
}

/// Send a card to the graveyard from wherever it is.
pub fn send_to_graveyard(state: &GameState, id: InstanceId) -> StepResult {
    move_card(state, id, ZoneName::Graveyard, Placement::FACE_UP)
}

/// Banish a card from wherever it is.
pub fn banish(state: &GameState, id: InstanceId) -> StepResult {
    move_card(state, id, ZoneName::Banished, Placement::FACE_UP)
}

/// Move a card onto an on-field zone.
pub fn move_to_field(
    state: &GameState,
    id: InstanceId,
    zone: ZoneName,
    placement: Placement,
) -> StepResult {
    if !zone.is_on_field() {
        return Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("the {} is not on the field", zone),
        ));
    }
    move_card(state, id, zone, placement)
}

/// Set a card face-down on the field, marked as placed this turn.
pub fn set_card(state: &GameState, id: InstanceId, zone: ZoneName, placement: Placement) -> StepResult {
    let mut out = move_to_field(state, id, zone, placement)?;
    out.state.zones_mut().update(id, |c| {
        if let Some(field) = c.field_mut() {
            field.placed_this_turn = true;
        }
    });
    Ok(out.with_message(format!("{} set", id)))
}

/// Turn a face-down card on the field face-up.
pub fn flip_face_up(state: &GameState, id: InstanceId) -> StepResult {
    let card = state.instance(id).ok_or_else(|| missing(id))?;
    if !card.is_on_field() {
        return Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is not on the field", id),
        ));
    }
    let mut next = state.clone();
    next.zones_mut().update(id, |c| {
        if let Some(field) = c.field_mut() {
            field.face = crate::cards::Face::FaceUp;
        }
    });
    Ok(StepOutput::new(next).with_message(format!("{} flipped face-up", id)))
}

/// Shuffle the deck.
pub fn shuffle_deck(state: &GameState) -> StepResult {
    let mut next = state.clone();
    next.shuffle_deck();
    Ok(StepOutput::new(next).with_message("deck shuffled"))
}

fn field_counter(state: &GameState, id: InstanceId, kind: CounterKind) -> Result<u32, ValidationError> {
    let card = state.instance(id).ok_or_else(|| missing(id))?;
    let field = card.field().ok_or_else(|| {
        ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is not on the field and cannot hold counters", id),
        )
    })?;
    Ok(field.counter(kind))
}

fn write_counter(state: &GameState, id: InstanceId, kind: CounterKind, count: u32) -> GameState {
    let mut next = state.clone();
    next.zones_mut().update(id, |c| {
        if let Some(field) = c.field_mut() {
            field.set_counter(kind, count);
        }
    });
    next
}

/// Place counters, clamped to `limit` if one is given.
pub fn add_counters(
    state: &GameState,
    id: InstanceId,
    kind: CounterKind,
    amount: u32,
    limit: Option<u32>,
) -> StepResult {
    let current = field_counter(state, id, kind)?;
    let raised = current.saturating_add(amount);
    let count = limit.map_or(raised, |max| raised.min(max));
    Ok(StepOutput::new(write_counter(state, id, kind, count))
        .with_message(format!("{} now has {} {}(s)", id, count, kind)))
}

/// Remove counters. Fails with `InsufficientCounters` if fewer are present.
pub fn remove_counters(state: &GameState, id: InstanceId, kind: CounterKind, amount: u32) -> StepResult {
    let current = field_counter(state, id, kind)?;
    if current < amount {
        return Err(ValidationError::new(
            ErrorCode::InsufficientCounters,
            format!("{} has {} {}(s), needs {}", id, current, kind, amount),
        ));
    }
    let count = current - amount;
    Ok(StepOutput::new(write_counter(state, id, kind, count))
        .with_message(format!("{} now has {} {}(s)", id, count, kind)))
}

/// Set the counter count directly, clamped to `limit` if one is given.
pub fn set_counters(
    state: &GameState,
    id: InstanceId,
    kind: CounterKind,
    count: u32,
    limit: Option<u32>,
) -> StepResult {
    field_counter(state, id, kind)?;
    let count = limit.map_or(count, |max| count.min(max));
    Ok(StepOutput::new(write_counter(state, id, kind, count))
        .with_message(format!("{} now has {} {}(s)", id, count, kind)))
}

/// Increase a side's life points.
pub fn gain_life(state: &GameState, side: Side, amount: u32) -> StepResult {
    let mut next = state.clone();
    *next.life_mut(side) += i64::from(amount);
    Ok(StepOutput::new(next)
        .with_message(format!("{} gained {} life points", side, amount))
        .with_event(GameEvent::LifeChanged {
            side,
            delta: i64::from(amount),
        }))
}

/// Decrease a side's life points, stopping at zero.
pub fn lose_life(state: &GameState, side: Side, amount: u32) -> StepResult {
    let mut next = state.clone();
    let before = next.life(side);
    let after = (before - i64::from(amount)).max(0);
    *next.life_mut(side) = after;
    Ok(StepOutput::new(next)
        .with_message(format!("{} lost {} life points", side, before - after))
        .with_event(GameEvent::LifeChanged {
            side,
            delta: after - before,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardId, CardRegistry, SpellType};
    use crate::core::{DuelConfig, ZoneCapacity};

    fn state_with(deck: usize, hand: usize) -> GameState {
        let mut catalog = CardRegistry::new();
        catalog
            .register(CardData::spell(CardId::new(1), "Spell", SpellType::Continuous))
            .unwrap();
        let config = DuelConfig::new()
            .with_opening_hand(hand)
            .with_capacity(ZoneCapacity {
                spell_trap: 1,
                ..ZoneCapacity::default()
            })
            .without_shuffle();
        GameState::new(&config, &catalog, &vec![CardId::new(1); deck + hand]).unwrap()
    }

    fn first_in(state: &GameState, zone: ZoneName) -> InstanceId {
        state.zone(zone).iter().next().unwrap().instance_id
    }

    #[test]
    fn test_draw() {
        let state = state_with(3, 0);
        let out = draw(&state, 2).unwrap();

        assert_eq!(out.state.zones().len(ZoneName::Hand), 2);
        assert_eq!(out.state.zones().len(ZoneName::Deck), 1);
        assert_eq!(out.events.as_slice(), &[GameEvent::CardsDrawn { count: 2 }]);
    }

    #[test]
    fn test_draw_insufficient() {
        let state = state_with(1, 0);
        let err = draw(&state, 2).unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientDeck);
        assert_eq!(state.zones().len(ZoneName::Deck), 1);
    }

    #[test]
    fn test_draw_until() {
        let state = state_with(5, 1);
        let out = draw_until(&state, 3).unwrap();
        assert_eq!(out.state.zones().len(ZoneName::Hand), 3);

        let full = draw_until(&out.state, 2).unwrap();
        assert_eq!(full.state.zones().len(ZoneName::Hand), 3);
    }

    #[test]
    fn test_discard_requires_hand() {
        let state = state_with(1, 1);
        let in_hand = first_in(&state, ZoneName::Hand);
        let in_deck = first_in(&state, ZoneName::Deck);

        let out = discard(&state, &[in_hand]).unwrap();
        assert_eq!(out.state.location(in_hand), Some(ZoneName::Graveyard));

        let err = discard(&state, &[in_deck]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSource);
    }

    #[test]
    fn test_search() {
        let state = state_with(4, 0);
        let target = first_in(&state, ZoneName::Deck);

        let out = search(&state, target).unwrap();
        assert_eq!(out.state.location(target), Some(ZoneName::Hand));
        assert_eq!(out.state.zones().len(ZoneName::Deck), 3);
        assert_ne!(out.state.rng_state(), state.rng_state());
    }

    #[test]
    fn test_zone_capacity() {
        let state = state_with(0, 2);
        let hand: Vec<_> = state.zone(ZoneName::Hand).iter().map(|c| c.instance_id).collect();

        let first = move_to_field(&state, hand[0], ZoneName::SpellTrapZone, Placement::FACE_UP).unwrap();
        let err = move_to_field(&first.state, hand[1], ZoneName::SpellTrapZone, Placement::FACE_UP)
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ZoneFull);
    }

    #[test]
    fn test_set_and_flip() {
        let state = state_with(0, 1);
        let id = first_in(&state, ZoneName::Hand);

        let set = set_card(&state, id, ZoneName::SpellTrapZone, Placement::SET).unwrap();
        let field = set.state.instance(id).unwrap().field().unwrap().clone();
        assert!(!field.is_face_up());
        assert!(field.placed_this_turn);

        let flipped = flip_face_up(&set.state, id).unwrap();
        assert!(flipped.state.instance(id).unwrap().is_face_up());
    }

    #[test]
    fn test_counters_clamp_and_remove() {
        let state = state_with(0, 1);
        let id = first_in(&state, ZoneName::Hand);
        let on_field = move_to_field(&state, id, ZoneName::SpellTrapZone, Placement::FACE_UP).unwrap().state;

        let two = set_counters(&on_field, id, CounterKind::Spell, 2, Some(3)).unwrap().state;
        let capped = add_counters(&two, id, CounterKind::Spell, 2, Some(3)).unwrap().state;
        assert_eq!(capped.instance(id).unwrap().counter(CounterKind::Spell), 3);

        let err = remove_counters(&capped, id, CounterKind::Spell, 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientCounters);

        let none = remove_counters(&capped, id, CounterKind::Spell, 3).unwrap().state;
        assert_eq!(none.instance(id).unwrap().counter(CounterKind::Spell), 0);
    }

    #[test]
    fn test_counters_need_field() {
        let state = state_with(0, 1);
        let id = first_in(&state, ZoneName::Hand);

        let err = add_counters(&state, id, CounterKind::Spell, 1, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSource);
    }

    #[test]
    fn test_life() {
        let state = state_with(0, 0);

        let gained = gain_life(&state, Side::Opponent, 1000).unwrap();
        assert_eq!(gained.state.life(Side::Opponent), 9000);

        let lost = lose_life(&state, Side::Player, 9000).unwrap();
        assert_eq!(lost.state.life(Side::Player), 0);
        assert_eq!(
            lost.events.as_slice(),
            &[GameEvent::LifeChanged {
                side: Side::Player,
                delta: -8000
            }]
        );
    }

    #[test]
    fn test_banish_and_send() {
        let state = state_with(2, 0);
        let a = first_in(&state, ZoneName::Deck);

        let banished = banish(&state, a).unwrap().state;
        assert_eq!(banished.location(a), Some(ZoneName::Banished));

        let back = add_to_hand(&banished, a, ZoneName::Banished).unwrap().state;
        let buried = send_to_graveyard(&back, a).unwrap().state;
        assert_eq!(buried.location(a), Some(ZoneName::Graveyard));
        assert!(send_to_graveyard(&buried, InstanceId(99)).is_err());
    }
}
