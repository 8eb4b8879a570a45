//! Prebuilt steps over the operations in `operations`.

use crate::cards::{CounterKind, Placement};
use crate::core::{ErrorCode, InstanceId, Side, ValidationError};
use crate::zones::ZoneName;

use super::operations;
use super::selection::{CardFilter, CardSelection};
use super::step::{AtomicStep, NotificationLevel, StepOutput};

/// Draw `count` cards.
#[must_use]
pub fn draw(count: usize) -> AtomicStep {
    AtomicStep::new("draw", format!("Draw {} card(s)", count), move |state, _| {
        operations::draw(state, count)
    })
}

/// Draw until the hand holds `hand_size` cards.
#[must_use]
pub fn draw_until(hand_size: usize) -> AtomicStep {
    AtomicStep::new(
        "draw_until",
        format!("Draw until you have {} cards in hand", hand_size),
        move |state, _| operations::draw_until(state, hand_size),
    )
}

/// Interactive discard of exactly `count` cards from the hand.
#[must_use]
pub fn discard(count: usize) -> AtomicStep {
    discard_matching(count, CardFilter::Any)
}

/// Interactive discard of exactly `count` hand cards matching `filter`.
#[must_use]
pub fn discard_matching(count: usize, filter: CardFilter) -> AtomicStep {
    AtomicStep::new("discard", format!("Discard {} card(s)", count), |state, selected| {
        operations::discard(state, selected)
    })
    .with_selection(CardSelection::from_zone(ZoneName::Hand, filter, count, count))
}

/// Interactive search: add one deck card matching `filter` to the hand.
#[must_use]
pub fn search(filter: CardFilter) -> AtomicStep {
    AtomicStep::new("search", "Add 1 card from your deck to your hand", |state, selected| {
        let Some(&id) = selected.first() else {
            return Err(ValidationError::new(ErrorCode::InvalidSelection, "no card selected"));
        };
        operations::search(state, id)
    })
    .with_selection(CardSelection::from_zone(ZoneName::Deck, filter, 1, 1))
}

/// Interactive: add one card matching `filter` from `zone` to the hand.
#[must_use]
pub fn add_to_hand_from(zone: ZoneName, filter: CardFilter) -> AtomicStep {
    AtomicStep::new(
        "add_to_hand",
        format!("Add 1 card from the {} to your hand", zone),
        move |state, selected| {
            let Some(&id) = selected.first() else {
                return Err(ValidationError::new(ErrorCode::InvalidSelection, "no card selected"));
            };
            operations::add_to_hand(state, id, zone)
        },
    )
    .with_selection(CardSelection::from_zone(zone, filter, 1, 1))
}

/// Send a specific instance to the graveyard.
#[must_use]
pub fn send_to_graveyard(id: InstanceId) -> AtomicStep {
    AtomicStep::new("send_to_graveyard", "Send to the graveyard", move |state, _| {
        operations::send_to_graveyard(state, id)
    })
    .with_notification(NotificationLevel::Silent)
}

/// Move a specific instance onto the field.
#[must_use]
pub fn move_to_field(id: InstanceId, zone: ZoneName, placement: Placement) -> AtomicStep {
    AtomicStep::new(
        "move_to_field",
        format!("Place on the {}", zone),
        move |state, _| operations::move_to_field(state, id, zone, placement),
    )
}

/// Place counters on an instance.
#[must_use]
pub fn add_counters(id: InstanceId, kind: CounterKind, amount: u32, limit: Option<u32>) -> AtomicStep {
    AtomicStep::new(
        "add_counters",
        format!("Place {} {}(s)", amount, kind),
        move |state, _| operations::add_counters(state, id, kind, amount, limit),
    )
}

/// Remove counters from an instance.
#[must_use]
pub fn remove_counters(id: InstanceId, kind: CounterKind, amount: u32) -> AtomicStep {
    AtomicStep::new(
        "remove_counters",
        format!("Remove {} {}(s)", amount, kind),
        move |state, _| operations::remove_counters(state, id, kind, amount),
    )
}

/// Increase a side's life points.
#[must_use]
pub fn gain_life(side: Side, amount: u32) -> AtomicStep {
    AtomicStep::new(
        "gain_life",
        format!("{} gains {} life points", side, amount),
        move |state, _| operations::gain_life(state, side, amount),
    )
}

/// Decrease a side's life points.
#[must_use]
pub fn lose_life(side: Side, amount: u32) -> AtomicStep {
    AtomicStep::new(
        "lose_life",
        format!("{} loses {} life points", side, amount),
        move |state, _| operations::lose_life(state, side, amount),
    )
}

/// A step that changes nothing and only carries a message.
#[must_use]
pub fn notify(id: &str, message: impl Into<String>) -> AtomicStep {
    let message = message.into();
    let text = message.clone();
    AtomicStep::new(id, message, move |state, _| {
        Ok(StepOutput::new(state.clone()).with_message(text.clone()))
    })
}
