//! Monster effects.

use crate::actions::{ActivationTemplate, CardEffect};
use crate::cards::CounterKind;
use crate::core::{ErrorCode, RegistryError, ValidationError};
use crate::effects::steps;
use crate::engine::EngineContext;
use crate::triggers::{EventKind, GameEvent, Trigger, TriggerId};
use crate::zones::ZoneName;

use super::{face_up_on_field, ids};

/// Spell counters Royal Magical Library can hold, and the cost of its
/// ignition effect.
pub const LIBRARY_COUNTERS: u32 = 3;

pub(super) fn register(ctx: &mut EngineContext) -> Result<(), RegistryError> {
    ctx.actions_mut().register(
        CardEffect::new(ids::ROYAL_MAGICAL_LIBRARY, ActivationTemplate::Ignition)
            .with_requirement(|state, source| {
                let held = state
                    .instance(source)
                    .map_or(0, |c| c.counter(CounterKind::Spell));
                if held < LIBRARY_COUNTERS {
                    return Err(ValidationError::new(
                        ErrorCode::InsufficientCounters,
                        format!("needs {} spell counters, has {}", LIBRARY_COUNTERS, held),
                    ));
                }
                if state.zones().len(ZoneName::Deck) == 0 {
                    return Err(ValidationError::new(ErrorCode::InsufficientDeck, "the deck is empty"));
                }
                Ok(())
            })
            .with_resolution(|_, source| {
                vec![
                    steps::remove_counters(source, CounterKind::Spell, LIBRARY_COUNTERS),
                    steps::draw(1),
                ]
            }),
    )?;

    ctx.rules_mut().register_trigger(
        Trigger::new(
            TriggerId::new(ids::ROYAL_MAGICAL_LIBRARY.raw()),
            "Royal Magical Library counter",
            EventKind::SpellActivated,
            |state, event| {
                let GameEvent::SpellActivated { instance_id, .. } = event else {
                    return Vec::new();
                };
                face_up_on_field(state, ids::ROYAL_MAGICAL_LIBRARY)
                    .filter(|id| id != instance_id)
                    .map(|id| steps::add_counters(id, CounterKind::Spell, 1, Some(LIBRARY_COUNTERS)))
                    .collect()
            },
        )
        .with_card(ids::ROYAL_MAGICAL_LIBRARY),
    )
}
