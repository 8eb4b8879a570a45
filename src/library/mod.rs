//! Built-in card library.
//!
//! [`register_all`] fills an [`EngineContext`] with the catalog, the
//! chainable actions, the additional rules and their triggers. Card ids are
//! the printed passcodes, listed in [`ids`].

mod catalog;
pub mod ids;
mod monsters;
pub mod rules;
mod spells;

pub use catalog::catalog;
pub use monsters::LIBRARY_COUNTERS;
pub use spells::into_the_void;

use crate::cards::CardId;
use crate::core::{EngineError, GameState, InstanceId};
use crate::engine::EngineContext;

/// Instances of `card` face-up on the field.
fn face_up_on_field(state: &GameState, card: CardId) -> impl Iterator<Item = InstanceId> + '_ {
    state
        .zones()
        .on_field()
        .filter(move |c| c.card_id() == card && c.is_face_up())
        .map(|c| c.instance_id)
}

/// Register every built-in card into `ctx`.
pub fn register_all(ctx: &mut EngineContext) -> Result<(), EngineError> {
    ctx.cards_mut().register_all(catalog())?;
    spells::register(ctx)?;
    monsters::register(ctx)?;
    rules::register(ctx.rules_mut())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::EffectCategory;
    use crate::core::DuelConfig;

    #[test]
    fn test_register_all() {
        let ctx = EngineContext::with_library(DuelConfig::new()).unwrap();
        assert!(ctx.cards().contains(ids::POT_OF_GREED));
        assert!(ctx.actions().contains(ids::INTO_THE_VOID, EffectCategory::Activation));
        assert!(ctx.actions().contains(ids::ROYAL_MAGICAL_LIBRARY, EffectCategory::Ignition));
        assert_eq!(ctx.rules().len(), 10);
        assert_eq!(ctx.rules().triggers().len(), 2);
    }

    #[test]
    fn test_register_twice_is_fatal() {
        let mut ctx = EngineContext::with_library(DuelConfig::new()).unwrap();
        assert!(register_all(&mut ctx).is_err());
    }
}
