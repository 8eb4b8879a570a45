//! Phase and turn progression.

use tracing::debug;

use crate::core::{GameState, Phase, ValidationError};
use crate::effects::operations;
use crate::zones::ZoneName;

use super::context::EngineContext;

/// Move to the next phase. Leaving the end phase starts a new turn, which
/// clears every turn-scoped flag.
///
/// A decided game does not advance.
#[must_use]
pub fn advance_phase(state: &GameState) -> GameState {
    let mut next = state.clone();
    if state.is_terminal() {
        return next;
    }
    let phase = state.phase();
    if phase.ends_turn() {
        next.begin_turn();
        debug!(turn = next.turn(), "turn started");
    }
    next.set_phase(phase.next());
    next
}

/// Advance until `phase` is reached. Passing the current phase is a no-op.
#[must_use]
pub fn advance_to(state: &GameState, phase: Phase) -> GameState {
    let mut next = state.clone();
    // The cycle has four phases, so four advances always reach `phase`.
    for _ in 0..4 {
        if next.phase() == phase || next.is_terminal() {
            break;
        }
        next = advance_phase(&next);
    }
    next
}

impl EngineContext {
    /// Perform the turn draw.
    ///
    /// With an empty deck the draw cannot happen and the game is lost by
    /// deck-out.
    pub fn draw_phase_draw(&self, state: &GameState) -> Result<GameState, ValidationError> {
        if state.is_terminal() {
            return Err(ValidationError::conditions_not_met("the duel is already decided"));
        }
        if state.phase() != Phase::Draw {
            return Err(ValidationError::conditions_not_met(format!(
                "the turn draw happens in the draw phase, not the {} phase",
                state.phase()
            )));
        }
        if state.zones().len(ZoneName::Deck) == 0 {
            return Ok(self.evaluate_victory(state, true));
        }
        let drawn = operations::draw(state, 1)?;
        Ok(self.evaluate_victory(&drawn.state, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardId, CardRegistry, SpellType};
    use crate::core::{DuelConfig, Side, VictoryReason};

    fn state(deck: usize) -> GameState {
        let mut catalog = CardRegistry::new();
        catalog
            .register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal))
            .unwrap();
        let config = DuelConfig::new().with_opening_hand(0).without_shuffle();
        GameState::new(&config, &catalog, &vec![CardId::new(1); deck]).unwrap()
    }

    #[test]
    fn test_phase_cycle() {
        let start = state(2);
        assert_eq!(start.phase(), Phase::Draw);

        let end = advance_to(&start, Phase::End);
        assert_eq!(end.turn(), 1);

        let next = advance_phase(&end);
        assert_eq!(next.phase(), Phase::Draw);
        assert_eq!(next.turn(), 2);
    }

    #[test]
    fn test_turn_draw() {
        let ctx = EngineContext::new(DuelConfig::new());
        let drawn = ctx.draw_phase_draw(&state(2)).unwrap();
        assert_eq!(drawn.zones().len(ZoneName::Hand), 1);

        let main = advance_to(&drawn, Phase::Main);
        assert!(ctx.draw_phase_draw(&main).is_err());
    }

    #[test]
    fn test_deck_out() {
        let ctx = EngineContext::new(DuelConfig::new());
        let lost = ctx.draw_phase_draw(&state(0)).unwrap();
        assert_eq!(lost.result().winner(), Some(Side::Opponent));
        assert_eq!(lost.result().reason(), Some(&VictoryReason::DeckOut));
        assert_eq!(advance_phase(&lost), lost);
    }
}
