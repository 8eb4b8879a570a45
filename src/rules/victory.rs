//! Victory evaluation.
//!
//! Checks run in a fixed order and the first one satisfied decides the
//! game:
//!
//! 1. Victory-condition rules (`can_apply`, then `check_permission`).
//! 2. Life points at or below zero. The player's life is checked first.
//! 3. An empty deck when a draw is due.

use tracing::info;

use crate::core::{GameResult, GameState, Side, VictoryReason};
use crate::zones::ZoneName;

use super::registry::AdditionalRuleRegistry;
use super::rule::{RuleCategory, RuleContext};

/// Evaluates the terminal conditions against a snapshot.
#[derive(Clone, Copy, Debug)]
pub struct VictoryEvaluator<'r> {
    rules: &'r AdditionalRuleRegistry,
}

impl<'r> VictoryEvaluator<'r> {
    #[must_use]
    pub fn new(rules: &'r AdditionalRuleRegistry) -> Self {
        Self { rules }
    }

    /// The result `state` should carry. An already decided game keeps its
    /// result.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, draw_due: bool) -> GameResult {
        if state.is_terminal() {
            return state.result().clone();
        }

        let ctx = RuleContext::Victory { side: Side::Player };
        if let Some(rule) = self
            .rules
            .by_category(RuleCategory::VictoryCondition)
            .find(|rule| rule.can_apply(state, &ctx) && rule.check_permission(state, &ctx))
        {
            return GameResult::Decided {
                winner: Side::Player,
                reason: VictoryReason::SpecialVictory {
                    rule: rule.id(),
                    name: rule.name().to_string(),
                },
            };
        }

        for side in Side::ALL {
            if state.life(side) <= 0 {
                return GameResult::Decided {
                    winner: side.opponent(),
                    reason: VictoryReason::LifePointsDepleted,
                };
            }
        }

        if draw_due && state.zones().len(ZoneName::Deck) == 0 {
            return GameResult::Decided {
                winner: Side::Opponent,
                reason: VictoryReason::DeckOut,
            };
        }

        GameResult::Ongoing
    }

    /// `state` with its result updated.
    #[must_use]
    pub fn apply(&self, state: &GameState, draw_due: bool) -> GameState {
        let result = self.evaluate(state, draw_due);
        let mut next = state.clone();
        if result.is_terminal() && !state.is_terminal() {
            info!(winner = ?result.winner(), reason = ?result.reason(), "duel decided");
            next.set_result(result);
        }
        next
    }
}
