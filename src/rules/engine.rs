//! Rule queries.
//!
//! These are the read paths the rest of the engine goes through instead of
//! reading card data directly. Each query walks the rules of one category,
//! keeps those whose `can_apply` holds, and folds their hook.

use tracing::debug;

use crate::cards::{CardInstance, MonsterStats};
use crate::core::{ErrorCode, GameState, InstanceId, ValidationError, ValidationResult};
use crate::effects::{operations, StepOutput, StepResult};
use crate::triggers::GameEvent;

use super::registry::AdditionalRuleRegistry;
use super::rule::{ActionKind, RuleCategory, RuleContext, RuleValue, SummonKind};

impl AdditionalRuleRegistry {
    /// The name a card is treated as having.
    #[must_use]
    pub fn effective_name(&self, state: &GameState, card: &CardInstance) -> String {
        let ctx = RuleContext::Card(card);
        let folded = self
            .by_category(RuleCategory::NameOverride)
            .filter(|rule| rule.can_apply(state, &ctx))
            .fold(RuleValue::Name(card.name().to_string()), |value, rule| {
                rule.apply(state, &ctx, value)
            });
        match folded {
            RuleValue::Name(name) => name,
            RuleValue::Stats(_) => card.name().to_string(),
        }
    }

    /// Monster stats after every applicable modifier. `None` for non-monsters.
    #[must_use]
    pub fn effective_stats(&self, state: &GameState, card: &CardInstance) -> Option<MonsterStats> {
        let base = card.data.stats?;
        let ctx = RuleContext::Card(card);
        let folded = self
            .by_category(RuleCategory::StatModifier)
            .filter(|rule| rule.can_apply(state, &ctx))
            .fold(RuleValue::Stats(base), |value, rule| rule.apply(state, &ctx, value));
        match folded {
            RuleValue::Stats(stats) => Some(stats),
            RuleValue::Name(_) => Some(base),
        }
    }

    /// Whether every applicable action-permission rule allows `action`.
    #[must_use]
    pub fn is_action_permitted(&self, state: &GameState, action: ActionKind) -> bool {
        let ctx = RuleContext::Action(action);
        self.by_category(RuleCategory::ActionPermission)
            .filter(|rule| rule.can_apply(state, &ctx))
            .all(|rule| {
                let allowed = rule.check_permission(state, &ctx);
                if !allowed {
                    debug!(rule = rule.name(), ?action, "action forbidden");
                }
                allowed
            })
    }

    /// Check summon conditions and summon permissions for `card`.
    ///
    /// A failed summon condition is `ConditionsNotMet`; a refused
    /// permission is `ActionProhibited`.
    pub fn check_summon(&self, state: &GameState, card: &CardInstance, kind: SummonKind) -> ValidationResult {
        let ctx = RuleContext::Summon { card, kind };
        if let Some(rule) = self
            .by_category(RuleCategory::SummonCondition)
            .filter(|rule| rule.can_apply(state, &ctx))
            .find(|rule| !rule.check_permission(state, &ctx))
        {
            return Err(ValidationError::conditions_not_met(format!(
                "{} cannot be summoned this way ({})",
                card.name(),
                rule.name()
            )));
        }
        if let Some(rule) = self
            .by_category(RuleCategory::SummonPermission)
            .filter(|rule| rule.can_apply(state, &ctx))
            .find(|rule| !rule.check_permission(state, &ctx))
        {
            return Err(ValidationError::new(
                ErrorCode::ActionProhibited,
                format!("{} forbids summoning {}", rule.name(), card.name()),
            ));
        }
        Ok(())
    }

    /// Destroy a card on the field.
    ///
    /// Action-replacement rules are consulted first; the first one that
    /// returns a result replaces the destruction. Otherwise the card goes to
    /// the graveyard and `CardDestroyed` is emitted.
    pub fn destroy(&self, state: &GameState, id: InstanceId) -> StepResult {
        let card = state.instance(id).ok_or_else(|| {
            ValidationError::new(ErrorCode::InvalidSource, format!("{} does not exist", id))
        })?;
        if !card.is_on_field() {
            return Err(ValidationError::new(
                ErrorCode::InvalidSource,
                format!("{} is not on the field", id),
            ));
        }

        let ctx = RuleContext::Destroy(card);
        for rule in self
            .by_category(RuleCategory::ActionReplacement)
            .filter(|rule| rule.can_apply(state, &ctx))
        {
            if let Some(result) = rule.replace(state, &ctx) {
                debug!(rule = rule.name(), %id, "destruction replaced");
                return result;
            }
        }

        let card_id = card.card_id();
        let out = operations::send_to_graveyard(state, id)?;
        Ok(out
            .with_message(format!("{} was destroyed", id))
            .with_event(GameEvent::CardDestroyed {
                card_id,
                instance_id: id,
            }))
    }

    /// On-field cards a self-destruction rule says must be destroyed.
    #[must_use]
    pub fn self_destruct_candidates(&self, state: &GameState) -> Vec<InstanceId> {
        state
            .zones()
            .on_field()
            .filter(|card| {
                let ctx = RuleContext::Card(card);
                self.by_category(RuleCategory::SelfDestruction)
                    .any(|rule| rule.can_apply(state, &ctx) && rule.check_permission(state, &ctx))
            })
            .map(|card| card.instance_id)
            .collect()
    }

    /// Destroy every self-destruction candidate, in turn.
    pub fn apply_self_destruction(&self, state: &GameState) -> StepResult {
        let mut out = StepOutput::new(state.clone());
        for id in self.self_destruct_candidates(state) {
            let step = self.destroy(&out.state, id)?;
            out.state = step.state;
            out.events.extend(step.events);
        }
        Ok(out)
    }
}
