//! Summoning and setting.

use crate::cards::{CardInstance, Placement, SpellType};
use crate::core::{ErrorCode, GameState, InstanceId, Phase, ValidationError, ValidationResult};
use crate::effects::{operations, StepResult};
use crate::rules::SummonKind;
use crate::zones::ZoneName;

use super::context::EngineContext;

/// Highest level that can be normal summoned without tributes.
const TRIBUTE_FREE_LEVEL: u8 = 4;

fn instance_in(state: &GameState, id: InstanceId, zones: &[ZoneName]) -> Result<CardInstance, ValidationError> {
    let card = state.instance(id).ok_or_else(|| {
        ValidationError::new(ErrorCode::InvalidSource, format!("{} does not exist", id))
    })?;
    if zones.contains(&card.location()) {
        Ok(card.clone())
    } else {
        Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is in the {}", card.name(), card.location()),
        ))
    }
}

fn main_phase(state: &GameState) -> ValidationResult {
    if state.is_terminal() {
        return Err(ValidationError::conditions_not_met("the duel is already decided"));
    }
    if state.phase() != Phase::Main {
        return Err(ValidationError::conditions_not_met(format!(
            "only in the main phase, not the {} phase",
            state.phase()
        )));
    }
    Ok(())
}

fn require_monster(card: &CardInstance) -> ValidationResult {
    if card.data.is_monster() {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::InvalidSource,
            format!("{} is not a monster", card.name()),
        ))
    }
}

impl EngineContext {
    /// Normal summon a monster from the hand in attack position.
    pub fn normal_summon(&self, state: &GameState, id: InstanceId) -> StepResult {
        self.summon_from_hand(state, id, SummonKind::Normal, Placement::ATTACK)
    }

    /// Set a monster from the hand face-down in defense position.
    pub fn set_monster(&self, state: &GameState, id: InstanceId) -> StepResult {
        self.summon_from_hand(state, id, SummonKind::Set, Placement::SET_MONSTER)
    }

    fn summon_from_hand(
        &self,
        state: &GameState,
        id: InstanceId,
        kind: SummonKind,
        placement: Placement,
    ) -> StepResult {
        main_phase(state)?;
        let card = instance_in(state, id, &[ZoneName::Hand])?;
        require_monster(&card)?;
        if card.data.level() > TRIBUTE_FREE_LEVEL {
            return Err(ValidationError::conditions_not_met(format!(
                "{} is level {} and needs tributes",
                card.name(),
                card.data.level()
            )));
        }
        if state.normal_summons_remaining() == 0 {
            return Err(ValidationError::conditions_not_met(
                "no normal summon left this turn",
            ));
        }
        self.rules().check_summon(state, &card, kind)?;

        let mut out = operations::set_card(state, id, ZoneName::MonsterZone, placement)?;
        out.state.consume_normal_summon();
        let verb = if kind == SummonKind::Set { "set" } else { "normal summoned" };
        Ok(out.with_message(format!("{} {}", card.name(), verb)))
    }

    /// Special summon a monster from the hand or graveyard.
    pub fn special_summon(&self, state: &GameState, id: InstanceId) -> StepResult {
        if state.is_terminal() {
            return Err(ValidationError::conditions_not_met("the duel is already decided"));
        }
        let card = instance_in(state, id, &[ZoneName::Hand, ZoneName::Graveyard])?;
        require_monster(&card)?;
        self.rules().check_summon(state, &card, SummonKind::Special)?;

        let out = operations::move_to_field(state, id, ZoneName::MonsterZone, Placement::ATTACK)?;
        Ok(out.with_message(format!("{} special summoned", card.name())))
    }

    /// Set a spell or trap from the hand. Field spells go to the field zone.
    pub fn set_spell_trap(&self, state: &GameState, id: InstanceId) -> StepResult {
        main_phase(state)?;
        let card = instance_in(state, id, &[ZoneName::Hand])?;
        if card.data.is_monster() {
            return Err(ValidationError::new(
                ErrorCode::InvalidSource,
                format!("{} is a monster", card.name()),
            ));
        }
        let zone = if card.data.spell_type == Some(SpellType::Field) {
            ZoneName::FieldZone
        } else {
            ZoneName::SpellTrapZone
        };
        operations::set_card(state, id, zone, Placement::SET)
    }
}
