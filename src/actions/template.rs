//! Activation templates.
//!
//! Each template carries the validation and the activation steps shared by
//! every card of its type, so a card only supplies its own requirement and
//! resolution.
//!
//! | Template | Phase | Activated from | Self-contained |
//! |----------|-------|----------------|----------------|
//! | `NormalSpell` | main | hand, or set | yes |
//! | `QuickPlaySpell` | main from hand; any when set | hand, or set | yes |
//! | `ContinuousSpell` | main | hand, or set | no |
//! | `FieldSpell` | main | hand, or set | no |
//! | `NormalTrap` | any | set, not this turn | yes |
//! | `Ignition` | main | face-up on the field | no |

use serde::{Deserialize, Serialize};

use crate::cards::{
    CardData, CardInstance, EffectCategory, EffectId, Placement, SpellType, TrapType,
};
use crate::core::{ErrorCode, GameState, InstanceId, Phase, ValidationError, ValidationResult};
use crate::effects::{operations, steps, AtomicStep, NotificationLevel, StepOutput};
use crate::rules::{ActionKind, AdditionalRuleRegistry};
use crate::stack::SpellSpeed;
use crate::triggers::GameEvent;
use crate::zones::ZoneName;

/// The closed set of activation templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationTemplate {
    NormalSpell,
    QuickPlaySpell,
    ContinuousSpell,
    FieldSpell,
    NormalTrap,
    Ignition,
}

/// Once-per-turn restriction on an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OncePerTurn {
    #[default]
    Unlimited,
    /// Keyed by card id: one activation per turn across all copies.
    Card,
    /// Keyed by instance and effect.
    Instance,
}

impl ActivationTemplate {
    #[must_use]
    pub const fn category(self) -> EffectCategory {
        match self {
            ActivationTemplate::Ignition => EffectCategory::Ignition,
            _ => EffectCategory::Activation,
        }
    }

    #[must_use]
    pub const fn spell_speed(self) -> SpellSpeed {
        match self {
            ActivationTemplate::QuickPlaySpell | ActivationTemplate::NormalTrap => SpellSpeed::Two,
            _ => SpellSpeed::One,
        }
    }

    /// Whether the card leaves the field once its effect has resolved.
    #[must_use]
    pub const fn is_self_contained(self) -> bool {
        matches!(
            self,
            ActivationTemplate::NormalSpell
                | ActivationTemplate::QuickPlaySpell
                | ActivationTemplate::NormalTrap
        )
    }

    /// Zone the card occupies while active. `None` for ignition effects.
    #[must_use]
    pub const fn destination(self) -> Option<ZoneName> {
        match self {
            ActivationTemplate::FieldSpell => Some(ZoneName::FieldZone),
            ActivationTemplate::Ignition => None,
            _ => Some(ZoneName::SpellTrapZone),
        }
    }

    /// Whether a card's type fits the template.
    #[must_use]
    pub fn accepts(self, data: &CardData) -> bool {
        match self {
            ActivationTemplate::NormalSpell => data.spell_type == Some(SpellType::Normal),
            ActivationTemplate::QuickPlaySpell => data.spell_type == Some(SpellType::QuickPlay),
            ActivationTemplate::ContinuousSpell => data.spell_type == Some(SpellType::Continuous),
            ActivationTemplate::FieldSpell => data.spell_type == Some(SpellType::Field),
            ActivationTemplate::NormalTrap => data.trap_type == Some(TrapType::Normal),
            ActivationTemplate::Ignition => true,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ActivationTemplate::NormalSpell => "normal spell",
            ActivationTemplate::QuickPlaySpell => "quick-play spell",
            ActivationTemplate::ContinuousSpell => "continuous spell",
            ActivationTemplate::FieldSpell => "field spell",
            ActivationTemplate::NormalTrap => "normal trap",
            ActivationTemplate::Ignition => "ignition effect",
        }
    }

    fn is_spell(self) -> bool {
        !matches!(self, ActivationTemplate::NormalTrap | ActivationTemplate::Ignition)
    }

    /// The action submitted to the action-permission rules.
    #[must_use]
    pub fn action_kind(self, effect: EffectId, instance_id: InstanceId) -> ActionKind {
        match self {
            ActivationTemplate::NormalTrap => ActionKind::ActivateTrap {
                card_id: effect.card,
                instance_id,
            },
            ActivationTemplate::Ignition => ActionKind::ActivateEffect { effect, instance_id },
            _ => ActionKind::ActivateSpell {
                card_id: effect.card,
                instance_id,
            },
        }
    }

    /// Shared validation: game state, phase, card type, location,
    /// once-per-turn and action permission, in that order.
    pub fn validate(
        self,
        rules: &AdditionalRuleRegistry,
        state: &GameState,
        source: InstanceId,
        effect: EffectId,
        once: OncePerTurn,
    ) -> ValidationResult {
        if state.is_terminal() {
            return Err(ValidationError::conditions_not_met("the duel is already decided"));
        }
        let card = state.instance(source).ok_or_else(|| {
            ValidationError::new(ErrorCode::InvalidSource, format!("{} does not exist", source))
        })?;

        self.check_phase(state, card)?;

        if card.card_id() != effect.card || !self.accepts(&card.data) {
            return Err(ValidationError::conditions_not_met(format!(
                "{} is not a {} for this effect",
                card.name(),
                self.label()
            )));
        }

        self.check_location(state, card)?;

        let used = match once {
            OncePerTurn::Unlimited => false,
            OncePerTurn::Card => state.card_used_this_turn(effect.card),
            OncePerTurn::Instance => state.effect_used_this_turn(source, effect),
        };
        if used {
            return Err(ValidationError::conditions_not_met(format!(
                "{} can only be used once per turn",
                card.name()
            )));
        }

        if !rules.is_action_permitted(state, self.action_kind(effect, source)) {
            return Err(ValidationError::new(
                ErrorCode::ActionProhibited,
                format!("{} cannot be activated right now", card.name()),
            ));
        }
        Ok(())
    }

    fn check_phase(self, state: &GameState, card: &CardInstance) -> ValidationResult {
        let any_phase = match self {
            ActivationTemplate::NormalTrap => true,
            ActivationTemplate::QuickPlaySpell => card.is_on_field() && !card.is_face_up(),
            _ => false,
        };
        if any_phase || state.phase() == Phase::Main {
            Ok(())
        } else {
            Err(ValidationError::conditions_not_met(format!(
                "{} can only be activated in the main phase, not the {} phase",
                card.name(),
                state.phase()
            )))
        }
    }

    fn check_location(self, state: &GameState, card: &CardInstance) -> ValidationResult {
        let Some(destination) = self.destination() else {
            return if card.is_on_field() && card.is_face_up() {
                Ok(())
            } else {
                Err(ValidationError::new(
                    ErrorCode::InvalidSource,
                    format!("{} must be face-up on the field", card.name()),
                ))
            };
        };

        match card.field() {
            None if card.location() == ZoneName::Hand && self.is_spell() => {
                if state.zones().has_space(destination, &state.config().capacity) {
                    Ok(())
                } else {
                    Err(ValidationError::new(
                        ErrorCode::ZoneFull,
                        format!("the {} is full", destination),
                    ))
                }
            }
            Some(field) if card.location() == destination && !field.is_face_up() => {
                let waits_a_turn = matches!(
                    self,
                    ActivationTemplate::NormalTrap | ActivationTemplate::QuickPlaySpell
                );
                if waits_a_turn && field.placed_this_turn {
                    Err(ValidationError::conditions_not_met(format!(
                        "{} cannot be activated the turn it was set",
                        card.name()
                    )))
                } else {
                    Ok(())
                }
            }
            _ => Err(ValidationError::new(
                ErrorCode::InvalidSource,
                format!(
                    "{} cannot be activated from the {}",
                    card.name(),
                    card.location()
                ),
            )),
        }
    }

    /// Activation steps: put the card into play (or flip it), announce it,
    /// then emit the activation event.
    #[must_use]
    pub fn activation_steps(
        self,
        card: &CardInstance,
        effect: EffectId,
        once: OncePerTurn,
    ) -> Vec<AtomicStep> {
        let source = card.instance_id;
        let destination = self.destination();
        let name = card.name().to_string();

        let activate = AtomicStep::new("activate", format!("Activate {}", name), move |state, _| {
            let card = state.instance(source).ok_or_else(|| {
                ValidationError::new(ErrorCode::InvalidSource, format!("{} does not exist", source))
            })?;
            let mut out = match (destination, card.is_on_field()) {
                (Some(zone), false) => operations::move_to_field(state, source, zone, Placement::FACE_UP)?,
                (_, true) if !card.is_face_up() => operations::flip_face_up(state, source)?,
                _ => StepOutput::new(state.clone()),
            };
            match once {
                OncePerTurn::Card => out.state.mark_card_used(effect.card),
                OncePerTurn::Instance => out.state.mark_effect_used(source, effect),
                OncePerTurn::Unlimited => {
                    out.state.zones_mut().update(source, |c| {
                        if let Some(field) = c.field_mut() {
                            field.mark_activated(effect);
                        }
                    });
                }
            }
            Ok(out)
        })
        .with_notification(NotificationLevel::Silent);

        let event = match self {
            ActivationTemplate::NormalTrap => GameEvent::TrapActivated {
                card_id: effect.card,
                instance_id: source,
            },
            ActivationTemplate::Ignition => GameEvent::EffectActivated {
                effect,
                instance_id: source,
            },
            _ => GameEvent::SpellActivated {
                card_id: effect.card,
                instance_id: source,
            },
        };
        let announce = AtomicStep::new("announce", format!("{} activated", name), move |state, _| {
            Ok(StepOutput::new(state.clone()).with_event(event.clone()))
        })
        .with_notification(NotificationLevel::Silent);

        vec![
            activate,
            steps::notify("notify", format!("{} is activated", name)),
            announce,
        ]
    }
}
