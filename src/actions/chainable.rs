use crate::cards::{CardId, EffectCategory, EffectId};
use crate::core::{GameState, InstanceId, ValidationResult};
use crate::effects::AtomicStep;
use crate::rules::AdditionalRuleRegistry;
use crate::stack::SpellSpeed;

/// The activation protocol every card effect implements.
///
/// `can_activate` is pure: it only reads the snapshot and the rules. The two
/// step builders return steps that act on whatever snapshot the sequencer
/// hands them when they run.
pub trait ChainableAction: Send + Sync {
    /// The card species this effect belongs to.
    fn card_id(&self) -> CardId;

    fn category(&self) -> EffectCategory;

    fn spell_speed(&self) -> SpellSpeed;

    /// Identity used by the once-per-turn sets.
    fn effect_id(&self) -> EffectId {
        EffectId::new(self.card_id(), self.category())
    }

    /// Whether `source` may activate this effect in `state`.
    fn can_activate(
        &self,
        rules: &AdditionalRuleRegistry,
        state: &GameState,
        source: InstanceId,
    ) -> ValidationResult;

    /// Steps that put the card into play and announce the activation.
    fn create_activation_steps(&self, state: &GameState, source: InstanceId) -> Vec<AtomicStep>;

    /// Steps of the effect body.
    fn create_resolution_steps(&self, state: &GameState, source: InstanceId) -> Vec<AtomicStep>;
}

impl std::fmt::Debug for dyn ChainableAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainableAction")
            .field("card_id", &self.card_id())
            .field("category", &self.category())
            .finish_non_exhaustive()
    }
}
