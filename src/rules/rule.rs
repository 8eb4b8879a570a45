//! Additional rules: continuous effects that intercept data reads and
//! permission checks.
//!
//! Every rule belongs to one `RuleCategory`. The category decides which
//! hook the engine calls once `can_apply` has returned true:
//!
//! | Category | Hook |
//! |----------|------|
//! | `NameOverride`, `StatModifier` | `apply` |
//! | `SummonCondition`, `SummonPermission`, `ActionPermission`, `VictoryCondition`, `SelfDestruction` | `check_permission` |
//! | `ActionReplacement` | `replace` |
//!
//! For `VictoryCondition` and `SelfDestruction`, `check_permission`
//! returning `true` means the condition holds (the game is won, the card
//! must be destroyed).

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardInstance, EffectId, MonsterStats};
use crate::core::{GameState, InstanceId, Side};
use crate::effects::StepResult;

/// Unique identifier for a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub u32);

impl RuleId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule({})", self.0)
    }
}

/// The closed set of rule categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    NameOverride,
    StatModifier,
    SummonCondition,
    SummonPermission,
    ActionPermission,
    VictoryCondition,
    ActionReplacement,
    SelfDestruction,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 8] = [
        RuleCategory::NameOverride,
        RuleCategory::StatModifier,
        RuleCategory::SummonCondition,
        RuleCategory::SummonPermission,
        RuleCategory::ActionPermission,
        RuleCategory::VictoryCondition,
        RuleCategory::ActionReplacement,
        RuleCategory::SelfDestruction,
    ];
}

/// How a monster is being summoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonKind {
    Normal,
    Set,
    Special,
}

/// An action submitted to the action-permission rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    ActivateSpell {
        card_id: CardId,
        instance_id: InstanceId,
    },
    ActivateTrap {
        card_id: CardId,
        instance_id: InstanceId,
    },
    ActivateEffect {
        effect: EffectId,
        instance_id: InstanceId,
    },
}

/// What a rule is being asked about.
#[derive(Clone, Copy, Debug)]
pub enum RuleContext<'a> {
    /// A card whose name, stats or survival is being read.
    Card(&'a CardInstance),
    /// A monster about to be summoned.
    Summon {
        card: &'a CardInstance,
        kind: SummonKind,
    },
    /// An action about to be taken.
    Action(ActionKind),
    /// Victory check for a side.
    Victory { side: Side },
    /// A card about to be destroyed.
    Destroy(&'a CardInstance),
}

impl<'a> RuleContext<'a> {
    /// The card the context is about, if any.
    #[must_use]
    pub fn card(&self) -> Option<&'a CardInstance> {
        match self {
            RuleContext::Card(card) | RuleContext::Destroy(card) => Some(card),
            RuleContext::Summon { card, .. } => Some(card),
            RuleContext::Action(_) | RuleContext::Victory { .. } => None,
        }
    }
}

/// A value folded through `apply`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleValue {
    Name(String),
    Stats(MonsterStats),
}

/// An independently registered continuous rule.
pub trait AdditionalRule: Send + Sync {
    fn id(&self) -> RuleId;

    fn name(&self) -> &str;

    fn category(&self) -> RuleCategory;

    /// Effects can be negated; pure game rules cannot.
    fn is_effect(&self) -> bool {
        true
    }

    /// Does the rule apply to this context right now?
    fn can_apply(&self, state: &GameState, ctx: &RuleContext<'_>) -> bool;

    /// Transform a read value.
    fn apply(&self, _state: &GameState, _ctx: &RuleContext<'_>, value: RuleValue) -> RuleValue {
        value
    }

    /// Permission or condition check.
    fn check_permission(&self, _state: &GameState, _ctx: &RuleContext<'_>) -> bool {
        true
    }

    /// Replace an action. `None` declines, letting the action proceed.
    fn replace(&self, _state: &GameState, _ctx: &RuleContext<'_>) -> Option<StepResult> {
        None
    }
}
