//! Additional-rule engine.
//!
//! Continuous effects and special game rules are registered as
//! [`AdditionalRule`]s. The engine never knows about individual cards;
//! it asks the registry instead:
//!
//! - data reads: [`AdditionalRuleRegistry::effective_name`],
//!   [`AdditionalRuleRegistry::effective_stats`]
//! - permission checks: [`AdditionalRuleRegistry::is_action_permitted`],
//!   [`AdditionalRuleRegistry::check_summon`]
//! - replacements: [`AdditionalRuleRegistry::destroy`]
//! - terminal conditions: [`VictoryEvaluator`]

mod engine;
mod registry;
mod rule;
mod victory;

pub use registry::AdditionalRuleRegistry;
pub use rule::{
    ActionKind, AdditionalRule, RuleCategory, RuleContext, RuleId, RuleValue, SummonKind,
};
pub use victory::VictoryEvaluator;
