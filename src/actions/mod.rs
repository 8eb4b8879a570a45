//! The activation protocol.
//!
//! Every activatable card effect is a [`ChainableAction`]:
//!
//! 1. `can_activate` validates without mutating.
//! 2. `create_activation_steps` moves or flips the card, notifies, and
//!    emits the activation event.
//! 3. `create_resolution_steps` is the effect body. Normal spells,
//!    quick-play spells and normal traps end by going to the graveyard.
//!
//! Card effects are usually a [`CardEffect`]: one of the closed
//! [`ActivationTemplate`]s plus a requirement and a resolution closure.

mod chainable;
mod effect;
mod registry;
mod template;

pub use chainable::ChainableAction;
pub use effect::{CardEffect, Requirement, Resolution};
pub use registry::ChainableActionRegistry;
pub use template::{ActivationTemplate, OncePerTurn};
