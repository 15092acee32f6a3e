//! Effect callbacks and targeting.
//!
//! - [`Effect`] / [`Condition`]: shareable callbacks over the game
//! - [`EffectContext`]: what a callback is told when it runs
//! - [`TargetRule`]: which characters a card may target

mod effect;
mod targeting;

pub use effect::{Condition, Effect, EffectContext};
pub use targeting::{Delivery, TargetRule, Targets};
