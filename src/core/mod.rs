//! Core engine types: entities, players, actions, RNG, configuration, errors.
//!
//! Everything here is plain data with no knowledge of cards or rules.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig};
pub use action::{Action, ActionRecord};
pub use error::{AttackBlock, EngineResult, GameError, RejectReason};
