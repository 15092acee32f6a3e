//! # rust-duel
//!
//! A two-player collectible card game engine: heroes, minions, weapons,
//! secrets and hero powers, with card behaviour supplied as data.
//!
//! ## Design Principles
//!
//! 1. **Cards Are Data**: the engine never knows what a card does. Cards
//!    carry closures that the engine calls at fixed points (battlecry,
//!    deathrattle, triggered abilities, auras).
//!
//! 2. **Everything Is An Event**: effects react to game events through
//!    per-entity hubs. Firing walks a snapshot of the listeners, so
//!    callbacks may bind, unbind and fire freely.
//!
//! 3. **Deaths Are Deferred**: damage only marks characters. Removal and
//!    deathrattles run when the deferred queue drains after each action.
//!
//! 4. **Copies Are Cheap And Independent**: entities live in an arena
//!    addressed by stable ids, so `Game::copy` is a clone whose references
//!    already point into the new game.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, actions, errors
//! - `zones`: battlefield and deck
//! - `cards`: card definitions, behaviour specs, registry
//! - `effects`: effect callbacks and target rules
//! - `triggers`: events and event hubs
//! - `entities`: characters, weapons, secrets, player state
//! - `stack`: the deferred-resolution queue
//! - `rules`: phases, results, action legality
//! - `game`: the game itself
//! - `agents`: decision makers
//! - `games`: card sets

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod triggers;
pub mod entities;
pub mod stack;
pub mod rules;
pub mod game;
pub mod agents;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AttackBlock, ConfigError, EngineResult, EntityId, GameConfig,
    GameError, GameRng, GameRngState, PlayerId, PlayerMap, RejectReason,
};

pub use crate::zones::{Battlefield, Deck, ZonePosition};

pub use crate::cards::{
    CardBehavior, CardDefinition, CardId, CardInstance, CardRegistry, CardType, MinionSpec,
    SecretSpec, Targeted, WeaponSpec,
};

pub use crate::effects::{Condition, Effect, EffectContext, TargetRule};

pub use crate::triggers::{Binding, Emitter, EventHub, EventKind, GameEvent, ListenerId};

pub use crate::entities::{Character, PlayerState, Secret, Weapon};

pub use crate::stack::{DeferredEntry, ResolutionStatus};

pub use crate::rules::{GameResult, Phase};

pub use crate::game::{CloneMap, Game, PlayerSetup};

pub use crate::agents::{Agent, DoNothingAgent, PredictableAgent, RandomAgent, ScriptedAgent};
