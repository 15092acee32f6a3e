//! Engine errors.
//!
//! Two families share one enum:
//! - **Rejections**: an action was illegal. Nothing was mutated and play
//!   can continue.
//! - **Fatal errors**: an invariant broke or a card callback failed. The
//!   game that raised one should be discarded.

use thiserror::Error;

use super::config::ConfigError;
use super::entity::EntityId;
use crate::cards::CardId;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, GameError>;

/// Why a character may not attack right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackBlock {
    /// The character has no attack.
    NoAttack,
    /// The character is frozen.
    Frozen,
    /// The character has used all of its attacks this turn.
    AlreadyAttacked,
    /// The minion arrived this turn and lacks charge.
    Exhausted,
    /// The character is dying or gone.
    Removed,
}

impl std::fmt::Display for AttackBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            AttackBlock::NoAttack => "has no attack",
            AttackBlock::Frozen => "is frozen",
            AttackBlock::AlreadyAttacked => "already attacked",
            AttackBlock::Exhausted => "is exhausted",
            AttackBlock::Removed => "is no longer in play",
        };
        f.write_str(text)
    }
}

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("the game is over")]
    GameOver,
    #[error("action not allowed in this phase")]
    WrongPhase,
    #[error("not this player's turn")]
    NotYourTurn,
    #[error("no card at hand index {0}")]
    NoSuchCard(usize),
    #[error("costs {cost} mana, {available} available")]
    NotEnoughMana { cost: i32, available: i32 },
    #[error("battlefield is full")]
    BoardFull,
    #[error("too many secrets in play")]
    TooManySecrets,
    #[error("that secret is already in play")]
    DuplicateSecret,
    #[error("illegal target")]
    InvalidTarget,
    #[error("a target is required")]
    TargetRequired,
    #[error("no legal target exists")]
    NoLegalTarget,
    #[error("not a character this player controls")]
    NotAnAttacker,
    #[error("attacker {0}")]
    CannotAttack(AttackBlock),
    #[error("hero power already used this turn")]
    HeroPowerUsed,
    #[error("no hero power")]
    NoHeroPower,
    #[error("card cannot be played")]
    NotPlayable,
}

/// Engine error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Illegal action; state unchanged.
    #[error("action rejected: {0}")]
    Rejected(#[from] RejectReason),

    /// The game could not be built from its configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A card id missing from the registry.
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    /// An id that was never allocated in this game.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    /// A character queued for resolution is not attached to any player.
    #[error("{0} is not attached to a player")]
    Detached(EntityId),

    /// A card callback failed.
    #[error("effect of {origin:?} failed: {message}")]
    Effect {
        origin: Option<EntityId>,
        message: String,
    },

    /// Event dispatch nested deeper than the configured limit.
    #[error("event dispatch nested {depth} deep")]
    TriggerDepth { depth: u32 },

    /// An internal consistency check failed.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
}

impl GameError {
    /// Build a callback failure.
    pub fn effect(origin: Option<EntityId>, message: impl Into<String>) -> Self {
        GameError::Effect {
            origin,
            message: message.into(),
        }
    }

    /// Check whether this error poisons the game.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::Rejected(_))
    }

    /// The rejection reason, if this is a rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            GameError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}
