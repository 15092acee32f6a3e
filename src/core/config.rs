//! Game configuration.
//!
//! Every rule constant the engine consults lives in `GameConfig`. A game
//! is built from a config plus a card registry and two decks; the config
//! never changes after construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;

/// Rule constants for a duel.
///
/// ```
/// use rust_duel::core::GameConfig;
///
/// let config = GameConfig::default().with_seed(7).with_max_board_size(5);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_board_size, 5);
/// assert_eq!(config.max_hand_size, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards a hand can hold; further draws are burned.
    pub max_hand_size: usize,

    /// Minions a battlefield can hold.
    pub max_board_size: usize,

    /// Cap on mana crystals.
    pub max_mana: i32,

    /// Secrets a player can have in play at once.
    pub max_secrets: usize,

    /// Starting (and maximum) hero health.
    pub hero_health: i32,

    /// Opening hand of the player who goes first.
    pub first_hand_size: usize,

    /// Opening hand of the player who goes second.
    pub second_hand_size: usize,

    /// Attacks per turn for an ordinary character.
    pub max_attacks: u32,

    /// Attacks per turn for a windfury character.
    pub windfury_attacks: u32,

    /// Deepest allowed nesting of event dispatch.
    pub max_trigger_depth: u32,

    /// Rejected agent actions tolerated in one turn before it is ended.
    pub max_rejections_per_turn: u32,

    /// Seed for the game's random source.
    pub seed: u64,

    /// Shuffle decks before the opening draw. Off means decks are drawn
    /// in the order they were given.
    pub shuffle_decks: bool,

    /// Card handed to the second player after the mulligan.
    pub coin_card: Option<CardId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 10,
            max_board_size: 7,
            max_mana: 10,
            max_secrets: 5,
            hero_health: 30,
            first_hand_size: 3,
            second_hand_size: 4,
            max_attacks: 1,
            windfury_attacks: 2,
            max_trigger_depth: 256,
            max_rejections_per_turn: 32,
            seed: 0,
            shuffle_decks: true,
            coin_card: None,
        }
    }
}

impl GameConfig {
    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the battlefield capacity.
    #[must_use]
    pub fn with_max_board_size(mut self, size: usize) -> Self {
        self.max_board_size = size;
        self
    }

    /// Set the hand capacity.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the starting hero health.
    #[must_use]
    pub fn with_hero_health(mut self, health: i32) -> Self {
        self.hero_health = health;
        self
    }

    /// Set the opening hand sizes.
    #[must_use]
    pub fn with_hand_sizes(mut self, first: usize, second: usize) -> Self {
        self.first_hand_size = first;
        self.second_hand_size = second;
        self
    }

    /// Draw decks in the order given (builder pattern).
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }

    /// Give the second player a coin card after the mulligan.
    #[must_use]
    pub fn with_coin(mut self, card: CardId) -> Self {
        self.coin_card = Some(card);
        self
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hand_size == 0 {
            return Err(ConfigError::Zero("max_hand_size"));
        }
        if self.max_board_size == 0 {
            return Err(ConfigError::Zero("max_board_size"));
        }
        if self.max_mana <= 0 {
            return Err(ConfigError::Zero("max_mana"));
        }
        if self.hero_health <= 0 {
            return Err(ConfigError::Zero("hero_health"));
        }
        if self.max_trigger_depth == 0 {
            return Err(ConfigError::Zero("max_trigger_depth"));
        }
        if self.max_attacks == 0 {
            return Err(ConfigError::Zero("max_attacks"));
        }
        if self.windfury_attacks < self.max_attacks {
            return Err(ConfigError::WindfuryBelowBase {
                windfury: self.windfury_attacks,
                base: self.max_attacks,
            });
        }
        let opening = self.first_hand_size.max(self.second_hand_size);
        if opening > self.max_hand_size {
            return Err(ConfigError::OpeningHandTooLarge {
                opening,
                max: self.max_hand_size,
            });
        }
        Ok(())
    }
}

/// Invalid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("windfury attacks ({windfury}) below base attacks ({base})")]
    WindfuryBelowBase { windfury: u32, base: u32 },

    #[error("opening hand of {opening} exceeds hand size {max}")]
    OpeningHandTooLarge { opening: usize, max: usize },
}
