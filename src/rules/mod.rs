//! Rules: game phases, results, and action legality.
//!
//! Legality checks are pure reads of the game. An action is validated in
//! full before the game applies any part of it, which is what lets a
//! rejected action leave the state untouched.

pub mod legality;

pub use legality::{
    attack_block, check_attack, check_hero_power, check_play, legal_actions,
    legal_attack_targets, PlayPlan,
};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the game is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Before the first turn: shuffling, opening hands, mulligan.
    Mulligan,
    /// Start-of-turn processing for the current player.
    TurnStart,
    /// The current player may act.
    Action,
    /// End-of-turn processing for the current player.
    TurnEnd,
    /// A hero died; no further actions are accepted.
    GameOver,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both heroes died in the same resolution.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }

    /// Decide the result from which heroes are dead, if any.
    #[must_use]
    pub fn from_deaths(first_dead: bool, second_dead: bool) -> Option<Self> {
        match (first_dead, second_dead) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::SECOND)),
            (false, true) => Some(GameResult::Winner(PlayerId::FIRST)),
            (false, false) => None,
        }
    }
}
