//! Decision makers.
//!
//! The game asks an agent at fixed points: which action to take, which
//! target to pick, where to place a minion, whether to use the hero power,
//! and which opening cards to replace. The game always supplies the legal
//! options; an answer outside them is ignored or rejected.
//!
//! ## Key Types
//!
//! - `Agent`: the decision interface
//! - `DoNothingAgent`, `PredictableAgent`, `RandomAgent`, `ScriptedAgent`

mod basic;

pub use basic::{DoNothingAgent, PredictableAgent, RandomAgent, ScriptedAgent};

use crate::cards::CardId;
use crate::core::{Action, EntityId, PlayerId};
use crate::game::Game;

/// Supplies decisions for one player.
///
/// Agents are copied along with the game, so a speculative copy carries
/// its own independent agents.
pub trait Agent: Send {
    /// Pick the next action from `options` (never empty; ends with
    /// `EndTurn`).
    fn choose_action(&mut self, game: &Game, player: PlayerId, options: &[Action]) -> Action;

    /// Pick a target from a non-empty legal set.
    fn choose_target(&mut self, _game: &Game, _player: PlayerId, options: &[EntityId]) -> Option<EntityId> {
        options.first().copied()
    }

    /// Pick a battlefield slot in `0..slots` for a minion being played.
    fn choose_index(&mut self, _game: &Game, _player: PlayerId, slots: usize) -> usize {
        slots.saturating_sub(1)
    }

    /// Whether to use the hero power when it is available.
    fn use_hero_power(&mut self, _game: &Game, _player: PlayerId) -> bool {
        true
    }

    /// Indices of opening-hand cards to put back and redraw.
    fn mulligan(&mut self, _game: &Game, _player: PlayerId, _hand: &[CardId]) -> Vec<usize> {
        Vec::new()
    }

    /// Clone into a box, for copying games.
    fn box_clone(&self) -> Box<dyn Agent>;
}

impl std::fmt::Debug for dyn Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Agent(..)")
    }
}
