//! Built-in agents.

use std::collections::VecDeque;

use crate::core::{Action, EntityId, GameRng, PlayerId};
use crate::game::Game;

use super::Agent;

// =============================================================================
// Fixed behaviour
// =============================================================================

/// Ends every turn immediately.
#[derive(Clone, Debug, Default)]
pub struct DoNothingAgent;

impl Agent for DoNothingAgent {
    fn choose_action(&mut self, _game: &Game, _player: PlayerId, _options: &[Action]) -> Action {
        Action::EndTurn
    }

    fn box_clone(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

/// Plays the first playable card, then the hero power, then attacks with
/// everything that can, always taking the first option listed.
#[derive(Clone, Debug, Default)]
pub struct PredictableAgent;

impl Agent for PredictableAgent {
    fn choose_action(&mut self, _game: &Game, _player: PlayerId, options: &[Action]) -> Action {
        let first = |wanted: fn(&Action) -> bool| options.iter().copied().find(|a| wanted(a));

        if let Some(play) = first(|a| matches!(a, Action::PlayCard { .. })) {
            return play;
        }
        if let Some(power) = first(|a| matches!(a, Action::HeroPower { .. })) {
            return power;
        }
        first(|a| matches!(a, Action::Attack { .. })).unwrap_or(Action::EndTurn)
    }

    fn box_clone(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Random behaviour
// =============================================================================

/// Chooses uniformly among the legal options with its own random stream.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, _game: &Game, _player: PlayerId, options: &[Action]) -> Action {
        self.rng.choose(options).copied().unwrap_or(Action::EndTurn)
    }

    fn choose_target(&mut self, _game: &Game, _player: PlayerId, options: &[EntityId]) -> Option<EntityId> {
        self.rng.choose(options).copied()
    }

    fn choose_index(&mut self, _game: &Game, _player: PlayerId, slots: usize) -> usize {
        self.rng.gen_range_usize(0..slots.max(1))
    }

    fn box_clone(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}

// =============================================================================
// Scripted behaviour
// =============================================================================

/// Replays a queue of actions, then ends turns forever.
///
/// Scripted actions are not checked against the options; an illegal one
/// is rejected by the game and the next one is used.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    script: VecDeque<Action>,
    targets: VecDeque<EntityId>,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: script.into_iter().collect(),
            targets: VecDeque::new(),
        }
    }

    /// Answers for target prompts, consumed in order (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = EntityId>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Actions not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Agent for ScriptedAgent {
    fn choose_action(&mut self, _game: &Game, _player: PlayerId, _options: &[Action]) -> Action {
        self.script.pop_front().unwrap_or(Action::EndTurn)
    }

    fn choose_target(&mut self, _game: &Game, _player: PlayerId, options: &[EntityId]) -> Option<EntityId> {
        match self.targets.pop_front() {
            Some(target) if options.contains(&target) => Some(target),
            _ => options.first().copied(),
        }
    }

    fn box_clone(&self) -> Box<dyn Agent> {
        Box::new(self.clone())
    }
}
