//! Player actions.
//!
//! During its action phase the acting player chooses one of:
//! - play a card from hand (with an optional target and board position)
//! - attack with a character
//! - use the hero power
//! - end the turn
//!
//! Targets and attackers are entity ids; hand cards are addressed by
//! their index in hand at the time the action is chosen.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// A complete player action.
///
/// ```
/// use rust_duel::core::{Action, EntityId};
///
/// let play = Action::play(0).with_target(EntityId(4));
/// let attack = Action::attack(EntityId(7), EntityId(2));
///
/// assert!(!play.is_end_turn());
/// assert_eq!(attack.target(), Some(EntityId(2)));
/// assert!(Action::EndTurn.is_end_turn());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `hand_index`.
    PlayCard {
        hand_index: usize,
        target: Option<EntityId>,
        /// Board insertion index for minions. `None` asks the agent
        /// (or appends when there is no agent).
        position: Option<usize>,
    },

    /// Attack `target` with `attacker`.
    Attack { attacker: EntityId, target: EntityId },

    /// Use the hero power.
    HeroPower { target: Option<EntityId> },

    /// End the turn.
    EndTurn,
}

impl Action {
    /// Play a card without target or position.
    #[must_use]
    pub const fn play(hand_index: usize) -> Self {
        Action::PlayCard {
            hand_index,
            target: None,
            position: None,
        }
    }

    /// Attack with a character.
    #[must_use]
    pub const fn attack(attacker: EntityId, target: EntityId) -> Self {
        Action::Attack { attacker, target }
    }

    /// Use the hero power without a target.
    #[must_use]
    pub const fn hero_power() -> Self {
        Action::HeroPower { target: None }
    }

    /// Set the target (builder pattern). Ignored for attacks and end turn.
    #[must_use]
    pub fn with_target(mut self, new_target: EntityId) -> Self {
        match &mut self {
            Action::PlayCard { target, .. } | Action::HeroPower { target } => {
                *target = Some(new_target);
            }
            Action::Attack { .. } | Action::EndTurn => {}
        }
        self
    }

    /// Set the board position (builder pattern). Only meaningful for cards.
    #[must_use]
    pub fn at_position(mut self, index: usize) -> Self {
        if let Action::PlayCard { position, .. } = &mut self {
            *position = Some(index);
        }
        self
    }

    /// The targeted entity, if any.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Action::PlayCard { target, .. } | Action::HeroPower { target } => *target,
            Action::Attack { target, .. } => Some(*target),
            Action::EndTurn => None,
        }
    }

    /// Check if this action ends the turn.
    #[must_use]
    pub fn is_end_turn(&self) -> bool {
        matches!(self, Action::EndTurn)
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
