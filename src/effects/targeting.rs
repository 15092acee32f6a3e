//! Effect targeting.
//!
//! A [`TargetRule`] describes which characters a card may aim at. Legal
//! targets are resolved against the live game: characters that left play
//! or are waiting to die are never legal, stealthed enemies cannot be
//! picked, and elusive characters ignore spells and hero powers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::game::Game;

/// Which characters a card may target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRule {
    /// No target.
    #[default]
    None,
    AnyCharacter,
    AnyMinion,
    FriendlyCharacter,
    FriendlyMinion,
    /// A friendly minion other than the source.
    OtherFriendlyMinion,
    EnemyCharacter,
    EnemyMinion,
}

/// How the target is being chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delivery {
    /// Spells and hero powers.
    Spell,
    /// Battlecries and other minion effects.
    Minion,
}

/// Target list; boards are small.
pub type Targets = SmallVec<[EntityId; 16]>;

impl TargetRule {
    /// Check whether the rule asks for a target at all.
    #[must_use]
    pub fn wants_target(&self) -> bool {
        !matches!(self, TargetRule::None)
    }

    fn includes_heroes(&self) -> bool {
        matches!(
            self,
            TargetRule::AnyCharacter | TargetRule::FriendlyCharacter | TargetRule::EnemyCharacter
        )
    }

    fn sides(&self, player: PlayerId) -> SmallVec<[PlayerId; 2]> {
        match self {
            TargetRule::None => SmallVec::new(),
            TargetRule::AnyCharacter | TargetRule::AnyMinion => {
                SmallVec::from_slice(&[player, player.other()])
            }
            TargetRule::FriendlyCharacter
            | TargetRule::FriendlyMinion
            | TargetRule::OtherFriendlyMinion => SmallVec::from_slice(&[player]),
            TargetRule::EnemyCharacter | TargetRule::EnemyMinion => {
                SmallVec::from_slice(&[player.other()])
            }
        }
    }

    /// Legal targets for `player`, in order: each side's hero then its
    /// minions left to right, acting player's side first.
    #[must_use]
    pub fn legal_targets(
        &self,
        game: &Game,
        player: PlayerId,
        source: Option<EntityId>,
        delivery: Delivery,
    ) -> Targets {
        let mut out = Targets::new();
        for side in self.sides(player) {
            let state = game.player(side);
            let heroes: &[EntityId] = if self.includes_heroes() {
                std::slice::from_ref(&state.hero)
            } else {
                &[]
            };
            for &id in heroes.iter().chain(state.board.ids()) {
                if self.admits(game, player, source, delivery, id) {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Check a single candidate.
    #[must_use]
    pub fn admits(
        &self,
        game: &Game,
        player: PlayerId,
        source: Option<EntityId>,
        delivery: Delivery,
        id: EntityId,
    ) -> bool {
        let Some(character) = game.character(id) else {
            return false;
        };
        if character.removed || game.is_dying(id) {
            return false;
        }
        let friendly = character.owner == player;
        let side_ok = match self {
            TargetRule::None => false,
            TargetRule::AnyCharacter => true,
            TargetRule::AnyMinion => character.is_minion(),
            TargetRule::FriendlyCharacter => friendly,
            TargetRule::FriendlyMinion => friendly && character.is_minion(),
            TargetRule::OtherFriendlyMinion => {
                friendly && character.is_minion() && Some(id) != source
            }
            TargetRule::EnemyCharacter => !friendly,
            TargetRule::EnemyMinion => !friendly && character.is_minion(),
        };
        if !side_ok {
            return false;
        }
        if !friendly && character.status.stealth {
            return false;
        }
        if delivery == Delivery::Spell && character.status.elusive {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_target() {
        assert!(!TargetRule::None.wants_target());
        assert!(TargetRule::EnemyMinion.wants_target());
    }

    #[test]
    fn test_sides() {
        let p = PlayerId::FIRST;
        assert_eq!(TargetRule::AnyMinion.sides(p).as_slice(), &[p, p.other()]);
        assert_eq!(TargetRule::FriendlyMinion.sides(p).as_slice(), &[p]);
        assert_eq!(TargetRule::EnemyCharacter.sides(p).as_slice(), &[p.other()]);
        assert!(TargetRule::None.sides(p).is_empty());
    }

    #[test]
    fn test_heroes_only_for_character_rules() {
        assert!(TargetRule::AnyCharacter.includes_heroes());
        assert!(!TargetRule::AnyMinion.includes_heroes());
        assert!(!TargetRule::OtherFriendlyMinion.includes_heroes());
    }
}
