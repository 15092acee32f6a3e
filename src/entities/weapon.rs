//! Weapons equipped by heroes.

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::effects::Effect;
use crate::triggers::EventHub;

/// An equipped weapon.
///
/// Durability drops by one per hero attack; at zero the weapon is queued
/// for destruction like a dying minion.
#[derive(Clone, Debug)]
pub struct Weapon {
    pub id: EntityId,
    pub owner: PlayerId,
    pub card: CardId,
    pub base_attack: i32,
    pub attack_buff: i32,
    pub durability: i32,
    pub removed: bool,
    pub deathrattles: Vec<Effect>,
    pub hub: EventHub,
}

impl Weapon {
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, card: CardId, attack: i32, durability: i32) -> Self {
        Self {
            id,
            owner,
            card,
            base_attack: attack,
            attack_buff: 0,
            durability,
            removed: false,
            deathrattles: Vec::new(),
            hub: EventHub::new(),
        }
    }

    #[must_use]
    pub fn attack(&self) -> i32 {
        (self.base_attack + self.attack_buff).max(0)
    }

    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.durability <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon() {
        let mut axe = Weapon::new(EntityId(3), PlayerId::FIRST, CardId::new(1), 3, 2);
        assert_eq!(axe.attack(), 3);
        assert!(!axe.is_broken());

        axe.durability -= 2;
        assert!(axe.is_broken());

        axe.attack_buff = -5;
        assert_eq!(axe.attack(), 0);
    }
}
