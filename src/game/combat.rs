//! Attack resolution.

use log::debug;

use crate::core::{EngineResult, EntityId};
use crate::stack::DeferredEntry;
use crate::triggers::{Emitter, EventKind, GameEvent};

use super::Game;

impl Game {
    /// Resolve an already validated attack.
    ///
    /// Attack triggers run first and may kill either side, which cancels
    /// the swing but still uses up the attack. Otherwise both sides deal
    /// damage computed before either hit lands; heroes never strike back.
    /// A hero's weapon loses one durability.
    pub(crate) fn attack(&mut self, attacker: EntityId, target: EntityId) -> EngineResult<()> {
        let player = self.expect_character(attacker)?.owner;
        let declared = GameEvent::for_player(EventKind::Attack, player)
            .with_source(attacker)
            .with_target(target);
        self.trigger_all(
            &[Emitter::Entity(attacker), Emitter::Player(player), Emitter::Game],
            declared.clone(),
        )?;
        let mut attacked = declared;
        attacked.kind = EventKind::Attacked;
        self.trigger(Emitter::Entity(target), attacked)?;
        if let Some(character) = self.character_mut(attacker) {
            character.attacks_this_turn += 1;
        }

        if self.out_of_combat(attacker) || self.out_of_combat(target) {
            debug!("attack {} -> {} cancelled", attacker, target);
            return Ok(());
        }

        let striking = self.attack_of(attacker);
        let defending = self.expect_character(target)?;
        let retaliation = if defending.is_minion() {
            self.attack_of(target)
        } else {
            0
        };
        let hero_attack = self.expect_character(attacker)?.is_hero();

        if let Some(character) = self.character_mut(attacker) {
            character.status.stealth = false;
        }
        debug!("{} attacks {} ({} vs {})", attacker, target, striking, retaliation);
        self.deal_damage(Some(attacker), target, striking)?;
        self.deal_damage(Some(target), attacker, retaliation)?;

        if hero_attack {
            if let Some(id) = self.players[player].weapon {
                if let Some(weapon) = self.weapons.get_mut(&id) {
                    weapon.durability -= 1;
                    if weapon.is_broken() {
                        self.deferred.mark(DeferredEntry::WeaponBreak(id));
                    }
                }
            }
        }
        Ok(())
    }

    fn out_of_combat(&self, id: EntityId) -> bool {
        self.is_dying(id) || self.character(id).map_or(true, |c| c.removed)
    }
}
