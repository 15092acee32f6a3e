//! Draining the deferred queue.
//!
//! A drain pops entries oldest first until the queue is empty. Resolving
//! an entry may run deathrattles and fire events that mark more entries;
//! those are appended and handled in the same pass. The game result is
//! decided only once the queue is empty.

use log::{debug, info};

use crate::core::{EngineResult, EntityId, GameError, PlayerId};
use crate::effects::EffectContext;
use crate::rules::{GameResult, Phase};
use crate::stack::{DeferredEntry, ResolutionStatus};
use crate::triggers::{Emitter, EventKind, GameEvent};

use super::Game;

impl Game {
    /// Resolve everything pending now.
    ///
    /// The engine drains after every action and turn transition on its
    /// own; this is the explicit checkpoint for effects and tests.
    pub fn settle(&mut self) -> EngineResult<ResolutionStatus> {
        if self.draining {
            return Ok(ResolutionStatus::Idle);
        }
        let resolved = self.drain_queue()?;
        self.check_game_over();
        Ok(if self.is_over() {
            ResolutionStatus::GameOver
        } else if resolved == 0 {
            ResolutionStatus::Idle
        } else {
            ResolutionStatus::Complete { resolved }
        })
    }

    pub(crate) fn drain(&mut self) -> EngineResult<()> {
        self.settle().map(|_| ())
    }

    fn drain_queue(&mut self) -> EngineResult<u32> {
        self.draining = true;
        let mut resolved = 0;
        let outcome = loop {
            let Some(entry) = self.deferred.pop() else {
                break Ok(resolved);
            };
            let step = match entry {
                DeferredEntry::MinionDeath(id) | DeferredEntry::HeroDeath(id) => {
                    self.resolve_death(id)
                }
                DeferredEntry::WeaponBreak(id) => self.resolve_weapon_break(id).map(|_| true),
            };
            match step {
                Ok(left_play) => {
                    self.deferred.finish(entry, left_play);
                    resolved += 1;
                }
                Err(err) => {
                    self.deferred.finish(entry, false);
                    break Err(err);
                }
            }
        };
        self.draining = false;
        outcome
    }

    /// Returns whether a minion left play.
    fn resolve_death(&mut self, id: EntityId) -> EngineResult<bool> {
        let character = self.characters.get(&id).ok_or(GameError::Detached(id))?;
        if character.removed {
            return Ok(false);
        }
        if !character.is_dead() && !character.destroyed {
            return Ok(false);
        }
        let owner = character.owner;

        if character.is_hero() {
            let event = GameEvent::for_player(EventKind::Died, owner).with_target(id);
            self.trigger(Emitter::Entity(id), event)?;
            return Ok(false);
        }

        let card = character.card;
        let index = self.players[owner]
            .board
            .remove(id)
            .ok_or(GameError::Detached(id))?;
        self.reindex(owner);
        let deathrattles = match self.characters.get_mut(&id) {
            Some(minion) => {
                minion.removed = true;
                minion.index = index;
                minion.deathrattles.clone()
            }
            None => return Err(GameError::Detached(id)),
        };
        for (_, state) in self.players.iter_mut() {
            state.remove_contributions(id);
        }
        self.refresh_auras();
        if let Some(card) = card {
            self.players[owner].graveyard.push(card);
        }
        debug!("{} leaves play from {} slot {}", id, owner, index);

        let mut died = GameEvent::for_player(EventKind::Died, owner).with_target(id);
        if let Some(card) = card {
            died = died.with_card(card);
        }
        self.trigger(Emitter::Entity(id), died.clone())?;
        self.unbind_source(id);

        let repeats = 1 + self.deathrattle_bonus(owner);
        let ctx = EffectContext::new(owner).with_source(id).with_subject(id);
        for _ in 0..repeats {
            for deathrattle in &deathrattles {
                deathrattle.apply(self, &ctx)?;
            }
        }

        let mut after = died;
        after.kind = EventKind::MinionDied;
        self.trigger_all(&[Emitter::Player(owner), Emitter::Game], after)?;
        Ok(true)
    }

    fn resolve_weapon_break(&mut self, id: EntityId) -> EngineResult<()> {
        let weapon = self.weapons.get_mut(&id).ok_or(GameError::Detached(id))?;
        if weapon.removed {
            return Ok(());
        }
        weapon.removed = true;
        let (owner, card) = (weapon.owner, weapon.card);
        let deathrattles = weapon.deathrattles.clone();
        if self.players[owner].weapon == Some(id) {
            self.players[owner].weapon = None;
        }
        debug!("weapon {} of {} breaks", id, owner);

        let event = GameEvent::for_player(EventKind::WeaponDestroyed, owner)
            .with_target(id)
            .with_card(card);
        self.trigger(Emitter::Entity(id), event.clone())?;
        self.unbind_source(id);

        let ctx = EffectContext::new(owner).with_source(id).with_subject(id);
        for deathrattle in &deathrattles {
            deathrattle.apply(self, &ctx)?;
        }
        self.trigger(Emitter::Player(owner), event)
    }

    /// Extra deathrattle repetitions granted by `player`'s minions.
    fn deathrattle_bonus(&self, player: PlayerId) -> u32 {
        self.minions(player)
            .iter()
            .filter_map(|id| self.characters.get(id))
            .map(|c| c.deathrattle_bonus)
            .max()
            .unwrap_or(0)
    }

    /// End the game if a hero is dead. Only meaningful between drains.
    pub(crate) fn check_game_over(&mut self) {
        if self.result.is_some() {
            return;
        }
        let dead = |player: PlayerId| {
            self.hero(player)
                .map_or(true, |hero| hero.is_dead() || hero.destroyed)
        };
        let Some(result) = GameResult::from_deaths(dead(PlayerId::FIRST), dead(PlayerId::SECOND))
        else {
            return;
        };
        info!("game over on turn {}: {:?}", self.turn, result);
        self.result = Some(result);
        self.phase = Phase::GameOver;
    }
}
