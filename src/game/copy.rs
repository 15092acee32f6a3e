//! Independent copies of a game in progress.
//!
//! Every cross-entity reference in a game is an [`EntityId`] resolved
//! through the game's arena, and ids are carried over unchanged. A copy is
//! therefore a field-by-field clone; the translation table it builds maps
//! each carried id to itself.
//!
//! Removed characters and weapons stay in the copy's arena, so a late
//! reference to one is recognised as already gone, exactly as in the
//! source game. Listeners, auras and cost filters that still point at a
//! removed entity are dropped.
//!
//! ## Key Types
//!
//! - `CloneMap`: entity ids of the source mapped into the copy

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{EngineResult, EntityId, GameError};
use crate::triggers::{EventHub, Listener};

use super::Game;

/// Identity translation from a source game's entities to a copy's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloneMap {
    ids: FxHashMap<EntityId, EntityId>,
}

impl CloneMap {
    /// Where `id` lives in the copy, or `None` if it was not carried over.
    #[must_use]
    pub fn translate(&self, id: EntityId) -> Option<EntityId> {
        self.ids.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

}

/// Ids a reference in the copy may still point at.
struct Live<'a> {
    map: &'a CloneMap,
    removed: FxHashSet<EntityId>,
}

impl Live<'_> {
    fn contains(&self, id: EntityId) -> bool {
        self.map.contains(id) && !self.removed.contains(&id)
    }

    fn keeps(&self, listener: &Listener) -> bool {
        let binding = &listener.binding;
        binding.source.map_or(true, |id| self.contains(id))
            && binding.subject.map_or(true, |id| self.contains(id))
    }
}

impl Game {
    /// A fully independent copy of this game.
    ///
    /// The copy shares only the immutable card registry. Its random source
    /// continues from this game's exact state; call [`Game::reseed`] on
    /// either side to diverge.
    #[must_use]
    pub fn copy(&self) -> Game {
        self.copy_with_map().0
    }

    /// Copy and return the translation table used.
    #[must_use]
    pub fn copy_with_map(&self) -> (Game, CloneMap) {
        let mut copy = Game {
            config: self.config.clone(),
            registry: self.registry.clone(),
            players: self.players.clone(),
            characters: self.characters.clone(),
            weapons: self.weapons.clone(),
            secrets: self.secrets.clone(),
            hub: self.hub.clone(),
            current: self.current,
            turn: self.turn,
            phase: self.phase,
            result: self.result.clone(),
            rng: self.rng.clone(),
            deferred: self.deferred.clone(),
            agents: self.agents.map(|_, agent| agent.as_ref().map(|a| a.box_clone())),
            entities: self.entities.clone(),
            next_listener: self.next_listener,
            history: self.history.clone(),
            counters: self.counters.clone(),
            depth: 0,
            draining: false,
            sequence: self.sequence,
            prepared: self.prepared,
        };
        let map = copy.carried_map();
        copy.prune(&map);
        debug_assert!(copy.check_references().is_ok());
        debug!("copied game at turn {} with {} entities", copy.turn, map.len());
        (copy, map)
    }

    /// Every character and weapon ever created, secrets, and cards in hand.
    fn carried_map(&self) -> CloneMap {
        let characters = self.characters.keys().copied();
        let weapons = self.weapons.keys().copied();
        let secrets = self.secrets.keys().copied();
        let cards = self
            .players
            .iter()
            .flat_map(|(_, state)| state.hand.iter().map(|c| c.entity_id));
        let ids = characters
            .chain(weapons)
            .chain(secrets)
            .chain(cards)
            .map(|id| (id, id))
            .collect();
        CloneMap { ids }
    }

    /// Drop everything that still points at a removed entity.
    fn prune(&mut self, map: &CloneMap) {
        let removed = self
            .characters
            .values()
            .filter(|c| c.removed)
            .map(|c| c.id)
            .chain(self.weapons.values().filter(|w| w.removed).map(|w| w.id))
            .collect();
        let live = Live { map, removed };

        let retain = |hub: &mut EventHub| hub.retain(|l| live.keeps(l));
        retain(&mut self.hub);
        for (_, state) in self.players.iter_mut() {
            retain(&mut state.hub);
            state
                .mana_filters
                .retain(|f| f.source.map_or(true, |id| live.contains(id)));
            state.stat_auras.retain(|a| live.contains(a.source));
            if state.weapon.is_some_and(|id| !live.contains(id)) {
                state.weapon = None;
            }
        }
        for character in self.characters.values_mut() {
            retain(&mut character.hub);
        }
        for weapon in self.weapons.values_mut() {
            retain(&mut weapon.hub);
        }
    }

    /// Check that every reference in the game resolves.
    pub fn check_references(&self) -> EngineResult<()> {
        let character = |id: EntityId| {
            self.characters
                .get(&id)
                .filter(|c| !c.removed)
                .map(|_| ())
                .ok_or(GameError::UnknownEntity(id))
        };
        for (player, state) in self.players.iter() {
            character(state.hero)?;
            for &id in state.board.ids() {
                character(id)?;
                if self.characters.get(&id).is_some_and(|c| c.owner != player) {
                    return Err(GameError::Invariant("minion on the wrong battlefield"));
                }
            }
            if let Some(id) = state.weapon {
                self.weapons.get(&id).ok_or(GameError::UnknownEntity(id))?;
            }
            for &id in &state.secrets {
                self.secrets.get(&id).ok_or(GameError::UnknownEntity(id))?;
            }
        }

        for secret in self.secrets.values() {
            if let Some((emitter, listener)) = secret.listener {
                if !self.hub(emitter).is_some_and(|hub| hub.contains(listener)) {
                    return Err(GameError::Invariant("active secret lost its listener"));
                }
            }
        }
        Ok(())
    }
}
