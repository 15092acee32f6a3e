//! The game: arena, players, hubs, and event dispatch.
//!
//! `Game` owns every entity by id. Cross-entity references (a listener's
//! source, a player's hero, a board slot) are ids looked up through the
//! game, so a copied game re-points them without rewriting anything.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;

use crate::agents::Agent;
use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry};
use crate::core::{
    Action, ActionRecord, EngineResult, EntityAllocator, EntityId, GameConfig, GameError, GameRng,
    PlayerId, PlayerMap,
};
use crate::effects::{EffectContext, Targets};
use crate::entities::{Character, PlayerState, Secret, Weapon};
use crate::rules::{self, GameResult, Phase};
use crate::stack::DeferredQueue;
use crate::triggers::{Binding, Emitter, EventHub, GameEvent, ListenerId};
use crate::zones::Deck;

/// What one player brings to the game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerSetup {
    /// Deck in draw order (before any shuffle).
    pub deck: Vec<CardId>,
    pub hero_power: Option<CardId>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(deck: Vec<CardId>) -> Self {
        Self {
            deck,
            hero_power: None,
        }
    }

    /// Set the hero power (builder pattern).
    #[must_use]
    pub fn with_hero_power(mut self, power: CardId) -> Self {
        self.hero_power = Some(power);
        self
    }
}

/// A two-player duel.
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) registry: Arc<CardRegistry>,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) characters: FxHashMap<EntityId, Character>,
    pub(crate) weapons: FxHashMap<EntityId, Weapon>,
    pub(crate) secrets: FxHashMap<EntityId, Secret>,
    pub(crate) hub: EventHub,
    pub(crate) current: PlayerId,
    pub(crate) turn: u32,
    pub(crate) phase: Phase,
    pub(crate) result: Option<GameResult>,
    pub(crate) rng: GameRng,
    pub(crate) deferred: DeferredQueue,
    pub(crate) agents: PlayerMap<Option<Box<dyn Agent>>>,
    pub(crate) entities: EntityAllocator,
    pub(crate) next_listener: u64,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) counters: FxHashMap<String, i64>,
    pub(crate) depth: u32,
    pub(crate) draining: bool,
    pub(crate) sequence: u32,
    pub(crate) prepared: bool,
}

impl Game {
    /// Build a game in the mulligan phase.
    ///
    /// Fails if the config is invalid or a deck names a card the registry
    /// does not know.
    pub fn new(
        config: GameConfig,
        registry: Arc<CardRegistry>,
        setups: PlayerMap<PlayerSetup>,
    ) -> EngineResult<Self> {
        config.validate()?;
        for (_, setup) in setups.iter() {
            for &card in setup.deck.iter().chain(setup.hero_power.iter()) {
                if !registry.contains(card) {
                    return Err(GameError::UnknownCard(card));
                }
            }
        }

        let mut entities = EntityAllocator::new();
        let mut characters = FxHashMap::default();
        let players = setups.map(|player, setup| {
            let hero = entities.next();
            characters.insert(hero, Character::hero(hero, player, config.hero_health));
            PlayerState::new(
                player,
                hero,
                Deck::new(setup.deck.iter().copied()),
                setup.hero_power,
                &config,
            )
        });

        Ok(Self {
            rng: GameRng::new(config.seed),
            config,
            registry,
            players,
            characters,
            weapons: FxHashMap::default(),
            secrets: FxHashMap::default(),
            hub: EventHub::new(),
            current: PlayerId::FIRST,
            turn: 0,
            phase: Phase::Mulligan,
            result: None,
            deferred: DeferredQueue::new(),
            agents: PlayerMap::new(|_| None),
            entities,
            next_listener: 0,
            history: Vector::new(),
            counters: FxHashMap::default(),
            depth: 0,
            draining: false,
            sequence: 0,
            prepared: false,
        })
    }

    /// Attach agents (builder pattern).
    #[must_use]
    pub fn with_agents(mut self, first: Box<dyn Agent>, second: Box<dyn Agent>) -> Self {
        self.agents = PlayerMap::from_pair(Some(first), Some(second));
        self
    }

    /// Attach or replace one player's agent.
    pub fn set_agent(&mut self, player: PlayerId, agent: Box<dyn Agent>) {
        self.agents[player] = Some(agent);
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Look up a card definition.
    pub fn card(&self, id: CardId) -> EngineResult<&CardDefinition> {
        self.registry.get(id).ok_or(GameError::UnknownCard(id))
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn other_player(&self) -> PlayerId {
        self.current.other()
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Look up a character, failing on unknown ids.
    pub fn expect_character(&self, id: EntityId) -> EngineResult<&Character> {
        self.characters.get(&id).ok_or(GameError::UnknownEntity(id))
    }

    pub(crate) fn expect_character_mut(&mut self, id: EntityId) -> EngineResult<&mut Character> {
        self.characters.get_mut(&id).ok_or(GameError::UnknownEntity(id))
    }

    #[must_use]
    pub fn weapon(&self, id: EntityId) -> Option<&Weapon> {
        self.weapons.get(&id)
    }

    pub fn weapon_mut(&mut self, id: EntityId) -> Option<&mut Weapon> {
        self.weapons.get_mut(&id)
    }

    #[must_use]
    pub fn secret(&self, id: EntityId) -> Option<&Secret> {
        self.secrets.get(&id)
    }

    #[must_use]
    pub fn hero_id(&self, player: PlayerId) -> EntityId {
        self.players[player].hero
    }

    #[must_use]
    pub fn hero(&self, player: PlayerId) -> Option<&Character> {
        self.characters.get(&self.players[player].hero)
    }

    /// Minions on a player's battlefield, left to right.
    #[must_use]
    pub fn minions(&self, player: PlayerId) -> &[EntityId] {
        self.players[player].board.ids()
    }

    #[must_use]
    pub fn minion_at(&self, player: PlayerId, index: usize) -> Option<&Character> {
        self.players[player]
            .board
            .get(index)
            .and_then(|id| self.characters.get(&id))
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[CardInstance] {
        &self.players[player].hand
    }

    /// Cost of a card in hand after mana filters.
    #[must_use]
    pub fn mana_cost(&self, player: PlayerId, hand_index: usize) -> Option<i32> {
        let state = &self.players[player];
        let card = state.hand.get(hand_index)?;
        self.registry.get(card.card_id).map(|def| state.mana_cost(def))
    }

    /// Total attack a character swings with, including a hero's weapon.
    #[must_use]
    pub fn attack_of(&self, id: EntityId) -> i32 {
        let Some(character) = self.characters.get(&id) else {
            return 0;
        };
        let weapon = if character.is_hero() {
            self.players[character.owner]
                .weapon
                .and_then(|w| self.weapons.get(&w))
                .map_or(0, Weapon::attack)
        } else {
            0
        };
        character.calculate_attack() + weapon
    }

    /// Check whether a character or weapon is queued to leave play.
    #[must_use]
    pub fn is_dying(&self, id: EntityId) -> bool {
        self.deferred.is_pending(id)
    }

    /// Minions marked to die since the current action began.
    #[must_use]
    pub fn deaths_this_action(&self) -> u32 {
        self.deferred.marked_this_action()
    }

    /// Minions that died since the current turn began.
    #[must_use]
    pub fn deaths_this_turn(&self) -> u32 {
        self.deferred.resolved_this_turn()
    }

    /// Entities waiting in the deferred queue.
    #[must_use]
    pub fn pending_deaths(&self) -> Vec<EntityId> {
        self.deferred.iter().map(|e| e.entity()).collect()
    }

    /// Every legal action for `player` right now.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        rules::legal_actions(self, player)
    }

    /// Characters `player` may attack right now.
    #[must_use]
    pub fn legal_attack_targets(&self, player: PlayerId) -> Targets {
        rules::legal_attack_targets(self, player)
    }

    /// Actions performed so far.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Game-wide counter used by card effects.
    #[must_use]
    pub fn counter(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }

    /// Seed of the current random stream.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // === Randomness ===

    /// Random integer in `lo..=hi`.
    pub fn random_range(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.gen_inclusive(lo, hi)
    }

    /// Random element of a slice.
    pub fn random_choice<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        self.rng.choose(items).copied()
    }

    /// Restart this game's random stream. Copies are unaffected.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    // === Ids ===

    pub(crate) fn allocate(&mut self) -> EntityId {
        self.entities.next()
    }

    // === Hubs ===

    pub(crate) fn hub(&self, emitter: Emitter) -> Option<&EventHub> {
        match emitter {
            Emitter::Game => Some(&self.hub),
            Emitter::Player(player) => Some(&self.players[player].hub),
            Emitter::Entity(id) => self
                .characters
                .get(&id)
                .map(|c| &c.hub)
                .or_else(|| self.weapons.get(&id).map(|w| &w.hub)),
        }
    }

    pub(crate) fn hub_mut(&mut self, emitter: Emitter) -> Option<&mut EventHub> {
        match emitter {
            Emitter::Game => Some(&mut self.hub),
            Emitter::Player(player) => Some(&mut self.players[player].hub),
            Emitter::Entity(id) => match self.characters.get_mut(&id) {
                Some(character) => Some(&mut character.hub),
                None => self.weapons.get_mut(&id).map(|w| &mut w.hub),
            },
        }
    }

    /// Every hub in the game.
    pub(crate) fn hubs_mut(&mut self) -> impl Iterator<Item = &mut EventHub> {
        let [first, second] = self.players.pair_mut();
        std::iter::once(&mut self.hub)
            .chain(std::iter::once(&mut first.hub))
            .chain(std::iter::once(&mut second.hub))
            .chain(self.characters.values_mut().map(|c| &mut c.hub))
            .chain(self.weapons.values_mut().map(|w| &mut w.hub))
    }

    /// Listen for an event on an emitter's hub.
    pub fn bind(&mut self, emitter: Emitter, binding: Binding) -> EngineResult<ListenerId> {
        let id = ListenerId::new(self.next_listener);
        let hub = self.hub_mut(emitter).ok_or(match emitter {
            Emitter::Entity(entity) => GameError::UnknownEntity(entity),
            _ => GameError::Invariant("player or game hub missing"),
        })?;
        hub.bind(id, binding);
        self.next_listener += 1;
        Ok(id)
    }

    /// Listen for the next occurrence of an event only.
    pub fn bind_once(&mut self, emitter: Emitter, binding: Binding) -> EngineResult<ListenerId> {
        self.bind(emitter, binding.once())
    }

    /// Stop listening. Returns false if the listener was not bound there.
    pub fn unbind(&mut self, emitter: Emitter, id: ListenerId) -> bool {
        self.hub_mut(emitter).is_some_and(|hub| hub.unbind(id))
    }

    /// Remove every listener a source contributed, on every hub.
    pub fn unbind_source(&mut self, source: EntityId) -> usize {
        self.hubs_mut().map(|hub| hub.unbind_source(source)).sum()
    }

    /// Fire an event on one hub.
    ///
    /// Listeners see a snapshot taken now; see [`EventHub`] for the rules.
    /// Firing on a hub that does not exist is a no-op.
    pub fn trigger(&mut self, emitter: Emitter, event: GameEvent) -> EngineResult<()> {
        let snapshot = match self.hub(emitter) {
            Some(hub) => hub.snapshot(event.kind),
            None => return Ok(()),
        };
        if snapshot.is_empty() {
            return Ok(());
        }
        if self.depth >= self.config.max_trigger_depth {
            return Err(GameError::TriggerDepth { depth: self.depth });
        }
        log::trace!("{:?} fires {} to {} listeners", emitter, event.kind, snapshot.len());

        self.depth += 1;
        let mut outcome = Ok(());
        for listener in snapshot {
            let bound = self.hub(emitter).is_some_and(|hub| hub.contains(listener.id));
            if !bound {
                continue;
            }
            if listener.binding.once {
                self.unbind(emitter, listener.id);
            }
            let ctx = EffectContext {
                controller: listener.binding.controller,
                source: listener.binding.source,
                subject: listener.binding.subject,
                target: event.target,
                event: Some(event.clone()),
            };
            outcome = listener.binding.effect.apply(self, &ctx);
            if outcome.is_err() {
                break;
            }
        }
        self.depth -= 1;
        outcome
    }

    /// Fire an event on several hubs in order.
    pub(crate) fn trigger_all(&mut self, emitters: &[Emitter], event: GameEvent) -> EngineResult<()> {
        for &emitter in emitters {
            self.trigger(emitter, event.clone())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.turn)
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("result", &self.result)
            .field("characters", &self.characters.len())
            .field("pending", &self.deferred.len())
            .finish_non_exhaustive()
    }
}
