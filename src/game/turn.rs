//! Turn flow and the action pipeline.
//!
//! ```text
//! Mulligan -> TurnStart -> Action -> TurnEnd -> TurnStart (other) -> ...
//!                            |
//!                            +-> GameOver (after any drain)
//! ```
//!
//! Every externally visible step (an action, a turn start, a turn end)
//! finishes with a drain of the deferred queue.

use std::sync::Arc;

use log::{debug, warn};

use crate::cards::{CardBehavior, CardType};
use crate::core::{Action, ActionRecord, EngineResult, EntityId, GameError, PlayerId, RejectReason};
use crate::effects::{Delivery, EffectContext};
use crate::rules::{self, GameResult, Phase, PlayPlan};
use crate::triggers::{Emitter, EventKind, GameEvent};
use crate::zones::ZonePosition;

use super::Game;

impl Game {
    // === Setup ===

    /// Shuffle, deal opening hands, run the mulligan, and hand the second
    /// player the coin.
    pub fn pre_game(&mut self) -> EngineResult<()> {
        if self.phase != Phase::Mulligan || self.prepared {
            return Err(RejectReason::WrongPhase.into());
        }
        if self.config.shuffle_decks {
            for player in PlayerId::both() {
                self.players[player].deck.shuffle(&mut self.rng);
            }
        }

        for player in PlayerId::both() {
            let count = if player == PlayerId::FIRST {
                self.config.first_hand_size
            } else {
                self.config.second_hand_size
            };
            for _ in 0..count {
                self.draw(player)?;
            }
        }

        for player in PlayerId::both() {
            self.mulligan(player)?;
        }

        if let Some(coin) = self.config.coin_card {
            self.add_to_hand(PlayerId::SECOND, coin)?;
        }
        self.prepared = true;
        self.phase = Phase::TurnStart;
        debug!("pre-game done, seed {}", self.rng.seed());
        Ok(())
    }

    fn mulligan(&mut self, player: PlayerId) -> EngineResult<()> {
        let hand: Vec<_> = self.players[player].hand_cards().collect();
        let Some(mut replace) = self.with_agent(player, |agent, game| agent.mulligan(game, player, &hand))
        else {
            return Ok(());
        };
        replace.sort_unstable();
        replace.dedup();
        replace.retain(|&i| i < hand.len());

        for &index in replace.iter().rev() {
            let card = self.players[player].hand.remove(index).card_id;
            let state = &mut self.players[player];
            state.deck.insert_random(card, &mut self.rng);
        }
        for _ in 0..replace.len() {
            self.draw(player)?;
        }
        debug!("{} replaced {} cards", player, replace.len());
        Ok(())
    }

    /// Run the pre-game if needed and start the first turn.
    pub fn start(&mut self) -> EngineResult<()> {
        if self.phase == Phase::Mulligan {
            self.pre_game()?;
        }
        if self.phase == Phase::TurnStart {
            self.start_turn()?;
        }
        Ok(())
    }

    // === Turns ===

    /// Begin the next turn: swap players (except on the first turn), grow
    /// and refill mana, reset per-turn state, draw, fire `TurnStarted`.
    pub fn start_turn(&mut self) -> EngineResult<()> {
        if self.phase != Phase::TurnStart {
            return Err(RejectReason::WrongPhase.into());
        }
        if self.turn > 0 {
            self.current = self.current.other();
        }
        self.turn += 1;
        self.deferred.begin_turn();
        self.deferred.begin_action();
        let player = self.current;
        debug!("turn {} starts for {}", self.turn, player);

        let cap = self.config.max_mana;
        let state = &mut self.players[player];
        state.mana.refill(cap);
        state.hero_power_used = false;
        state.cards_played_this_turn = 0;
        self.deactivate_secrets(player);

        for id in self.characters_of(player) {
            if let Some(character) = self.characters.get_mut(&id) {
                character.exhausted = false;
                character.attacks_this_turn = 0;
            }
        }

        self.draw(player)?;
        let event = GameEvent::for_player(EventKind::TurnStarted, player);
        self.trigger_all(&[Emitter::Player(player), Emitter::Game], event)?;
        self.drain()?;
        if !self.is_over() {
            self.phase = Phase::Action;
        }
        Ok(())
    }

    /// Finish the current turn: fire `TurnEnded`, thaw, expire this turn's
    /// bonuses, arm secrets.
    pub fn end_turn(&mut self) -> EngineResult<()> {
        if self.phase != Phase::Action {
            return Err(RejectReason::WrongPhase.into());
        }
        self.phase = Phase::TurnEnd;
        let player = self.current;
        self.deferred.begin_action();

        let event = GameEvent::for_player(EventKind::TurnEnded, player);
        self.trigger_all(&[Emitter::Player(player), Emitter::Game], event)?;
        self.drain()?;
        if self.is_over() {
            return Ok(());
        }

        for character in self.characters.values_mut() {
            if character.owner == player && character.status.frozen && !character.status.frozen_this_turn {
                character.status.frozen = false;
            }
            character.status.frozen_this_turn = false;
            character.temp_attack = 0;
        }
        for (_, state) in self.players.iter_mut() {
            state.mana_filters.retain(|f| !f.until_turn_end);
        }
        self.activate_secrets(player)?;

        debug!("turn {} ends for {}", self.turn, player);
        self.phase = Phase::TurnStart;
        Ok(())
    }

    // === Actions ===

    /// Validate and apply one action for `player`.
    ///
    /// A rejected action leaves the game untouched. Ending the turn also
    /// starts the opponent's turn.
    pub fn perform(&mut self, player: PlayerId, action: Action) -> EngineResult<()> {
        let turn = self.turn;
        match self.apply_action(player, action) {
            Ok(()) => {
                self.sequence += 1;
                self.history
                    .push_back(ActionRecord::new(player, action, turn, self.sequence));
                Ok(())
            }
            Err(GameError::Rejected(reason)) => {
                warn!("{} {:?} rejected: {}", player, action, reason);
                Err(reason.into())
            }
            Err(err) => Err(err),
        }
    }

    fn apply_action(&mut self, player: PlayerId, action: Action) -> EngineResult<()> {
        match action {
            Action::PlayCard {
                hand_index,
                target,
                position,
            } => {
                let plan = rules::check_play(self, player, hand_index, target)?;
                self.deferred.begin_action();
                self.play_card(player, plan, position)?;
                self.drain()
            }
            Action::Attack { attacker, target } => {
                rules::check_attack(self, player, attacker, target)?;
                self.deferred.begin_action();
                self.attack(attacker, target)?;
                self.drain()
            }
            Action::HeroPower { target } => {
                let target = rules::check_hero_power(self, player, target)?;
                self.deferred.begin_action();
                self.use_hero_power(player, target)?;
                self.drain()
            }
            Action::EndTurn => {
                rules::legality::check_turn(self, player)?;
                self.end_turn()?;
                if !self.is_over() {
                    self.start_turn()?;
                }
                Ok(())
            }
        }
    }

    fn play_card(&mut self, player: PlayerId, plan: PlayPlan, position: Option<usize>) -> EngineResult<()> {
        let registry = Arc::clone(&self.registry);
        let def = registry.get(plan.card).ok_or(GameError::UnknownCard(plan.card))?;

        let state = &mut self.players[player];
        state.mana.spend(plan.cost);
        let instance = state.hand.remove(plan.hand_index);
        state.consume_one_shot_filters(def);
        state.cards_played_this_turn += 1;
        debug!("{} plays {} for {}", player, def.name, plan.cost);

        let mut played = GameEvent::for_player(EventKind::CardPlayed, player).with_card(plan.card);
        if let Some(target) = plan.target {
            played = played.with_target(target);
        }
        self.trigger_all(&[Emitter::Player(player), Emitter::Game], played)?;

        match &def.behavior {
            CardBehavior::Minion(spec) => {
                let id = instance.entity_id;
                let position = match position {
                    Some(index) => index,
                    None => self.choose_slot(player),
                };
                self.spawn_minion(player, plan.card, id, ZonePosition::Index(position))?;

                let placed = GameEvent::for_player(EventKind::MinionPlaced, player)
                    .with_target(id)
                    .with_card(plan.card);
                self.trigger(Emitter::Player(player), placed)?;

                if let Some(battlecry) = &spec.battlecry {
                    let ctx = EffectContext::new(player)
                        .with_source(id)
                        .with_subject(id)
                        .with_target(plan.target);
                    battlecry.effect.apply(self, &ctx)?;
                }

                let event = GameEvent::for_player(EventKind::MinionPlayed, player)
                    .with_target(id)
                    .with_card(plan.card);
                self.trigger_all(&[Emitter::Player(player), Emitter::Game], event.clone())?;
                let mut summoned = event;
                summoned.kind = EventKind::MinionSummoned;
                self.trigger_all(&[Emitter::Player(player), Emitter::Game], summoned)
            }
            CardBehavior::Spell(spell) => {
                let hero = self.hero_id(player);
                let ctx = EffectContext::new(player)
                    .with_source(hero)
                    .with_target(plan.target);
                spell.effect.apply(self, &ctx)?;
                let mut cast = GameEvent::for_player(EventKind::SpellCast, player)
                    .with_source(hero)
                    .with_card(plan.card);
                if let Some(target) = plan.target {
                    cast = cast.with_target(target);
                }
                self.trigger_all(&[Emitter::Player(player), Emitter::Game], cast)
            }
            CardBehavior::Weapon(spec) => {
                let id = self.equip_weapon(player, plan.card)?;
                if let Some(battlecry) = &spec.battlecry {
                    let ctx = EffectContext::new(player)
                        .with_source(id)
                        .with_subject(id)
                        .with_target(plan.target);
                    battlecry.effect.apply(self, &ctx)?;
                }
                Ok(())
            }
            CardBehavior::Secret(_) => self.play_secret(player, plan.card, instance.entity_id),
            CardBehavior::HeroPower(_) => Err(RejectReason::NotPlayable.into()),
        }
    }

    /// Slot for a minion played without an explicit position.
    fn choose_slot(&mut self, player: PlayerId) -> usize {
        let slots = self.players[player].board.len() + 1;
        self.with_agent(player, |agent, game| agent.choose_index(game, player, slots))
            .filter(|&index| index < slots)
            .unwrap_or(slots - 1)
    }

    fn use_hero_power(&mut self, player: PlayerId, target: Option<EntityId>) -> EngineResult<()> {
        let registry = Arc::clone(&self.registry);
        let power = self.players[player]
            .hero_power
            .and_then(|id| registry.get(id))
            .ok_or(RejectReason::NoHeroPower)?;
        let CardBehavior::HeroPower(spec) = &power.behavior else {
            return Err(RejectReason::NoHeroPower.into());
        };

        let hero = self.hero_id(player);
        let state = &mut self.players[player];
        state.mana.spend(power.cost);
        state.hero_power_used = true;

        let ctx = EffectContext::new(player).with_source(hero).with_target(target);
        spec.effect.apply(self, &ctx)?;
        let mut event = GameEvent::for_player(EventKind::HeroPowerUsed, player)
            .with_source(hero)
            .with_card(power.id);
        if let Some(target) = target {
            event = event.with_target(target);
        }
        self.trigger(Emitter::Player(player), event)
    }

    // === Agent-driven play ===

    /// Let the current player's agent take a whole turn.
    ///
    /// Starts the turn if it has not started yet. The hero power is only
    /// offered when the agent wants to use it. Rejected choices are
    /// logged and asked again, up to `max_rejections_per_turn`, after which
    /// the turn is ended for the agent.
    pub fn play_single_turn(&mut self) -> EngineResult<()> {
        if self.phase == Phase::Mulligan {
            self.pre_game()?;
        }
        if self.phase == Phase::TurnStart {
            self.start_turn()?;
        }
        let player = self.current;
        let mut rejections = 0;

        while !self.is_over() && self.phase == Phase::Action && self.current == player {
            let options = self.offered_actions(player);
            let action = self
                .with_agent(player, |agent, game| agent.choose_action(game, player, &options))
                .unwrap_or(Action::EndTurn);
            let action = self.complete_target(player, action);

            match self.perform(player, action) {
                Ok(()) => {}
                Err(GameError::Rejected(_)) => {
                    rejections += 1;
                    if rejections >= self.config.max_rejections_per_turn {
                        warn!("{} hit the rejection limit, ending turn", player);
                        self.perform(player, Action::EndTurn)?;
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Legal actions, less the hero power if the agent declines it.
    fn offered_actions(&mut self, player: PlayerId) -> Vec<Action> {
        let mut options = rules::legal_actions(self, player);
        let is_power = |action: &Action| matches!(action, Action::HeroPower { .. });
        if options.iter().any(is_power) {
            let wanted = self
                .with_agent(player, |agent, game| agent.use_hero_power(game, player))
                .unwrap_or(true);
            if !wanted {
                options.retain(|action| !is_power(action));
            }
        }
        options
    }

    /// Ask the agent for a target when it chose a targeted card without one.
    fn complete_target(&mut self, player: PlayerId, action: Action) -> Action {
        let Action::PlayCard {
            hand_index,
            target: None,
            ..
        } = action
        else {
            return action;
        };
        if rules::check_play(self, player, hand_index, None) != Err(RejectReason::TargetRequired) {
            return action;
        }
        let Some(def) = self
            .hand(player)
            .get(hand_index)
            .and_then(|c| self.registry.get(c.card_id))
            .filter(|def| def.card_type() != CardType::HeroPower)
        else {
            return action;
        };
        let delivery = if def.is_spell() {
            Delivery::Spell
        } else {
            Delivery::Minion
        };
        let options = def.target_rule().legal_targets(self, player, None, delivery);
        match self.choose_target(player, &options) {
            Some(target) => action.with_target(target),
            None => action,
        }
    }

    /// Play turns until the game ends or `max_turns` turns have passed.
    pub fn run(&mut self, max_turns: u32) -> EngineResult<Option<GameResult>> {
        let mut played = 0;
        while !self.is_over() && played < max_turns {
            self.play_single_turn()?;
            played += 1;
        }
        Ok(self.result.clone())
    }
}
