//! State-changing operations used by the engine and by card effects.
//!
//! Nothing here removes a character from play. Operations that can kill
//! mark the character in the deferred queue; removal happens when the
//! queue drains.

use std::sync::Arc;

use log::debug;

use crate::cards::{
    AuraHost, AuraScope, CardId, CardInstance, FilterTarget, SecretHost,
    TriggeredAbility,
};
use crate::core::{EngineResult, EntityId, GameError, PlayerId};
use crate::effects::{Delivery, Effect, EffectContext, TargetRule, Targets};
use crate::entities::{Character, ManaFilter, Secret, StatAura, Status, Weapon};
use crate::stack::DeferredEntry;
use crate::triggers::{Binding, Emitter, EventKind, GameEvent};
use crate::zones::ZonePosition;

use super::Game;

impl Game {
    // === Damage and healing ===

    /// Deal damage to a character. Returns the damage that got past armor.
    ///
    /// Immunity and divine shield absorb the hit entirely; armor absorbs
    /// first on heroes. Health may drop below zero. A source with the
    /// freeze keyword freezes what it damages.
    pub fn deal_damage(
        &mut self,
        source: Option<EntityId>,
        target: EntityId,
        amount: i32,
    ) -> EngineResult<i32> {
        if amount <= 0 {
            return Ok(0);
        }
        let character = self.expect_character_mut(target)?;
        if character.removed || character.status.immune {
            return Ok(0);
        }
        if character.status.divine_shield {
            character.status.divine_shield = false;
            return Ok(0);
        }

        let absorbed = character.armor.min(amount);
        character.armor -= absorbed;
        character.health -= amount - absorbed;
        let owner = character.owner;
        let dealt = amount - absorbed;
        if character.is_dead() {
            let entry = death_entry(character);
            self.deferred.mark(entry);
        }

        let freezes = source
            .and_then(|s| self.characters.get(&s))
            .is_some_and(|c| c.status.freeze);
        if freezes {
            self.freeze(target)?;
        }

        let event = GameEvent::new(EventKind::Damaged)
            .with_source_opt(source)
            .with_target(target)
            .with_player(owner)
            .with_amount(dealt);
        self.trigger_all(
            &[Emitter::Entity(target), Emitter::Player(owner), Emitter::Game],
            event,
        )?;
        Ok(dealt)
    }

    /// Bonus damage `player`'s spells deal.
    #[must_use]
    pub fn spell_damage(&self, player: PlayerId) -> i32 {
        self.minions(player)
            .iter()
            .filter_map(|id| self.characters.get(id))
            .filter(|c| !c.removed)
            .map(|c| c.spell_damage)
            .sum()
    }

    /// Deal spell damage boosted by `player`'s spell damage minions.
    pub fn deal_spell_damage(
        &mut self,
        player: PlayerId,
        target: EntityId,
        base: i32,
    ) -> EngineResult<i32> {
        let amount = base + self.spell_damage(player);
        self.deal_damage(None, target, amount)
    }

    /// Restore health up to the maximum. Returns the amount healed.
    pub fn heal(&mut self, source: Option<EntityId>, target: EntityId, amount: i32) -> EngineResult<i32> {
        let character = self.expect_character_mut(target)?;
        if character.removed || amount <= 0 {
            return Ok(0);
        }
        let healed = amount.min(character.max_health() - character.health).max(0);
        if healed == 0 {
            return Ok(0);
        }
        character.health += healed;
        let owner = character.owner;

        let event = GameEvent::new(EventKind::Healed)
            .with_source_opt(source)
            .with_target(target)
            .with_player(owner)
            .with_amount(healed);
        self.trigger_all(
            &[Emitter::Entity(target), Emitter::Player(owner), Emitter::Game],
            event,
        )?;
        Ok(healed)
    }

    /// Destroy a character or weapon regardless of health or durability.
    pub fn destroy(&mut self, id: EntityId) -> EngineResult<()> {
        if let Some(character) = self.characters.get_mut(&id) {
            if !character.removed {
                character.destroyed = true;
                let entry = death_entry(character);
                self.deferred.mark(entry);
            }
            return Ok(());
        }
        match self.weapons.get(&id) {
            Some(weapon) if !weapon.removed => {
                self.deferred.mark(DeferredEntry::WeaponBreak(id));
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(GameError::UnknownEntity(id)),
        }
    }

    // === Status ===

    /// Remove a character's text: keywords, buffs, deathrattles, and every
    /// listener, aura and cost filter it contributed.
    pub fn silence(&mut self, target: EntityId) -> EngineResult<()> {
        let character = self.expect_character_mut(target)?;
        if character.removed {
            return Ok(());
        }
        character.clear_for_silence();
        let owner = character.owner;

        let unbound = self.unbind_source(target);
        for (_, state) in self.players.iter_mut() {
            state.remove_contributions(target);
        }
        self.refresh_auras();
        debug!("silenced {}, {} listeners removed", target, unbound);

        let event = GameEvent::new(EventKind::Silenced)
            .with_target(target)
            .with_player(owner);
        self.trigger_all(&[Emitter::Entity(target), Emitter::Player(owner)], event)
    }

    /// Freeze a character: it cannot attack until it thaws.
    pub fn freeze(&mut self, target: EntityId) -> EngineResult<()> {
        let character = self.expect_character_mut(target)?;
        if character.removed {
            return Ok(());
        }
        character.status.frozen = true;
        character.status.frozen_this_turn = true;
        let owner = character.owner;
        let event = GameEvent::new(EventKind::Frozen)
            .with_target(target)
            .with_player(owner);
        self.trigger(Emitter::Entity(target), event)
    }

    /// Permanent attack and health change.
    pub fn buff(&mut self, target: EntityId, attack: i32, health: i32) -> EngineResult<()> {
        let character = self.expect_character_mut(target)?;
        character.buff(attack, health);
        if character.is_dead() && !character.removed {
            let entry = death_entry(character);
            self.deferred.mark(entry);
        }
        Ok(())
    }

    /// Attack bonus that expires at the end of the turn.
    pub fn add_temp_attack(&mut self, target: EntityId, amount: i32) -> EngineResult<()> {
        self.expect_character_mut(target)?.temp_attack += amount;
        Ok(())
    }

    pub fn set_taunt(&mut self, target: EntityId, taunt: bool) -> EngineResult<()> {
        self.expect_character_mut(target)?.status.taunt = taunt;
        Ok(())
    }

    /// Edit status flags directly.
    pub fn set_status(&mut self, target: EntityId, edit: impl FnOnce(&mut Status)) -> EngineResult<()> {
        edit(&mut self.expect_character_mut(target)?.status);
        Ok(())
    }

    pub fn gain_armor(&mut self, player: PlayerId, amount: i32) -> EngineResult<()> {
        let hero = self.hero_id(player);
        self.expect_character_mut(hero)?.armor += amount.max(0);
        let event = GameEvent::for_player(EventKind::ArmorGained, player)
            .with_target(hero)
            .with_amount(amount);
        self.trigger(Emitter::Player(player), event)
    }

    // === Minions ===

    /// Put a new copy of a minion card onto `player`'s battlefield.
    ///
    /// Returns `None` when the battlefield is full.
    pub fn summon(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: ZonePosition,
    ) -> EngineResult<Option<EntityId>> {
        if self.players[player].board.is_full() {
            return Ok(None);
        }
        let id = self.allocate();
        self.spawn_minion(player, card, id, position)?;
        let event = GameEvent::for_player(EventKind::MinionSummoned, player)
            .with_target(id)
            .with_card(card);
        self.trigger_all(&[Emitter::Player(player), Emitter::Game], event)?;
        Ok(Some(id))
    }

    /// Move a minion card from `player`'s hand straight onto the
    /// battlefield, without paying for it or running its battlecry.
    pub fn put_into_play(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        position: ZonePosition,
    ) -> EngineResult<Option<EntityId>> {
        let state = &self.players[player];
        let Some(instance) = state.hand.get(hand_index).cloned() else {
            return Ok(None);
        };
        if state.board.is_full() || !self.card(instance.card_id)?.is_minion() {
            return Ok(None);
        }
        self.players[player].hand.remove(hand_index);
        let id = instance.entity_id;
        self.spawn_minion(player, instance.card_id, id, position)?;
        let event = GameEvent::for_player(EventKind::MinionSummoned, player)
            .with_target(id)
            .with_card(instance.card_id);
        self.trigger_all(&[Emitter::Player(player), Emitter::Game], event)?;
        Ok(Some(id))
    }

    /// Take a minion off the battlefield without killing it. No death
    /// events or deathrattles; its listeners, auras and cost filters go.
    pub fn remove_minion(&mut self, id: EntityId) -> EngineResult<()> {
        let character = self.expect_character(id)?;
        if character.removed || !character.is_minion() {
            return Ok(());
        }
        let owner = character.owner;
        let index = self.players[owner]
            .board
            .remove(id)
            .ok_or(GameError::Detached(id))?;
        self.reindex(owner);
        if let Some(minion) = self.characters.get_mut(&id) {
            minion.removed = true;
            minion.index = index;
        }
        self.unbind_source(id);
        for (_, state) in self.players.iter_mut() {
            state.remove_contributions(id);
        }
        self.refresh_auras();
        debug!("{} taken out of play for {}", id, owner);
        Ok(())
    }

    /// Create a minion under `id` and place it, binding everything its card
    /// contributes. Fires no events.
    pub(crate) fn spawn_minion(
        &mut self,
        player: PlayerId,
        card: CardId,
        id: EntityId,
        position: ZonePosition,
    ) -> EngineResult<()> {
        let registry = Arc::clone(&self.registry);
        let def = registry.get(card).ok_or(GameError::UnknownCard(card))?;
        let spec = def
            .minion_spec()
            .ok_or_else(|| GameError::effect(None, format!("{} is not a minion", def.name)))?;

        let mut minion = Character::minion(id, player, card, spec.attack, spec.health, &spec.keywords);
        minion.deathrattles = spec.deathrattles.clone();
        let index = self.players[player]
            .board
            .insert(id, position)
            .ok_or(GameError::Invariant("summon onto a full battlefield"))?;
        minion.index = index;
        self.characters.insert(id, minion);
        self.reindex(player);

        for ability in &spec.abilities {
            self.bind_ability(player, id, ability)?;
        }
        for aura in &spec.stat_auras {
            self.players[player].stat_auras.push(StatAura {
                source: id,
                scope: aura.scope,
                attack: aura.attack,
                health: aura.health,
            });
        }
        for filter in &spec.mana_filters {
            let side = match filter.target {
                FilterTarget::Owner => player,
                FilterTarget::Opponent => player.other(),
            };
            self.players[side]
                .mana_filters
                .push(ManaFilter::new(filter.amount, filter.applies_to, filter.min).from_source(id));
        }
        self.refresh_auras();
        debug!("{} enters play as {} for {}", def.name, id, player);
        Ok(())
    }

    /// Bind a card ability contributed by `source`.
    pub(crate) fn bind_ability(
        &mut self,
        player: PlayerId,
        source: EntityId,
        ability: &TriggeredAbility,
    ) -> EngineResult<()> {
        let emitter = match ability.host {
            AuraHost::Owner => Emitter::Player(player),
            AuraHost::Opponent => Emitter::Player(player.other()),
            AuraHost::Game => Emitter::Game,
            AuraHost::Itself => Emitter::Entity(source),
            AuraHost::OwnerHero => Emitter::Entity(self.hero_id(player)),
        };
        let effect = match &ability.condition {
            None => ability.effect.clone(),
            Some(condition) => {
                let condition = condition.clone();
                let effect = ability.effect.clone();
                Effect::new(move |game, ctx| {
                    if condition.check(game, ctx) {
                        effect.apply(game, ctx)
                    } else {
                        Ok(())
                    }
                })
            }
        };
        let binding = Binding::new(ability.kind, player, effect)
            .with_source(source)
            .with_subject(source);
        self.bind(emitter, binding)?;
        Ok(())
    }

    /// Sync each minion's `index` with its battlefield slot.
    pub(crate) fn reindex(&mut self, player: PlayerId) {
        for (index, id) in self.players[player].board.ids().iter().enumerate() {
            if let Some(minion) = self.characters.get_mut(id) {
                minion.index = index;
            }
        }
    }

    /// Recompute the aura layer of every minion in play.
    pub fn refresh_auras(&mut self) {
        let mut dying = Vec::new();
        for player in PlayerId::both() {
            let state = &self.players[player];
            for &minion in state.board.ids() {
                let (mut attack, mut health) = (0, 0);
                for aura in &state.stat_auras {
                    let applies = match aura.scope {
                        AuraScope::AllFriendly => true,
                        AuraScope::OtherFriendly => aura.source != minion,
                        AuraScope::Adjacent => state.board.adjacent(aura.source).contains(&minion),
                    };
                    if applies {
                        attack += aura.attack;
                        health += aura.health;
                    }
                }
                if let Some(character) = self.characters.get_mut(&minion) {
                    character.set_aura(attack, health);
                    if character.is_dead() {
                        dying.push(minion);
                    }
                }
            }
        }
        for id in dying {
            self.deferred.mark(DeferredEntry::MinionDeath(id));
        }
    }

    /// Add a continuous stat bonus over `player`'s minions.
    pub fn add_stat_aura(&mut self, player: PlayerId, aura: StatAura) {
        self.players[player].stat_auras.push(aura);
        self.refresh_auras();
    }

    // === Heroes ===

    /// Give `player` a new hero in place of the old one: a fresh health
    /// pool of `health` and a new, unused hero power. Armor, weapon and
    /// status carry over.
    pub fn replace_hero(&mut self, player: PlayerId, health: i32, hero_power: CardId) -> EngineResult<()> {
        if !self.registry.contains(hero_power) {
            return Err(GameError::UnknownCard(hero_power));
        }
        let hero = self.hero_id(player);
        let character = self.expect_character_mut(hero)?;
        character.base_health = health;
        character.health_buff = 0;
        character.health = health;

        let state = &mut self.players[player];
        state.hero_power = Some(hero_power);
        state.hero_power_used = false;
        debug!("{} hero replaced, {} health", player, health);
        Ok(())
    }

    // === Hand and deck ===

    /// Draw the top card of `player`'s deck.
    ///
    /// An empty deck deals escalating fatigue damage to the hero; a full
    /// hand burns the card. Returns the card that reached the hand.
    pub fn draw(&mut self, player: PlayerId) -> EngineResult<Option<CardId>> {
        let Some(card) = self.players[player].deck.draw() else {
            let state = &mut self.players[player];
            state.fatigue += 1;
            let (hero, fatigue) = (state.hero, state.fatigue);
            self.deal_damage(None, hero, fatigue)?;
            let event = GameEvent::for_player(EventKind::Fatigue, player)
                .with_target(hero)
                .with_amount(fatigue);
            self.trigger(Emitter::Player(player), event)?;
            return Ok(None);
        };

        if self.players[player].hand_full(&self.config) {
            debug!("{} burns {}", player, card);
            let event = GameEvent::for_player(EventKind::CardBurned, player).with_card(card);
            self.trigger(Emitter::Player(player), event)?;
            return Ok(None);
        }

        let id = self.allocate();
        self.players[player].hand.push(CardInstance::new(id, card, player));
        let event = GameEvent::for_player(EventKind::CardDrawn, player).with_card(card);
        self.trigger(Emitter::Player(player), event)?;
        Ok(Some(card))
    }

    /// Put a card straight into `player`'s hand. Returns false if the hand
    /// was full and the card was lost.
    pub fn add_to_hand(&mut self, player: PlayerId, card: CardId) -> EngineResult<bool> {
        if !self.registry.contains(card) {
            return Err(GameError::UnknownCard(card));
        }
        if self.players[player].hand_full(&self.config) {
            return Ok(false);
        }
        let id = self.allocate();
        self.players[player].hand.push(CardInstance::new(id, card, player));
        Ok(true)
    }

    /// Discard a random card from `player`'s hand.
    pub fn discard_random(&mut self, player: PlayerId) -> EngineResult<Option<CardId>> {
        let len = self.players[player].hand.len();
        if len == 0 {
            return Ok(None);
        }
        let index = self.rng.gen_range_usize(0..len);
        let card = self.players[player].hand.remove(index).card_id;
        let event = GameEvent::for_player(EventKind::Discarded, player).with_card(card);
        self.trigger(Emitter::Player(player), event)?;
        Ok(Some(card))
    }

    // === Weapons ===

    /// Equip a weapon for `player`'s hero. The old weapon is destroyed.
    pub fn equip_weapon(&mut self, player: PlayerId, card: CardId) -> EngineResult<EntityId> {
        let registry = Arc::clone(&self.registry);
        let def = registry.get(card).ok_or(GameError::UnknownCard(card))?;
        let spec = def
            .weapon_spec()
            .ok_or_else(|| GameError::effect(None, format!("{} is not a weapon", def.name)))?;

        if let Some(old) = self.players[player].weapon {
            self.destroy(old)?;
        }

        let id = self.allocate();
        let mut weapon = Weapon::new(id, player, card, spec.attack, spec.durability);
        weapon.deathrattles = spec.deathrattles.clone();
        self.weapons.insert(id, weapon);
        self.players[player].weapon = Some(id);
        for ability in &spec.abilities {
            self.bind_ability(player, id, ability)?;
        }

        let event = GameEvent::for_player(EventKind::WeaponEquipped, player)
            .with_target(id)
            .with_card(card);
        self.trigger(Emitter::Player(player), event)?;
        Ok(id)
    }

    /// The weapon `player`'s hero holds, if any.
    #[must_use]
    pub fn equipped_weapon(&self, player: PlayerId) -> Option<&Weapon> {
        self.players[player]
            .weapon
            .and_then(|id| self.weapons.get(&id))
            .filter(|w| !w.removed)
    }

    // === Mana ===

    pub fn add_mana_filter(&mut self, player: PlayerId, filter: ManaFilter) {
        self.players[player].mana_filters.push(filter);
    }

    /// Gain an empty mana crystal.
    pub fn gain_mana_crystal(&mut self, player: PlayerId) {
        let cap = self.config.max_mana;
        let mana = &mut self.players[player].mana;
        mana.max = (mana.max + 1).min(cap);
    }

    /// Lose a mana crystal, full ones first.
    pub fn destroy_mana_crystal(&mut self, player: PlayerId) {
        let mana = &mut self.players[player].mana;
        mana.max = (mana.max - 1).max(0);
        mana.current = mana.current.min(mana.max);
    }

    /// Mana usable this turn only.
    pub fn gain_temporary_mana(&mut self, player: PlayerId, amount: i32) {
        let cap = self.config.max_mana;
        let mana = &mut self.players[player].mana;
        mana.current = (mana.current + amount).min(cap);
    }

    // === Secrets ===

    /// Put a secret into play for `player`. It stays dormant until the end
    /// of its owner's turn.
    pub(crate) fn play_secret(&mut self, player: PlayerId, card: CardId, id: EntityId) -> EngineResult<()> {
        self.secrets.insert(id, Secret::new(id, player, card));
        self.players[player].secrets.push(id);
        let event = GameEvent::for_player(EventKind::SecretPlayed, player)
            .with_target(id)
            .with_card(card);
        self.trigger(Emitter::Player(player), event)
    }

    /// Subscribe `player`'s dormant secrets. Already active secrets are left
    /// alone.
    pub fn activate_secrets(&mut self, player: PlayerId) -> EngineResult<()> {
        let registry = Arc::clone(&self.registry);
        for id in self.players[player].secrets.clone() {
            let Some(secret) = self.secrets.get(&id) else {
                continue;
            };
            if secret.active {
                continue;
            }
            let card = secret.card;
            let spec = registry
                .get(card)
                .and_then(|def| def.secret_spec())
                .ok_or(GameError::UnknownCard(card))?;
            let emitter = match spec.host {
                SecretHost::Opponent => Emitter::Player(player.other()),
                SecretHost::Own => Emitter::Player(player),
                SecretHost::Game => Emitter::Game,
            };
            let binding = Binding::new(spec.trigger, player, Effect::new(reveal_trampoline))
                .with_source(id)
                .with_subject(id);
            let listener = self.bind(emitter, binding)?;
            if let Some(secret) = self.secrets.get_mut(&id) {
                secret.active = true;
                secret.listener = Some((emitter, listener));
            }
            debug!("secret {} armed for {}", id, player);
        }
        Ok(())
    }

    /// Unsubscribe `player`'s secrets.
    pub fn deactivate_secrets(&mut self, player: PlayerId) {
        for id in self.players[player].secrets.clone() {
            let listener = self.secrets.get_mut(&id).and_then(|secret| {
                secret.active = false;
                secret.listener.take()
            });
            if let Some((emitter, listener)) = listener {
                self.unbind(emitter, listener);
            }
        }
    }

    /// Reveal a secret whose trigger fired: check its condition, take it out
    /// of play, run it, and announce it.
    pub(crate) fn reveal_secret(&mut self, id: EntityId, ctx: &EffectContext) -> EngineResult<()> {
        let Some(secret) = self.secrets.get(&id) else {
            return Ok(());
        };
        if !secret.active {
            return Ok(());
        }
        let (owner, card) = (secret.owner, secret.card);
        let registry = Arc::clone(&self.registry);
        let spec = registry
            .get(card)
            .and_then(|def| def.secret_spec())
            .ok_or(GameError::UnknownCard(card))?;

        let inner = EffectContext {
            controller: owner,
            source: Some(id),
            subject: Some(id),
            target: ctx.target,
            event: ctx.event.clone(),
        };
        if let Some(condition) = &spec.condition {
            if !condition.check(self, &inner) {
                return Ok(());
            }
        }

        if let Some(secret) = self.secrets.remove(&id) {
            if let Some((emitter, listener)) = secret.listener {
                self.unbind(emitter, listener);
            }
        }
        self.players[owner].secrets.retain(|&s| s != id);
        debug!("secret {} revealed for {}", id, owner);

        spec.effect.apply(self, &inner)?;
        let event = GameEvent::for_player(EventKind::SecretRevealed, owner)
            .with_source(id)
            .with_card(card);
        self.trigger(Emitter::Player(owner), event)
    }

    // === Targets and choices ===

    /// Characters a rule admits for `player`, in board order.
    #[must_use]
    pub fn legal_targets(&self, player: PlayerId, rule: TargetRule, source: Option<EntityId>) -> Targets {
        rule.legal_targets(self, player, source, Delivery::Minion)
    }

    /// Ask `player`'s agent to pick one of `options`. Without an agent the
    /// first option is taken.
    pub fn choose_target(&mut self, player: PlayerId, options: &[EntityId]) -> Option<EntityId> {
        if options.is_empty() {
            return None;
        }
        self.with_agent(player, |agent, game| agent.choose_target(game, player, options))
            .flatten()
            .filter(|choice| options.contains(choice))
            .or_else(|| options.first().copied())
    }

    /// All characters on a side: hero first, then minions left to right.
    #[must_use]
    pub fn characters_of(&self, player: PlayerId) -> Vec<EntityId> {
        std::iter::once(self.hero_id(player))
            .chain(self.minions(player).iter().copied())
            .collect()
    }

    /// Run `f` with `player`'s agent taken out of the game.
    pub(crate) fn with_agent<R>(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut dyn crate::agents::Agent, &Game) -> R,
    ) -> Option<R> {
        let mut agent = self.agents[player].take()?;
        let out = f(agent.as_mut(), self);
        self.agents[player] = Some(agent);
        Some(out)
    }
}

fn death_entry(character: &Character) -> DeferredEntry {
    if character.is_hero() {
        DeferredEntry::HeroDeath(character.id)
    } else {
        DeferredEntry::MinionDeath(character.id)
    }
}

fn reveal_trampoline(game: &mut Game, ctx: &EffectContext) -> EngineResult<()> {
    match ctx.subject {
        Some(secret) => game.reveal_secret(secret, ctx),
        None => Ok(()),
    }
}
