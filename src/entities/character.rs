//! Characters: heroes and minions.
//!
//! A character's attack is the sum of its base value and three modifier
//! layers (permanent buffs, this-turn bonuses, auras). Health works the
//! same way for the maximum; `health` itself is the current value and may
//! go to zero or below, which is what marks the character for death.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Keywords};
use crate::core::{EntityId, GameConfig, PlayerId};
use crate::effects::Effect;
use crate::triggers::EventHub;

/// Hero or minion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Hero,
    Minion,
}

/// Status flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub taunt: bool,
    pub stealth: bool,
    pub frozen: bool,
    /// Frozen during the current turn; survives the owner's end of turn thaw.
    pub frozen_this_turn: bool,
    pub immune: bool,
    pub charge: bool,
    pub divine_shield: bool,
    pub windfury: bool,
    /// Freezes whatever it damages.
    pub freeze: bool,
    pub elusive: bool,
    pub silenced: bool,
}

/// A hero or minion in play.
#[derive(Clone, Debug)]
pub struct Character {
    pub id: EntityId,
    pub owner: PlayerId,
    /// The card a minion came from. Heroes have none.
    pub card: Option<CardId>,
    pub kind: CharacterKind,

    pub base_attack: i32,
    pub attack_buff: i32,
    /// Bonus that expires at the end of the turn.
    pub temp_attack: i32,
    pub aura_attack: i32,

    pub base_health: i32,
    pub health_buff: i32,
    pub aura_health: i32,
    /// Current health.
    pub health: i32,
    pub armor: i32,

    pub status: Status,
    pub attacks_this_turn: u32,
    /// Arrived this turn (summoning sickness).
    pub exhausted: bool,
    pub spell_damage: i32,
    pub deathrattle_bonus: u32,

    /// Position on the owner's battlefield. Unused for heroes.
    pub index: usize,
    /// Left play (dead or replaced). Kept so late references resolve.
    pub removed: bool,
    /// Destroyed outright; dies on resolution whatever its health.
    pub destroyed: bool,

    pub deathrattles: Vec<Effect>,
    pub hub: EventHub,
    pub counters: FxHashMap<String, i64>,
}

impl Character {
    /// Create a hero.
    #[must_use]
    pub fn hero(id: EntityId, owner: PlayerId, health: i32) -> Self {
        Self::blank(id, owner, CharacterKind::Hero, None, 0, health)
    }

    /// Create a minion from its card's stats and keywords.
    #[must_use]
    pub fn minion(
        id: EntityId,
        owner: PlayerId,
        card: CardId,
        attack: i32,
        health: i32,
        keywords: &Keywords,
    ) -> Self {
        let mut minion = Self::blank(id, owner, CharacterKind::Minion, Some(card), attack, health);
        minion.status.taunt = keywords.taunt;
        minion.status.charge = keywords.charge;
        minion.status.stealth = keywords.stealth;
        minion.status.divine_shield = keywords.divine_shield;
        minion.status.windfury = keywords.windfury;
        minion.status.freeze = keywords.freeze;
        minion.status.elusive = keywords.elusive;
        minion.spell_damage = keywords.spell_damage;
        minion.deathrattle_bonus = keywords.deathrattle_bonus;
        minion.exhausted = true;
        minion
    }

    fn blank(
        id: EntityId,
        owner: PlayerId,
        kind: CharacterKind,
        card: Option<CardId>,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            id,
            owner,
            card,
            kind,
            base_attack: attack,
            attack_buff: 0,
            temp_attack: 0,
            aura_attack: 0,
            base_health: health,
            health_buff: 0,
            aura_health: 0,
            health,
            armor: 0,
            status: Status::default(),
            attacks_this_turn: 0,
            exhausted: false,
            spell_damage: 0,
            deathrattle_bonus: 0,
            index: 0,
            removed: false,
            destroyed: false,
            deathrattles: Vec::new(),
            hub: EventHub::new(),
            counters: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.kind == CharacterKind::Hero
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        self.kind == CharacterKind::Minion
    }

    /// Attack from the character itself, excluding any weapon.
    #[must_use]
    pub fn calculate_attack(&self) -> i32 {
        (self.base_attack + self.attack_buff + self.temp_attack + self.aura_attack).max(0)
    }

    /// Current maximum health.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.base_health + self.health_buff + self.aura_health
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health()
    }

    /// Health is at or below zero.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Attacks allowed per turn.
    #[must_use]
    pub fn max_attacks(&self, config: &GameConfig) -> u32 {
        if self.status.windfury {
            config.windfury_attacks
        } else {
            config.max_attacks
        }
    }

    /// Ready to attack, ignoring whether it has any attack to swing with.
    #[must_use]
    pub fn can_attack(&self, config: &GameConfig) -> bool {
        !self.removed
            && !self.status.frozen
            && self.attacks_this_turn < self.max_attacks(config)
            && (self.is_hero() || !self.exhausted || self.status.charge)
    }

    /// Apply a permanent stat change. Health gains also heal.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack_buff += attack;
        self.health_buff += health;
        if health > 0 {
            self.health += health;
        } else {
            self.health = self.health.min(self.max_health());
        }
    }

    /// Set the aura layer, keeping current health consistent.
    ///
    /// Growing aura health raises current health by the same amount;
    /// shrinking it only caps current health at the new maximum.
    pub fn set_aura(&mut self, attack: i32, health: i32) {
        self.aura_attack = attack;
        let delta = health - self.aura_health;
        self.aura_health = health;
        if delta > 0 {
            self.health += delta;
        } else if delta < 0 {
            self.health = self.health.min(self.max_health());
        }
    }

    /// Strip keyword abilities, buffs and deathrattles.
    ///
    /// Listeners and auras contributed by the character are removed by the
    /// game, which knows every hub.
    pub fn clear_for_silence(&mut self) {
        self.attack_buff = 0;
        self.temp_attack = 0;
        self.health_buff = 0;
        self.health = self.health.min(self.max_health());
        self.status = Status {
            silenced: true,
            ..Status::default()
        };
        self.spell_damage = 0;
        self.deathrattle_bonus = 0;
        self.deathrattles.clear();
    }

    /// Per-entity counter used by card effects.
    #[must_use]
    pub fn counter(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }
}
