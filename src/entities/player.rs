//! Per-player state.
//!
//! ## Key Types
//!
//! - `PlayerState`: hero, weapon, battlefield, hand, deck, mana, secrets
//! - `Mana`: crystals and the pool available this turn
//! - `ManaFilter`: a live cost change
//! - `StatAura`: a live attack/health bonus over friendly minions

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{AuraScope, CardDefinition, CardFilter, CardId, CardInstance};
use crate::core::{EntityId, GameConfig, PlayerId};
use crate::triggers::EventHub;
use crate::zones::{Battlefield, Deck};

/// Mana crystals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mana {
    /// Unspent mana this turn.
    pub current: i32,
    /// Crystals owned.
    pub max: i32,
}

impl Mana {
    /// Add a crystal at turn start and refill.
    pub fn refill(&mut self, cap: i32) {
        self.max = (self.max + 1).min(cap);
        self.current = self.max;
    }

    /// Spend mana. Caller has checked affordability.
    pub fn spend(&mut self, amount: i32) {
        self.current -= amount.max(0);
    }
}

/// A live cost change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaFilter {
    /// Minion that imposes it; `None` for effect-granted filters.
    pub source: Option<EntityId>,
    pub amount: i32,
    pub applies_to: CardFilter,
    pub min: i32,
    /// Removed after the next matching card is played.
    pub one_shot: bool,
    /// Removed at the end of the owner's turn.
    pub until_turn_end: bool,
}

impl ManaFilter {
    /// A persistent filter with no source.
    #[must_use]
    pub fn new(amount: i32, applies_to: CardFilter, min: i32) -> Self {
        Self {
            source: None,
            amount,
            applies_to,
            min,
            one_shot: false,
            until_turn_end: false,
        }
    }

    #[must_use]
    pub fn from_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    #[must_use]
    pub fn until_turn_end(mut self) -> Self {
        self.until_turn_end = true;
        self
    }
}

/// A live attack/health bonus over friendly minions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatAura {
    pub source: EntityId,
    pub scope: AuraScope,
    pub attack: i32,
    pub health: i32,
}

/// Everything one player owns.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub id: PlayerId,
    pub hero: EntityId,
    pub weapon: Option<EntityId>,
    pub board: Battlefield,
    pub hand: Vec<CardInstance>,
    pub deck: Deck,
    pub mana: Mana,
    /// Secrets in play, in the order they were played.
    pub secrets: Vec<EntityId>,
    pub mana_filters: Vec<ManaFilter>,
    pub stat_auras: Vec<StatAura>,
    /// Damage the next empty-deck draw deals.
    pub fatigue: i32,
    pub hero_power: Option<CardId>,
    pub hero_power_used: bool,
    /// Cards of minions that died, in order of death.
    pub graveyard: Vec<CardId>,
    pub cards_played_this_turn: u32,
    pub hub: EventHub,
    pub counters: FxHashMap<String, i64>,
}

impl PlayerState {
    /// Create a player with an empty board and hand.
    #[must_use]
    pub fn new(
        id: PlayerId,
        hero: EntityId,
        deck: Deck,
        hero_power: Option<CardId>,
        config: &GameConfig,
    ) -> Self {
        Self {
            id,
            hero,
            weapon: None,
            board: Battlefield::new(config.max_board_size),
            hand: Vec::with_capacity(config.max_hand_size),
            deck,
            mana: Mana::default(),
            secrets: Vec::new(),
            mana_filters: Vec::new(),
            stat_auras: Vec::new(),
            fatigue: 0,
            hero_power,
            hero_power_used: false,
            graveyard: Vec::new(),
            cards_played_this_turn: 0,
            hub: EventHub::new(),
            counters: FxHashMap::default(),
        }
    }

    /// Cost of a card after every applicable filter.
    ///
    /// The discount is the sum of matching filter amounts; the floor is the
    /// highest `min` among them, and never below zero.
    #[must_use]
    pub fn mana_cost(&self, card: &CardDefinition) -> i32 {
        let mut discount = 0;
        let mut floor = 0;
        for filter in self.mana_filters.iter().filter(|f| f.applies_to.matches(card)) {
            discount += filter.amount;
            floor = floor.max(filter.min);
        }
        if discount == 0 {
            return card.cost.max(0);
        }
        (card.cost - discount).max(floor.min(card.cost)).max(0)
    }

    /// Drop one-shot filters matching a card that was just played.
    pub fn consume_one_shot_filters(&mut self, card: &CardDefinition) {
        self.mana_filters
            .retain(|f| !(f.one_shot && f.applies_to.matches(card)));
    }

    /// Hand is at capacity.
    #[must_use]
    pub fn hand_full(&self, config: &GameConfig) -> bool {
        self.hand.len() >= config.max_hand_size
    }

    /// Cards in hand by definition id.
    pub fn hand_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hand.iter().map(|c| c.card_id)
    }

    /// Forget every filter and aura a source contributed.
    pub fn remove_contributions(&mut self, source: EntityId) {
        self.mana_filters.retain(|f| f.source != Some(source));
        self.stat_auras.retain(|a| a.source != source);
    }

    #[must_use]
    pub fn counter(&self, key: &str) -> i64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, key: impl Into<String>, value: i64) {
        self.counters.insert(key.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{MinionSpec, Targeted};

    fn player() -> PlayerState {
        PlayerState::new(PlayerId::FIRST, EntityId(1), Deck::default(), None, &GameConfig::default())
    }

    fn minion(cost: i32) -> CardDefinition {
        CardDefinition::minion("M", cost, MinionSpec::new(1, 1))
    }

    #[test]
    fn test_mana_refill_caps() {
        let mut mana = Mana::default();
        for _ in 0..12 {
            mana.refill(10);
        }
        assert_eq!(mana.max, 10);
        assert_eq!(mana.current, 10);

        mana.spend(3);
        assert_eq!(mana.current, 7);
    }

    #[test]
    fn test_mana_cost_without_filters() {
        assert_eq!(player().mana_cost(&minion(4)), 4);
    }

    #[test]
    fn test_portal_style_filter_respects_minimum() {
        let mut p = player();
        p.mana_filters.push(ManaFilter::new(2, CardFilter::Minions, 1));

        assert_eq!(p.mana_cost(&minion(4)), 2);
        assert_eq!(p.mana_cost(&minion(2)), 1);
        // A card already below the minimum is not raised
        assert_eq!(p.mana_cost(&minion(0)), 0);

        let spell = CardDefinition::spell("S", 3, Targeted::untargeted(|_, _| Ok(())));
        assert_eq!(p.mana_cost(&spell), 3);
    }

    #[test]
    fn test_filters_stack() {
        let mut p = player();
        p.mana_filters.push(ManaFilter::new(1, CardFilter::Any, 0));
        p.mana_filters.push(ManaFilter::new(2, CardFilter::Minions, 1));

        assert_eq!(p.mana_cost(&minion(5)), 2);
        assert_eq!(p.mana_cost(&minion(3)), 1);
    }

    #[test]
    fn test_negative_filter_raises_cost() {
        let mut p = player();
        p.mana_filters.push(ManaFilter::new(-5, CardFilter::Minions, 0));
        assert_eq!(p.mana_cost(&minion(1)), 6);
    }

    #[test]
    fn test_one_shot_filter_consumed() {
        let mut p = player();
        p.mana_filters.push(ManaFilter::new(1, CardFilter::Minions, 0).one_shot());
        p.mana_filters.push(ManaFilter::new(1, CardFilter::Spells, 0).one_shot());

        p.consume_one_shot_filters(&minion(2));
        assert_eq!(p.mana_filters.len(), 1);
        assert_eq!(p.mana_filters[0].applies_to, CardFilter::Spells);
    }

    #[test]
    fn test_remove_contributions() {
        let mut p = player();
        let portal = EntityId(8);
        p.mana_filters.push(ManaFilter::new(2, CardFilter::Minions, 1).from_source(portal));
        p.mana_filters.push(ManaFilter::new(1, CardFilter::Any, 0));
        p.stat_auras.push(StatAura {
            source: portal,
            scope: AuraScope::OtherFriendly,
            attack: 1,
            health: 1,
        });

        p.remove_contributions(portal);

        assert_eq!(p.mana_filters.len(), 1);
        assert!(p.stat_auras.is_empty());
    }
}
