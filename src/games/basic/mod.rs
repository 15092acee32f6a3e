//! A small basic card set built only from the card catalog interface.
//!
//! Used by the integration tests and benchmarks, and as a worked example
//! of writing cards: battlecries, deathrattles, triggered abilities,
//! stat auras, cost filters, weapons, a secret, hero powers, and a card
//! that replaces the hero.
//!
//! ```
//! use rust_duel::agents::DoNothingAgent;
//! use rust_duel::game::PlayerSetup;
//! use rust_duel::games::basic::{basic_registry, game_for, stacked_deck};
//!
//! let (registry, cards) = basic_registry();
//! let deck = stacked_deck(&[cards.chillwind_yeti, cards.fireball]);
//! let mut game = game_for(
//!     &registry,
//!     PlayerSetup::new(deck.clone()).with_hero_power(cards.fireblast),
//!     PlayerSetup::new(deck).with_hero_power(cards.armor_up),
//!     Box::new(DoNothingAgent),
//!     Box::new(DoNothingAgent),
//!     7,
//! )
//! .unwrap();
//! game.run(4).unwrap();
//! assert_eq!(game.history().len(), 4);
//! assert!(!game.is_over());
//! ```

mod cards;

pub use cards::BasicCards;

use std::sync::Arc;

use crate::agents::Agent;
use crate::cards::{CardId, CardRegistry};
use crate::core::{EngineResult, GameConfig, PlayerMap};
use crate::game::{Game, PlayerSetup};

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 30;

/// A registry holding the basic set, and the set's card ids.
#[must_use]
pub fn basic_registry() -> (Arc<CardRegistry>, BasicCards) {
    let mut registry = CardRegistry::new();
    let cards = BasicCards::register(&mut registry);
    (Arc::new(registry), cards)
}

/// Repeat `pattern` until the deck holds [`DECK_SIZE`] cards.
#[must_use]
pub fn stacked_deck(pattern: &[CardId]) -> Vec<CardId> {
    pattern.iter().copied().cycle().take(DECK_SIZE).collect()
}

/// A seeded game with default rules, the coin, and the given agents.
pub fn game_for(
    registry: &Arc<CardRegistry>,
    first: PlayerSetup,
    second: PlayerSetup,
    first_agent: Box<dyn Agent>,
    second_agent: Box<dyn Agent>,
    seed: u64,
) -> EngineResult<Game> {
    let mut config = GameConfig::default().with_seed(seed);
    if let Some(coin) = registry.by_name("The Coin") {
        config = config.with_coin(coin);
    }
    let game = Game::new(config, Arc::clone(registry), PlayerMap::from_pair(first, second))?;
    Ok(game.with_agents(first_agent, second_agent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_registry_holds_whole_set() {
        let (registry, cards) = basic_registry();
        assert_eq!(registry.len(), 43);
        assert_eq!(registry.by_name("Chillwind Yeti"), Some(cards.chillwind_yeti));
        assert_eq!(registry.find_by_type(CardType::HeroPower).count(), 4);
        assert_eq!(registry.find_by_type(CardType::Weapon).count(), 4);
        assert_eq!(registry.find_by_type(CardType::Secret).count(), 1);
    }

    #[test]
    fn test_stacked_deck() {
        let (_, cards) = basic_registry();
        let deck = stacked_deck(&[cards.flame_imp, cards.voidwalker]);
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck[0], cards.flame_imp);
        assert_eq!(deck[1], cards.voidwalker);
        assert_eq!(deck[29], cards.voidwalker);
    }
}
