//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rust_duel::cards::{CardId, CardRegistry};
use rust_duel::core::{Action, EntityId, GameConfig, PlayerId, PlayerMap};
use rust_duel::game::{Game, PlayerSetup};
use rust_duel::games::basic::{basic_registry, stacked_deck, BasicCards};
use rust_duel::zones::ZonePosition;

pub const FIRST: PlayerId = PlayerId::FIRST;
pub const SECOND: PlayerId = PlayerId::SECOND;

/// Rules for hand-built positions: decks in the given order, empty
/// opening hands, no coin.
pub fn bare_config() -> GameConfig {
    GameConfig::default().unshuffled().with_hand_sizes(0, 0)
}

/// A started game in the first player's first turn. Both decks are all
/// Chillwind Yetis, so every draw is known.
pub fn table() -> (Game, BasicCards) {
    table_with(bare_config())
}

/// Same as [`table`] with custom rules.
pub fn table_with(config: GameConfig) -> (Game, BasicCards) {
    let (registry, cards) = basic_registry();
    let deck = stacked_deck(&[cards.chillwind_yeti]);
    let game = build(config, &registry, deck.clone(), deck);
    (game, cards)
}

/// A started game with explicit decks.
pub fn build(
    config: GameConfig,
    registry: &Arc<CardRegistry>,
    first: Vec<CardId>,
    second: Vec<CardId>,
) -> Game {
    let setups = PlayerMap::from_pair(PlayerSetup::new(first), PlayerSetup::new(second));
    let mut game = Game::new(config, Arc::clone(registry), setups).unwrap();
    game.start().unwrap();
    game
}

/// Put a minion on `player`'s battlefield, ready to attack.
pub fn ready_minion(game: &mut Game, player: PlayerId, card: CardId) -> EntityId {
    let id = game.summon(player, card, ZonePosition::Top).unwrap().unwrap();
    game.character_mut(id).unwrap().exhausted = false;
    id
}

/// Put a card at the end of `player`'s hand and return its index.
pub fn in_hand(game: &mut Game, player: PlayerId, card: CardId) -> usize {
    assert!(game.add_to_hand(player, card).unwrap());
    game.hand(player).len() - 1
}

/// Give `player` a full pool of mana for this turn.
pub fn flood_mana(game: &mut Game, player: PlayerId) {
    let mana = &mut game.player_mut(player).mana;
    mana.max = 10;
    mana.current = 10;
}

/// End turns until it is `player`'s turn again.
pub fn pass_to(game: &mut Game, player: PlayerId) {
    loop {
        let current = game.current_player();
        game.perform(current, Action::EndTurn).unwrap();
        if game.current_player() == player {
            break;
        }
    }
}

/// Current health of a character.
pub fn health(game: &Game, id: EntityId) -> i32 {
    game.character(id).unwrap().health
}

/// Add one to a game counter. Handy for listeners that record what ran.
pub fn bump(game: &mut Game, key: &str) {
    game.set_counter(key.to_string(), game.counter(key) + 1);
}
