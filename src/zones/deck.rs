//! A player's deck.
//!
//! Stored as an `im::Vector` so copying a game shares the deck's structure
//! until one side changes it. The top of the deck is the front.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::GameRng;

use super::ZonePosition;

/// Ordered card ids, top first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardId>,
}

impl Deck {
    /// Create a deck from cards in draw order.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<CardId> {
        self.cards.pop_front()
    }

    /// Put a card back. `Top` is drawn next.
    pub fn insert(&mut self, card: CardId, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.cards.push_front(card),
            ZonePosition::Bottom => self.cards.push_back(card),
            ZonePosition::Index(i) => {
                let index = i.min(self.cards.len());
                self.cards.insert(index, card);
            }
        }
    }

    /// Put a card back at a random position.
    pub fn insert_random(&mut self, card: CardId, rng: &mut GameRng) {
        let index = rng.gen_range_usize(0..self.cards.len() + 1);
        self.insert(card, ZonePosition::Index(index));
    }

    /// Shuffle the deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardId> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Cards in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
