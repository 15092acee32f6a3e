//! Card instances - cards held in hand.
//!
//! A `CardInstance` is one physical copy of a card between being drawn and
//! being played, discarded, or burned. It gets an entity id on entering the
//! hand so effects can name a specific copy.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A card in a player's hand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this copy.
    pub entity_id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// The player holding the card.
    pub owner: PlayerId,
}

impl CardInstance {
    /// Create a new card instance.
    #[must_use]
    pub fn new(entity_id: EntityId, card_id: CardId, owner: PlayerId) -> Self {
        Self {
            entity_id,
            card_id,
            owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance() {
        let card = CardInstance::new(EntityId(12), CardId::new(3), PlayerId::SECOND);

        assert_eq!(card.entity_id, EntityId(12));
        assert_eq!(card.card_id, CardId::new(3));
        assert_eq!(card.owner, PlayerId::SECOND);
    }

    #[test]
    fn test_serialization() {
        let card = CardInstance::new(EntityId(1), CardId::new(2), PlayerId::FIRST);
        let json = serde_json::to_string(&card).unwrap();
        let back: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
