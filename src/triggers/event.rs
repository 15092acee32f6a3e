//! Game event types.
//!
//! Events are fired on an emitter's hub whenever something observable
//! happens. The engine decides which hubs receive each kind; see
//! [`Emitter`](super::Emitter).

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    TurnStarted,
    TurnEnded,
    CardDrawn,
    /// A draw with a full hand destroyed the card.
    CardBurned,
    /// A draw from an empty deck.
    Fatigue,
    CardPlayed,
    /// Fired after a spell resolved.
    SpellCast,
    /// A minion was put on the battlefield from hand, before its battlecry.
    MinionPlaced,
    /// A minion was played from hand, after its battlecry.
    MinionPlayed,
    /// Any minion entered the battlefield.
    MinionSummoned,
    Attack,
    Attacked,
    Damaged,
    Healed,
    Silenced,
    Frozen,
    /// Fired on the dying entity's own hub.
    Died,
    /// Fired on player and game hubs after a minion left play.
    MinionDied,
    WeaponEquipped,
    WeaponDestroyed,
    SecretPlayed,
    SecretRevealed,
    HeroPowerUsed,
    Discarded,
    ArmorGained,
    /// Catalog-defined event.
    Custom(u32),
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Custom(id) => write!(f, "Custom({id})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A game event with contextual data.
///
/// - `source`: the entity that caused the event (attacker, damage source)
/// - `target`: the entity affected (damaged character, summoned minion)
/// - `player`: the player the event belongs to
/// - `amount`: damage, healing, armor, or fatigue amount
/// - `card`: the card involved (drawn, played, burned)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub player: Option<PlayerId>,
    pub amount: i32,
    pub card: Option<CardId>,
}

impl GameEvent {
    /// Create a new event with just a kind.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            player: None,
            amount: 0,
            card: None,
        }
    }

    /// Create an event belonging to a player.
    #[must_use]
    pub fn for_player(kind: EventKind, player: PlayerId) -> Self {
        Self::new(kind).with_player(player)
    }

    /// Set the source entity (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the source entity if there is one.
    #[must_use]
    pub fn with_source_opt(mut self, source: Option<EntityId>) -> Self {
        self.source = source;
        self
    }

    /// Set the target entity (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the associated player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the amount (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Set the card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card = Some(card);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = GameEvent::for_player(EventKind::Damaged, PlayerId::SECOND)
            .with_source(EntityId(3))
            .with_target(EntityId(8))
            .with_amount(4);

        assert_eq!(event.kind, EventKind::Damaged);
        assert_eq!(event.player, Some(PlayerId::SECOND));
        assert_eq!(event.source, Some(EntityId(3)));
        assert_eq!(event.target, Some(EntityId(8)));
        assert_eq!(event.amount, 4);
        assert_eq!(event.card, None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::MinionDied.to_string(), "MinionDied");
        assert_eq!(EventKind::Custom(7).to_string(), "Custom(7)");
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::new(EventKind::CardDrawn).with_card(CardId::new(2));
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
