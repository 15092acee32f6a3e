//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the card catalog a game is played with. It is
//! built once, then shared read-only (behind an `Arc`) by a game and all
//! of its copies.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardRegistry, MinionSpec};
///
/// let mut registry = CardRegistry::new();
/// let yeti = registry.add(CardDefinition::minion("Chillwind Yeti", 4, MinionSpec::new(4, 5)));
///
/// let found = registry.get(yeti).unwrap();
/// assert_eq!(found.name, "Chillwind Yeti");
/// assert_eq!(registry.by_name("Chillwind Yeti"), Some(yeti));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    names: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card under the next free ID and return it.
    ///
    /// A card with an already registered name replaces the name lookup
    /// but keeps both definitions reachable by id.
    pub fn add(&mut self, mut card: CardDefinition) -> CardId {
        while self.cards.contains_key(&CardId::new(self.next_id)) {
            self.next_id += 1;
        }
        let id = CardId::new(self.next_id);
        self.next_id += 1;

        card.id = id;
        self.names.insert(card.name.clone(), id);
        self.cards.insert(id, card);
        id
    }

    /// Register a card under the id it already carries.
    ///
    /// Returns false (and leaves the registry unchanged) if that id is taken.
    pub fn register(&mut self, card: CardDefinition) -> bool {
        if self.cards.contains_key(&card.id) {
            return false;
        }
        self.names.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
        true
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Look up a card id by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CardId> {
        self.names.get(name).copied()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values().filter(move |c| c.card_type() == card_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::spec::{MinionSpec, Targeted, WeaponSpec};

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut registry = CardRegistry::new();
        let a = registry.add(CardDefinition::minion("A", 1, MinionSpec::new(1, 1)));
        let b = registry.add(CardDefinition::minion("B", 2, MinionSpec::new(2, 2)));

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(registry.get(b).map(|c| c.id), Some(b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_rejects_taken_id() {
        let mut registry = CardRegistry::new();
        let id = registry.add(CardDefinition::minion("A", 1, MinionSpec::new(1, 1)));

        let mut clash = CardDefinition::minion("B", 1, MinionSpec::new(1, 1));
        clash.id = id;
        assert!(!registry.register(clash));
        assert_eq!(registry.by_name("B"), None);

        let mut fresh = CardDefinition::minion("C", 1, MinionSpec::new(1, 1));
        fresh.id = CardId::new(40);
        assert!(registry.register(fresh));

        // add() skips ids taken by register()
        let next = registry.add(CardDefinition::minion("D", 1, MinionSpec::new(1, 1)));
        assert_ne!(next, CardId::new(40));
    }

    #[test]
    fn test_find_by_type() {
        let mut registry = CardRegistry::new();
        registry.add(CardDefinition::minion("A", 1, MinionSpec::new(1, 1)));
        registry.add(CardDefinition::weapon("Axe", 2, WeaponSpec::new(3, 2)));
        registry.add(CardDefinition::spell("Zap", 1, Targeted::untargeted(|_, _| Ok(()))));

        assert_eq!(registry.find_by_type(CardType::Weapon).count(), 1);
        assert_eq!(registry.find_by_type(CardType::Minion).count(), 1);
        assert!(!registry.is_empty());
        assert!(registry.by_name("missing").is_none());
    }
}
