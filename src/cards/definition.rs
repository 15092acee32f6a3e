//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: name, cost,
//! and its [`CardBehavior`]. Anything that changes during play lives on
//! the entity the card becomes (a minion, a weapon, a secret) or on the
//! [`CardInstance`](super::CardInstance) while it sits in hand.

use serde::{Deserialize, Serialize};

use crate::effects::TargetRule;

use super::spec::{MinionSpec, SecretSpec, Targeted, WeaponSpec};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Flame Imp"),
/// not a specific copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Broad card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Minion,
    Spell,
    Weapon,
    Secret,
    HeroPower,
}

/// Card rarity. Informational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Minion tribe, used by tribe-sensitive effects and mana filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tribe {
    #[default]
    None,
    Beast,
    Demon,
    Dragon,
    Mech,
    Murloc,
    Pirate,
    Totem,
}

/// What a card does when played.
#[derive(Clone, Debug)]
pub enum CardBehavior {
    Minion(MinionSpec),
    Spell(Targeted),
    Weapon(WeaponSpec),
    Secret(SecretSpec),
    HeroPower(Targeted),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardType, MinionSpec, Tribe};
///
/// let imp = CardDefinition::minion("Voidwalker", 1, MinionSpec::new(1, 3).taunt())
///     .with_tribe(Tribe::Demon);
///
/// assert_eq!(imp.card_type(), CardType::Minion);
/// assert_eq!(imp.minion_spec().map(|m| m.health), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct CardDefinition {
    /// Assigned by the registry on insertion.
    pub id: CardId,

    /// Display name, unique within a registry.
    pub name: String,

    /// Printed mana cost.
    pub cost: i32,

    pub rarity: Rarity,

    pub tribe: Tribe,

    pub behavior: CardBehavior,
}

impl CardDefinition {
    /// Create a card definition. The id is assigned by the registry.
    pub fn new(name: impl Into<String>, cost: i32, behavior: CardBehavior) -> Self {
        Self {
            id: CardId::new(0),
            name: name.into(),
            cost,
            rarity: Rarity::default(),
            tribe: Tribe::default(),
            behavior,
        }
    }

    /// Create a minion card.
    pub fn minion(name: impl Into<String>, cost: i32, spec: MinionSpec) -> Self {
        Self::new(name, cost, CardBehavior::Minion(spec))
    }

    /// Create a spell card.
    pub fn spell(name: impl Into<String>, cost: i32, spell: Targeted) -> Self {
        Self::new(name, cost, CardBehavior::Spell(spell))
    }

    /// Create a weapon card.
    pub fn weapon(name: impl Into<String>, cost: i32, spec: WeaponSpec) -> Self {
        Self::new(name, cost, CardBehavior::Weapon(spec))
    }

    /// Create a secret card.
    pub fn secret(name: impl Into<String>, cost: i32, spec: SecretSpec) -> Self {
        Self::new(name, cost, CardBehavior::Secret(spec))
    }

    /// Create a hero power.
    pub fn hero_power(name: impl Into<String>, cost: i32, power: Targeted) -> Self {
        Self::new(name, cost, CardBehavior::HeroPower(power))
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the tribe (builder pattern).
    #[must_use]
    pub fn with_tribe(mut self, tribe: Tribe) -> Self {
        self.tribe = tribe;
        self
    }

    /// The card's category.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.behavior {
            CardBehavior::Minion(_) => CardType::Minion,
            CardBehavior::Spell(_) => CardType::Spell,
            CardBehavior::Weapon(_) => CardType::Weapon,
            CardBehavior::Secret(_) => CardType::Secret,
            CardBehavior::HeroPower(_) => CardType::HeroPower,
        }
    }

    /// Check if this card becomes a minion.
    #[must_use]
    pub fn is_minion(&self) -> bool {
        matches!(self.behavior, CardBehavior::Minion(_))
    }

    /// Check if this card is resolved as a spell (spells and secrets).
    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.behavior, CardBehavior::Spell(_) | CardBehavior::Secret(_))
    }

    /// The minion this card creates.
    #[must_use]
    pub fn minion_spec(&self) -> Option<&MinionSpec> {
        match &self.behavior {
            CardBehavior::Minion(spec) => Some(spec),
            _ => None,
        }
    }

    /// The weapon this card creates.
    #[must_use]
    pub fn weapon_spec(&self) -> Option<&WeaponSpec> {
        match &self.behavior {
            CardBehavior::Weapon(spec) => Some(spec),
            _ => None,
        }
    }

    /// The secret this card creates.
    #[must_use]
    pub fn secret_spec(&self) -> Option<&SecretSpec> {
        match &self.behavior {
            CardBehavior::Secret(spec) => Some(spec),
            _ => None,
        }
    }

    /// The targeted effect run when the card is played.
    ///
    /// For minions and weapons this is the battlecry.
    #[must_use]
    pub fn on_play(&self) -> Option<&Targeted> {
        match &self.behavior {
            CardBehavior::Minion(spec) => spec.battlecry.as_ref(),
            CardBehavior::Weapon(spec) => spec.battlecry.as_ref(),
            CardBehavior::Spell(spell) | CardBehavior::HeroPower(spell) => Some(spell),
            CardBehavior::Secret(_) => None,
        }
    }

    /// Targeting rule for playing this card.
    #[must_use]
    pub fn target_rule(&self) -> TargetRule {
        self.on_play().map_or(TargetRule::None, |t| t.rule)
    }
}
