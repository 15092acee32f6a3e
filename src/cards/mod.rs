//! Card catalog interface: definitions, behavior specs, instances, registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Name, cost, and [`CardBehavior`]
//! - `MinionSpec` / `WeaponSpec` / `SecretSpec` / `Targeted`: what a card
//!   creates and the callbacks it carries, tagged by trigger point
//! - `CardInstance`: A card held in hand
//! - `CardRegistry`: Card definition lookup

pub mod definition;
pub mod spec;
pub mod instance;
pub mod registry;

pub use definition::{CardBehavior, CardDefinition, CardId, CardType, Rarity, Tribe};
pub use spec::{
    AuraHost, AuraScope, CardFilter, FilterTarget, Keywords, ManaFilterSpec, MinionSpec,
    SecretHost, SecretSpec, StatAuraSpec, Targeted, TriggeredAbility, WeaponSpec,
};
pub use instance::CardInstance;
pub use registry::CardRegistry;
