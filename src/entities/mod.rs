//! Game objects held in a game's arena.
//!
//! ## Key Types
//!
//! - `Character`: a hero or minion with stats, status flags and a hub
//! - `Weapon`: a hero's weapon
//! - `Secret`: a hidden reactive effect
//! - `PlayerState`: one side of the duel

pub mod character;
pub mod weapon;
pub mod secret;
pub mod player;

pub use character::{Character, CharacterKind, Status};
pub use weapon::Weapon;
pub use secret::Secret;
pub use player::{Mana, ManaFilter, PlayerState, StatAura};
