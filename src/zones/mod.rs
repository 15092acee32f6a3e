//! Ordered card locations: battlefields and decks.
//!
//! ## Key Types
//!
//! - `Battlefield`: bounded left-to-right minion row
//! - `Deck`: persistent draw pile
//! - `ZonePosition`: position specifier for inserts

pub mod battlefield;
pub mod deck;

pub use battlefield::Battlefield;
pub use deck::Deck;

use serde::{Deserialize, Serialize};

/// Where to put something in an ordered zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// The end that is drawn next (deck) or the right end (battlefield).
    Top,
    /// The opposite end.
    Bottom,
    /// A specific index, clamped to the zone length.
    Index(usize),
}
