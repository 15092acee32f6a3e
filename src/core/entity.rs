//! Entity identification.
//!
//! Every object a game tracks by identity (heroes, minions, weapons,
//! secrets, cards in hand) has an `EntityId` allocated by the owning game.
//!
//! ## ID Layout
//!
//! Ids are handed out monotonically starting at [`EntityId::FIRST`] and are
//! never reused within a game. A copied game keeps the same ids, so an id
//! taken from one game names the corresponding object in any of its copies.
//!
//! ```
//! use rust_duel::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::new();
//! let hero = alloc.next();
//! let minion = alloc.next();
//!
//! assert_eq!(hero, EntityId::FIRST);
//! assert!(minion > hero);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The first id a game allocates.
    pub const FIRST: EntityId = EntityId(1);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic id source owned by a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at [`EntityId::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: EntityId::FIRST.0,
        }
    }

    /// Allocate the next id.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// The id the next allocation will return.
    #[must_use]
    pub const fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
