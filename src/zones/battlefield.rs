//! A player's battlefield: an ordered, bounded row of minions.
//!
//! Board order matters (adjacency auras, positional effects), so the row
//! is a plain `Vec` in left-to-right order. Removing a minion shifts every
//! minion to its right one slot left.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;

use super::ZonePosition;

/// Ordered minion ids for one player.
///
/// ```
/// use rust_duel::core::EntityId;
/// use rust_duel::zones::{Battlefield, ZonePosition};
///
/// let mut board = Battlefield::new(7);
/// board.insert(EntityId(1), ZonePosition::Top);
/// board.insert(EntityId(2), ZonePosition::Top);
/// board.insert(EntityId(3), ZonePosition::Index(1));
///
/// assert_eq!(board.ids(), &[EntityId(1), EntityId(3), EntityId(2)]);
/// assert_eq!(board.remove(EntityId(1)), Some(0));
/// assert_eq!(board.position_of(EntityId(2)), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battlefield {
    minions: Vec<EntityId>,
    capacity: usize,
}

impl Battlefield {
    /// Create an empty battlefield holding at most `capacity` minions.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            minions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Check if no more minions fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.minions.len() >= self.capacity
    }

    /// Insert a minion. `Top` is the right end, `Bottom` the left end.
    ///
    /// Returns the index it landed at, or `None` if the row is full.
    pub fn insert(&mut self, minion: EntityId, position: ZonePosition) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = match position {
            ZonePosition::Top => self.minions.len(),
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) => i.min(self.minions.len()),
        };
        self.minions.insert(index, minion);
        Some(index)
    }

    /// Remove a minion, returning the index it occupied.
    pub fn remove(&mut self, minion: EntityId) -> Option<usize> {
        let index = self.position_of(minion)?;
        self.minions.remove(index);
        Some(index)
    }

    /// Index of a minion.
    #[must_use]
    pub fn position_of(&self, minion: EntityId) -> Option<usize> {
        self.minions.iter().position(|&m| m == minion)
    }

    /// Check if a minion is on this battlefield.
    #[must_use]
    pub fn contains(&self, minion: EntityId) -> bool {
        self.minions.contains(&minion)
    }

    /// Minion at an index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.minions.get(index).copied()
    }

    /// Neighbors of a minion, left first.
    #[must_use]
    pub fn adjacent(&self, minion: EntityId) -> SmallVec<[EntityId; 2]> {
        let mut out = SmallVec::new();
        if let Some(index) = self.position_of(minion) {
            if index > 0 {
                out.push(self.minions[index - 1]);
            }
            if let Some(&right) = self.minions.get(index + 1) {
                out.push(right);
            }
        }
        out
    }

    /// All minions, left to right.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.minions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.minions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
