//! Deferred death resolution (Hearthstone-style).
//!
//! Characters that reach zero health, and weapons that break, are not
//! removed on the spot. They are marked and queued here; the game drains
//! the queue at the end of every externally visible action, so every
//! damage event of that action sees the board as it was.
//!
//! ## Behavior
//!
//! - `mark()`: queue an entry once; repeated marks while pending are no-ops
//! - `pop()`: take the oldest entry (FIFO)
//! - resolving an entry may mark more entries; they join the same drain
//! - `marked_this_action()`: how many minions the current action marked,
//!   used by effects that scale with simultaneous deaths
//! - `finish()`: release an entry; only minions that left play count
//!   toward `resolved_this_turn()`

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::EntityId;

/// Something waiting to leave play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeferredEntry {
    /// A minion at or below zero health, or destroyed outright.
    MinionDeath(EntityId),
    /// A hero at or below zero health, or destroyed outright.
    HeroDeath(EntityId),
    /// A weapon out of durability, or destroyed outright.
    WeaponBreak(EntityId),
}

impl DeferredEntry {
    /// The entity this entry resolves.
    #[must_use]
    pub fn entity(&self) -> EntityId {
        match self {
            DeferredEntry::MinionDeath(id)
            | DeferredEntry::HeroDeath(id)
            | DeferredEntry::WeaponBreak(id) => *id,
        }
    }

    #[must_use]
    pub fn is_minion_death(&self) -> bool {
        matches!(self, DeferredEntry::MinionDeath(_))
    }
}

/// FIFO queue of pending removals with set semantics on membership.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    queue: VecDeque<DeferredEntry>,
    pending: FxHashSet<EntityId>,
    marked_this_action: u32,
    resolved_this_turn: u32,
}

impl DeferredQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an entry. Returns false if the entity is already pending.
    pub fn mark(&mut self, entry: DeferredEntry) -> bool {
        if !self.pending.insert(entry.entity()) {
            return false;
        }
        self.queue.push_back(entry);
        if entry.is_minion_death() {
            self.marked_this_action += 1;
        }
        true
    }

    /// Take the oldest entry.
    ///
    /// The entity stays "pending" until [`finish`](Self::finish) is called
    /// for it, so marks made while it resolves do not queue it again.
    pub fn pop(&mut self) -> Option<DeferredEntry> {
        self.queue.pop_front()
    }

    /// Release a popped entry. `left_play` tells whether its entity
    /// actually left play; an entry that was skipped or failed does not
    /// count as a death.
    pub fn finish(&mut self, entry: DeferredEntry, left_play: bool) {
        if self.pending.remove(&entry.entity()) && left_play && entry.is_minion_death() {
            self.resolved_this_turn += 1;
        }
    }

    /// Check whether an entity is waiting to leave play.
    #[must_use]
    pub fn is_pending(&self, entity: EntityId) -> bool {
        self.pending.contains(&entity)
    }

    /// Entries still queued, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DeferredEntry> {
        self.queue.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Minions marked since the current action began.
    #[must_use]
    pub fn marked_this_action(&self) -> u32 {
        self.marked_this_action
    }

    /// Minions that left play since the current turn began.
    #[must_use]
    pub fn resolved_this_turn(&self) -> u32 {
        self.resolved_this_turn
    }

    /// Start counting a new action.
    pub fn begin_action(&mut self) {
        self.marked_this_action = 0;
    }

    /// Start counting a new turn.
    pub fn begin_turn(&mut self) {
        self.resolved_this_turn = 0;
    }

}
