//! Deferred resolution of deaths and broken weapons.
//!
//! Effects in a duel resolve immediately as they happen; only removal from
//! play is deferred. The queue lives here, the resolution of each entry
//! lives on [`Game`](crate::game::Game) because it fires events and runs
//! deathrattles.

mod deferred;

pub use deferred::{DeferredEntry, DeferredQueue};

use serde::{Deserialize, Serialize};

/// Outcome of draining the deferred queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Nothing was pending.
    Idle,

    /// Entries were resolved and the game continues.
    Complete { resolved: u32 },

    /// Resolution ended the game.
    GameOver,
}
