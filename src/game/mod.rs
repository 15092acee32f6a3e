//! The duel itself.
//!
//! ## Key Types
//!
//! - `Game`: arena of entities, both players, hubs, deferred queue, agents
//! - `PlayerSetup`: deck and hero power a player starts with
//! - `CloneMap`: identity table produced by [`Game::copy_with_map`]
//!
//! Operations are split by concern: `ops` (state changes used by cards),
//! `resolve` (draining the deferred queue), `turn` (turn flow and the
//! action pipeline), `combat` (attacks), `copy` (independent copies).

mod combat;
mod copy;
#[allow(clippy::module_inception)]
mod game;
mod ops;
mod resolve;
mod turn;

pub use copy::CloneMap;
pub use game::{Game, PlayerSetup};
