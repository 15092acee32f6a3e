//! Event hubs and the events fired on them.
//!
//! ## Key Components
//!
//! - [`EventKind`] / [`GameEvent`]: what happened, with context
//! - [`Emitter`]: which hub an event is fired on
//! - [`Binding`] / [`Listener`] / [`ListenerId`]: a subscribed callback
//! - [`EventHub`]: ordered listener storage with snapshot firing support
//!
//! Dispatch itself lives on [`Game`](crate::game::Game), because callbacks
//! mutate the whole game while a hub is being walked.

pub mod event;
pub mod hub;

pub use event::{EventKind, GameEvent};
pub use hub::{Binding, Emitter, EventHub, Listener, ListenerId};
