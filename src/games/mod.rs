//! Card sets built on the engine.

pub mod basic;
