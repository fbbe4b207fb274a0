//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and detects
//! the quit chord. Rate limiting of repeated keys is left to the engine's
//! cooldown gating.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
