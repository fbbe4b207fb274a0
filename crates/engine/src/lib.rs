//! Session driver around the deterministic core.
//!
//! The core applies every operation it is asked to; rate limiting belongs to
//! the caller. This crate is that caller: it gates player actions on the piece
//! cooldowns, owns the high-score file and persists the best score when the
//! core reports game over.

pub mod controller;
pub mod highscore;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use controller::{action_ready, apply_action};
pub use highscore::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
pub use session::Session;
