//! Core game logic - pure, deterministic, and testable
//!
//! Everything the falling-block rules need lives here: the board, the shape
//! catalog with its kick table, the active piece, the 7-bag randomizer, the
//! next queue, the hold slot and the session that ties them together. There
//! are no dependencies on terminals, files or wall-clock time, so the same
//! seed and the same inputs always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of colored cells, collision and commit
//! - [`shapes`]: piece matrices, clockwise rotation, kick offsets, spawn column
//! - [`piece`]: the active piece with its cooldowns, lock timer and spin flag
//! - [`rng`]: seeded LCG and the 7-bag
//! - [`queue`] / [`hold`]: next preview and the once-per-piece hold slot
//! - [`game_state`]: phases, gravity, the locking engine and events
//! - [`snapshot`]: render-ready copy of the session
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameConfig;
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! game.start();
//!
//! game.apply_move(1, 0);
//! game.apply_rotate();
//! game.apply_hard_drop();
//! assert!(game.tick(16));
//! assert_eq!(game.piece_count(), 1);
//!
//! // Events queue up until drained; drain once per frame.
//! assert!(game.drain_events().count() > 0);
//! ```
//!
//! # Timing
//!
//! The session keeps its own millisecond clock. Call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time; gravity, the lock countdown, cooldowns and the spin window
//! are all measured against that clock.

pub mod board;
pub mod events;
pub mod game_state;
pub mod hold;
pub mod piece;
pub mod queue;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ClearedRows, CommittedCells};
pub use events::GameEvent;
pub use game_state::{GameState, EVENT_CAPACITY};
pub use hold::HoldSlot;
pub use piece::ActivePiece;
pub use queue::NextQueue;
pub use rng::{Bag, SimpleRng};
pub use shapes::{base_shape, kick_offsets, spawn_column, ShapeMatrix, KICK_TABLE};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
