//! Events emitted by the game state for observers (rendering, audio, effects,
//! persistence). Drained with [`crate::GameState::drain_events`].

use crate::board::{ClearedRows, CommittedCells};
use crate::types::{Color, GamePhase, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A player move succeeded.
    Moved { dx: i8, dy: i8 },
    /// A rotation was accepted; `spin` is the piece's spin flag afterwards.
    Rotated { spin: bool },
    /// Every kick candidate collided.
    RotationFailed,
    HardDropped { distance: u8 },
    /// `kind` went into the hold slot.
    Held { kind: PieceKind },
    /// The active piece was committed; `cells` are the board cells written.
    PieceLocked {
        cells: CommittedCells,
        color: Color,
        spin: bool,
    },
    /// Only emitted when line clearing is enabled.
    LinesCleared { rows: ClearedRows },
    /// Terminal condition. `high_score` is already `max(score, prior best)`.
    GameOver { score: u32, high_score: u32 },
    PhaseChanged { phase: GamePhase },
}
