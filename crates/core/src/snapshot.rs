//! Render-ready copy of a game session, filled in place each frame.

use crate::piece::ActivePiece;
use crate::shapes::ShapeMatrix;
use crate::types::{Cell, Color, GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

pub type BoardRows = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub shape: ShapeMatrix,
    pub color: Color,
    pub x: i8,
    pub y: i8,
    pub spin: bool,
}

impl ActiveSnapshot {
    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .minos()
            .map(move |(cx, cy)| (x.saturating_add(cx), y.saturating_add(cy)))
    }
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            shape: value.shape(),
            color: value.color(),
            x: value.x(),
            y: value.y(),
            spin: value.spin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub drop_ms: u32,
    pub lock_ms: u32,
    pub locking: bool,
}

/// Read-only copy of everything a front-end needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardRows,
    pub active: ActiveSnapshot,
    /// Landing row of the active piece.
    pub ghost_y: i8,
    pub hold: Option<PieceKind>,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub can_hold: bool,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub lines: u32,
    pub piece_count: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Active piece cells at the ghost row.
    pub fn ghost_cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let ghost = ActiveSnapshot {
            y: self.ghost_y,
            ..self.active
        };
        ghost.cells()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let shape = crate::shapes::base_shape(PieceKind::I);
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: ActiveSnapshot {
                kind: PieceKind::I,
                rotation: Rotation::North,
                shape,
                color: PieceKind::I.color(),
                x: crate::shapes::spawn_column(&shape),
                y: 0,
                spin: false,
            },
            ghost_y: 0,
            hold: None,
            next_queue: [PieceKind::I; NEXT_QUEUE_LEN],
            can_hold: true,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            lines: 0,
            piece_count: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
