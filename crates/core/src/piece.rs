//! Active piece kinematics
//!
//! The falling piece owns its rotated shape matrix, its board origin and all of
//! its per-piece timers. Every operation checks collision against the board
//! and either applies fully or leaves the piece untouched.
//!
//! Cooldowns are advisory: [`ActivePiece::try_move`] and
//! [`ActivePiece::rotate`] never consult them. Callers use
//! [`ActivePiece::move_ready`] / [`ActivePiece::rotate_ready`] to rate-limit
//! player input.

use crate::board::Board;
use crate::shapes::{base_shape, kick_offsets, spawn_column, ShapeMatrix, SPAWN_ROW};
use crate::types::{Color, GameConfig, PieceKind, Rotation};

/// Diagonal neighbours of the T hub.
const SPIN_CORNERS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: ShapeMatrix,
    x: i8,
    y: i8,
    rotation: Rotation,
    color: Color,
    last_move_ms: Option<u64>,
    last_rotate_ms: Option<u64>,
    last_drop_ms: Option<u64>,
    move_cooldown_ms: u32,
    rotate_cooldown_ms: u32,
    spin_window_ms: u32,
    lock_delay_ms: u32,
    lock_timer_ms: u32,
    locking: bool,
    spin: bool,
}

impl ActivePiece {
    /// A fresh piece in spawn orientation at the spawn column and row.
    pub fn spawn(kind: PieceKind, config: &GameConfig) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_column(&shape),
            y: SPAWN_ROW,
            rotation: Rotation::North,
            color: kind.color(),
            last_move_ms: None,
            last_rotate_ms: None,
            last_drop_ms: None,
            move_cooldown_ms: config.move_cooldown_ms,
            rotate_cooldown_ms: config.rotate_cooldown_ms,
            spin_window_ms: config.spin_window_ms,
            lock_delay_ms: config.lock_delay_ms,
            lock_timer_ms: 0,
            locking: false,
            spin: false,
        }
    }

    /// Same piece with its origin moved to (x, y), without a collision check.
    pub fn at(mut self, x: i8, y: i8) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> ShapeMatrix {
        self.shape
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn locking(&self) -> bool {
        self.locking
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn lock_delay_ms(&self) -> u32 {
        self.lock_delay_ms
    }

    pub fn spin(&self) -> bool {
        self.spin
    }

    pub fn last_move_ms(&self) -> Option<u64> {
        self.last_move_ms
    }

    pub fn last_rotate_ms(&self) -> Option<u64> {
        self.last_rotate_ms
    }

    pub fn last_drop_ms(&self) -> Option<u64> {
        self.last_drop_ms
    }

    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .minos()
            .map(move |(cx, cy)| (x.saturating_add(cx), y.saturating_add(cy)))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Whether the move cooldown has elapsed at `now_ms`.
    pub fn move_ready(&self, now_ms: u64) -> bool {
        self.last_move_ms
            .map_or(true, |t| now_ms.saturating_sub(t) > self.move_cooldown_ms as u64)
    }

    /// Whether the rotate cooldown has elapsed at `now_ms`.
    pub fn rotate_ready(&self, now_ms: u64) -> bool {
        self.last_rotate_ms
            .map_or(true, |t| now_ms.saturating_sub(t) > self.rotate_cooldown_ms as u64)
    }

    /// Translate by (dx, dy). On collision nothing changes and false is
    /// returned. Any successful move with `dy != 0` cancels a lock countdown;
    /// horizontal moves leave it running.
    /// A move whose target origin does not fit in `i8` fails the same way.
    pub fn try_move(&mut self, dx: i8, dy: i8, board: &Board, now_ms: u64) -> bool {
        let (Some(x), Some(y)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return false;
        };
        if board.collides(&self.shape, x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        self.last_move_ms = Some(now_ms);

        if dy != 0 {
            self.locking = false;
            self.lock_timer_ms = 0;
        }
        true
    }

    /// Rotate clockwise, trying the kick candidates of the current rotation in
    /// order; the first free one wins. If all five collide the piece is left
    /// exactly as it was.
    pub fn rotate(&mut self, board: &Board, now_ms: u64) -> bool {
        let rotated = self.shape.rotate_cw();

        let Some((x, y)) = kick_offsets(self.rotation)
            .iter()
            .filter_map(|&(dx, dy)| Some((self.x.checked_add(dx)?, self.y.checked_add(dy)?)))
            .find(|&(x, y)| !board.collides(&rotated, x, y))
        else {
            return false;
        };

        self.shape = rotated;
        self.rotation = self.rotation.rotate_cw();
        self.x = x;
        self.y = y;

        if self.kind.supports_spin_detection() {
            let within_window = self
                .last_rotate_ms
                .map_or(false, |t| now_ms.saturating_sub(t) < self.spin_window_ms as u64);
            self.spin = within_window && self.blocked_corners(board) >= 3;
        }

        self.last_rotate_ms = Some(now_ms);
        true
    }

    /// Number of blocked diagonal neighbours around the hub cell.
    pub fn blocked_corners(&self, board: &Board) -> usize {
        let Some((hx, hy)) = self.shape.hub() else {
            return 0;
        };
        let (hx, hy) = (self.x as i16 + hx as i16, self.y as i16 + hy as i16);
        SPIN_CORNERS
            .iter()
            .filter(|&&(dx, dy)| board.is_blocked_wide(hx + dx as i16, hy + dy as i16))
            .count()
    }

    /// Fall until blocked, then force the lock countdown to expire so the piece
    /// commits on the next lock check. Returns the number of rows fallen.
    pub fn hard_drop(&mut self, board: &Board, now_ms: u64) -> u8 {
        let mut distance = 0u8;
        while self.try_move(0, 1, board, now_ms) {
            distance = distance.saturating_add(1);
        }
        self.locking = true;
        self.lock_timer_ms = self.lock_delay_ms;
        self.last_drop_ms = Some(now_ms);
        distance
    }

    /// Enter the lock countdown without resetting an already running timer.
    pub fn begin_locking(&mut self) {
        self.locking = true;
    }

    /// Advance the lock countdown. Returns true once it has run out.
    /// The timer only runs while the piece is locking.
    pub fn update_lock_timer(&mut self, dt_ms: u32) -> bool {
        if !self.locking {
            return false;
        }
        self.lock_timer_ms = self.lock_timer_ms.saturating_add(dt_ms);
        self.lock_timer_ms >= self.lock_delay_ms
    }

    /// Landing position of this piece, as a disposable copy.
    pub fn ghost(&self, board: &Board) -> ActivePiece {
        let mut ghost = *self;
        while let Some(y) = ghost.y.checked_add(1) {
            if board.collides(&ghost.shape, ghost.x, y) {
                break;
            }
            ghost.y = y;
        }
        ghost
    }
}
