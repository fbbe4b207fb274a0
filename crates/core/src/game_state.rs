//! Game state module - the session and its locking engine
//!
//! `GameState` owns the board, the active piece, the next queue, the hold slot
//! and the bag, and drives the per-piece state machine:
//!
//! - **Falling**: `locking == false`. Gravity moves the piece down every
//!   `gravity_ms`.
//! - **Locking**: entered when a downward move fails or on hard drop. The lock
//!   timer accumulates tick time; any successful vertical move returns the
//!   piece to Falling with the timer cleared.
//! - **Locked**: the timer reached the lock delay. The piece is stamped into
//!   the board, the top row is checked for the terminal condition, and the next
//!   piece is promoted from the queue.
//!
//! Time only advances through [`GameState::tick`]; every timestamp the piece
//! records comes from that simulation clock.

use std::collections::VecDeque;

use crate::board::Board;
use crate::events::GameEvent;
use crate::hold::HoldSlot;
use crate::piece::ActivePiece;
use crate::queue::NextQueue;
use crate::rng::Bag;
use crate::shapes::ShapeMatrix;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{GameConfig, GamePhase, PieceKind};

/// Undrained events kept before the oldest are dropped.
pub const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: ActivePiece,
    next: NextQueue,
    hold: HoldSlot,
    bag: Bag,
    phase: GamePhase,
    /// Simulation clock, advanced only by `tick`.
    clock_ms: u64,
    drop_timer_ms: u32,
    score: u32,
    /// Best score known to the session (prior best until game over).
    high_score: u32,
    lines: u32,
    /// Pieces locked without ending the game.
    piece_count: u32,
    /// Bounded; see [`GameState::drain_events`].
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a session with a shuffled bag. The session starts in the menu.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_bag(config, Bag::new(seed))
    }

    /// Create a session drawing from a prepared bag: empty board, active piece
    /// and the full next queue drawn in that order, empty hold slot.
    pub fn with_bag(config: GameConfig, mut bag: Bag) -> Self {
        let active = ActivePiece::spawn(bag.draw(), &config);
        let next = NextQueue::filled_from(&mut bag);
        Self {
            config,
            board: Board::new(),
            active,
            next,
            hold: HoldSlot::new(),
            bag,
            phase: GamePhase::Menu,
            clock_ms: 0,
            drop_timer_ms: 0,
            score: 0,
            high_score: 0,
            lines: 0,
            piece_count: 0,
            events: VecDeque::with_capacity(EVENT_CAPACITY),
        }
    }

    /// Prior best score, used for the terminal high-score comparison.
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    /// Start from a preset board instead of an empty one.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        self.next.as_slice()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn can_hold(&self) -> bool {
        self.hold.is_available()
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    /// Add points computed by an external scoring collaborator.
    pub fn award_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take every event emitted since the last drain, oldest first.
    ///
    /// Callers should drain once per frame. At most [`EVENT_CAPACITY`]
    /// events are kept; past that the oldest are discarded.
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.emit(GameEvent::PhaseChanged { phase });
    }

    /// Enter Playing from the menu or a pause. After game over the session is
    /// reset first. Returns false if already playing.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => false,
            GamePhase::Menu | GamePhase::Paused => {
                self.set_phase(GamePhase::Playing);
                true
            }
            GamePhase::GameOver => {
                self.reset();
                self.set_phase(GamePhase::Playing);
                true
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            GamePhase::Menu | GamePhase::GameOver => return false,
        }
        true
    }

    /// Leave a paused game for the menu. The game itself is kept.
    pub fn exit_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.set_phase(GamePhase::Menu);
        true
    }

    /// Fresh board, bag, queue and hold; the high score and config survive.
    /// The new bag continues from the current RNG state.
    pub fn reset(&mut self) {
        let high_score = self.high_score;
        let events = std::mem::take(&mut self.events);
        *self = Self::with_bag(self.config, Bag::new(self.bag.seed())).with_high_score(high_score);
        self.events = events;
    }

    /// Advance the simulation by `dt_ms`: gravity first, then the lock
    /// countdown. Returns true if the active piece locked during this tick.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if !self.playing() {
            return false;
        }
        self.clock_ms = self.clock_ms.saturating_add(dt_ms as u64);

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(dt_ms);
        if self.drop_timer_ms >= self.config.gravity_ms {
            if !self.active.try_move(0, 1, &self.board, self.clock_ms) {
                self.active.begin_locking();
            }
            self.drop_timer_ms = 0;
        }

        if self.active.update_lock_timer(dt_ms) {
            self.lock_active();
            return true;
        }
        false
    }

    /// Move the active piece. A blocked downward move means surface contact
    /// and starts the lock countdown.
    pub fn apply_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.playing() {
            return false;
        }
        let moved = self.active.try_move(dx, dy, &self.board, self.clock_ms);
        if moved {
            self.emit(GameEvent::Moved { dx, dy });
        } else if dy > 0 {
            self.active.begin_locking();
        }
        moved
    }

    pub fn apply_rotate(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        let rotated = self.active.rotate(&self.board, self.clock_ms);
        self.emit(if rotated {
            GameEvent::Rotated {
                spin: self.active.spin(),
            }
        } else {
            GameEvent::RotationFailed
        });
        rotated
    }

    /// Drop to the landing row. The piece commits on the next tick.
    pub fn apply_hard_drop(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        let distance = self.active.hard_drop(&self.board, self.clock_ms);
        self.emit(GameEvent::HardDropped { distance });
        true
    }

    /// Swap the active piece into the hold slot. With an empty slot the queue
    /// head becomes active; otherwise the held variant comes back as a fresh
    /// piece at the spawn position. Only once per locked piece.
    pub fn apply_hold(&mut self) -> bool {
        if !self.playing() {
            return false;
        }
        let current = self.active.kind();
        let Some(previous) = self.hold.swap(current) else {
            return false;
        };
        let incoming = match previous {
            Some(kind) => kind,
            None => self.next.advance(&mut self.bag),
        };
        self.active = ActivePiece::spawn(incoming, &self.config);
        self.emit(GameEvent::Held { kind: current });
        true
    }

    /// Where the active piece would land, without touching game state.
    pub fn ghost_position(&self) -> (i8, i8, ShapeMatrix) {
        let ghost = self.active.ghost(&self.board);
        (ghost.x(), ghost.y(), ghost.shape())
    }

    fn lock_active(&mut self) {
        let piece = self.active;
        let cells = self
            .board
            .commit(&piece.shape(), piece.x(), piece.y(), piece.color());
        self.emit(GameEvent::PieceLocked {
            cells,
            color: piece.color(),
            spin: piece.spin(),
        });

        if self.config.line_clear {
            let rows = self.board.clear_full_rows();
            if !rows.is_empty() {
                self.lines = self.lines.saturating_add(rows.len() as u32);
                self.emit(GameEvent::LinesCleared { rows });
            }
        }

        if self.board.is_top_out() {
            self.high_score = self.high_score.max(self.score);
            self.emit(GameEvent::GameOver {
                score: self.score,
                high_score: self.high_score,
            });
            self.set_phase(GamePhase::GameOver);
            return;
        }

        let kind = self.next.advance(&mut self.bag);
        self.active = ActivePiece::spawn(kind, &self.config);
        self.drop_timer_ms = 0;
        self.hold.rearm();
        self.piece_count = self.piece_count.wrapping_add(1);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (row, cells) in out
            .board
            .iter_mut()
            .zip(self.board.cells().chunks(self.board.width() as usize))
        {
            row.copy_from_slice(cells);
        }

        let (_, ghost_y, _) = self.ghost_position();
        out.active = ActiveSnapshot::from(&self.active);
        out.ghost_y = ghost_y;
        out.hold = self.hold.held();
        out.next_queue = self.next.to_array();
        out.can_hold = self.hold.is_available();
        out.phase = self.phase;
        out.score = self.score;
        out.high_score = self.high_score;
        out.lines = self.lines;
        out.piece_count = self.piece_count;
        out.timers = TimersSnapshot {
            drop_ms: self.drop_timer_ms,
            lock_ms: self.active.lock_timer_ms(),
            locking: self.active.locking(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Rotation, NEXT_QUEUE_LEN};

    fn playing_with(upcoming: &[PieceKind]) -> GameState {
        let mut state = GameState::with_bag(GameConfig::default(), Bag::with_upcoming(9, upcoming));
        state.start();
        state.drain_events().for_each(drop);
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default(), 12345);

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.piece_count, 0);
        assert!(state.hold.held().is_none());
        assert!(state.hold.is_available());
        assert_eq!(state.next.len(), NEXT_QUEUE_LEN);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn operations_are_ignored_outside_playing() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let before = state.active;
        assert!(!state.apply_move(1, 0));
        assert!(!state.apply_rotate());
        assert!(!state.apply_hard_drop());
        assert!(!state.apply_hold());
        assert!(!state.tick(10_000));
        assert_eq!(state.active, before);
        assert_eq!(state.clock_ms, 0);
    }

    #[test]
    fn soft_drop_to_floor_then_locking() {
        let mut state = playing_with(&[PieceKind::I]);
        assert_eq!(state.active.kind(), PieceKind::I);
        assert_eq!((state.active.x(), state.active.y()), (3, 0));

        for _ in 0..19 {
            assert!(state.apply_move(0, 1));
        }
        assert!(!state.active.locking());
        assert!(!state.apply_move(0, 1));
        assert!(state.active.locking());
    }

    #[test]
    fn gravity_moves_piece_down() {
        let mut state = playing_with(&[PieceKind::O]);
        assert!(!state.tick(499));
        assert_eq!(state.active.y(), 0);
        state.tick(1);
        assert_eq!(state.active.y(), 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn lock_commits_after_delay() {
        let mut state = playing_with(&[PieceKind::O, PieceKind::T]);
        while state.apply_move(0, 1) {}
        assert!(state.active.locking());

        assert!(!state.tick(250));
        assert!(!state.tick(249));
        assert!(state.tick(1));

        assert_eq!(state.board.get(4, 18), Some(Some(Color::YELLOW)));
        assert_eq!(state.board.get(5, 19), Some(Some(Color::YELLOW)));
        assert_eq!(state.active.kind(), PieceKind::T);
        assert_eq!(state.piece_count, 1);
        assert!(state.drain_events().any(|e| matches!(e, GameEvent::PieceLocked { .. })));
    }

    #[test]
    fn vertical_move_interrupts_lock() {
        let mut board = Board::new();
        // Ledge under the right half of the spawn area.
        board.set(5, 10, Some(Color::RED));
        let mut state = GameState::with_bag(GameConfig::default(), Bag::with_upcoming(1, &[PieceKind::O]))
            .with_board(board);
        state.start();

        while state.apply_move(0, 1) {}
        assert_eq!(state.active.y(), 8);
        state.tick(300);
        assert!(state.active.locking());

        // Slide off the ledge and fall one row.
        assert!(state.apply_move(-2, 0));
        assert!(state.active.locking());
        assert!(state.apply_move(0, 1));
        assert!(!state.active.locking());
        assert_eq!(state.active.lock_timer_ms(), 0);
    }

    #[test]
    fn hard_drop_locks_on_next_tick() {
        let mut state = playing_with(&[PieceKind::T]);
        assert!(state.apply_hard_drop());
        assert_eq!(state.piece_count, 0);
        assert!(state.tick(1));
        assert_eq!(state.piece_count, 1);
        assert!(state.hold.is_available());
    }

    #[test]
    fn undrained_events_keep_only_the_newest() {
        let mut state = playing_with(&[PieceKind::O]);
        for _ in 0..EVENT_CAPACITY {
            assert!(state.apply_move(1, 0));
            assert!(state.apply_move(-1, 0));
        }
        assert_eq!(state.events.len(), EVENT_CAPACITY);

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert_eq!(events[0], GameEvent::Moved { dx: 1, dy: 0 });
        assert_eq!(events.last(), Some(&GameEvent::Moved { dx: -1, dy: 0 }));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_hold() {
        let mut state = playing_with(&[PieceKind::S, PieceKind::Z, PieceKind::L]);
        assert_eq!(state.active.kind(), PieceKind::S);

        assert!(state.apply_hold());
        assert_eq!(state.hold.held(), Some(PieceKind::S));
        assert_eq!(state.active.kind(), PieceKind::Z);
        assert_eq!(state.next.peek(), Some(PieceKind::L));
        assert_eq!(state.next.len(), NEXT_QUEUE_LEN);

        // Gate is closed until the next lock.
        assert!(!state.apply_hold());
        assert_eq!(state.active.kind(), PieceKind::Z);

        state.apply_hard_drop();
        state.tick(1);
        assert_eq!(state.active.kind(), PieceKind::L);
        assert!(state.apply_hold());
        assert_eq!(state.active.kind(), PieceKind::S);
        assert_eq!(state.hold.held(), Some(PieceKind::L));
    }

    #[test]
    fn hold_swap_respawns_fresh_piece() {
        let mut state = playing_with(&[PieceKind::J, PieceKind::I]);
        state.apply_hold();
        state.apply_rotate();
        state.apply_move(1, 0);
        state.apply_hard_drop();
        state.tick(1);

        assert!(state.apply_hold());
        let active = state.active;
        assert_eq!(active.kind(), PieceKind::J);
        assert_eq!(active.rotation(), Rotation::North);
        assert_eq!((active.x(), active.y()), (4, 0));
        assert!(!active.locking());
    }

    #[test]
    fn spin_needs_quick_second_rotation() {
        let mut board = Board::new();
        board.set(4, 17, Some(Color::RED));
        board.set(4, 19, Some(Color::RED));
        board.set(6, 19, Some(Color::RED));
        let mut state = playing_with(&[PieceKind::T]).with_board(board);
        state.active = state.active.at(5, 17);

        assert!(state.apply_rotate());
        assert!(!state.active.spin());
        assert_eq!((state.active.x(), state.active.y()), (4, 17));

        state.clock_ms += 50;
        assert!(state.apply_rotate());
        assert!(state.active.spin());
        assert_eq!(state.active.rotation(), Rotation::South);
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::Rotated { spin: true }));
    }

    #[test]
    fn top_out_ends_game_once() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 1, Some(Color::BLUE));
        }
        let mut state = playing_with(&[PieceKind::I]).with_board(board).with_high_score(120);
        state.award_points(300);

        state.apply_hard_drop();
        assert!(state.tick(16));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 300);

        for _ in 0..10 {
            assert!(!state.tick(500));
        }
        let game_overs: Vec<_> = state
            .drain_events()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(
            game_overs,
            vec![GameEvent::GameOver {
                score: 300,
                high_score: 300
            }]
        );
    }

    #[test]
    fn restart_after_game_over_keeps_high_score() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 1, Some(Color::BLUE));
        }
        let mut state = playing_with(&[PieceKind::I]).with_board(board).with_high_score(70);
        state.apply_hard_drop();
        state.tick(1);
        assert!(state.game_over());

        assert!(state.start());
        assert!(state.playing());
        assert_eq!(state.high_score, 70);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
        assert_eq!(state.piece_count, 0);
        assert!(state.hold.held().is_none());
    }

    #[test]
    fn pause_and_menu_transitions() {
        let mut state = GameState::default();
        assert!(!state.toggle_pause());
        assert!(state.start());
        assert!(!state.start());
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.tick(1000));
        assert!(state.exit_to_menu());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn ghost_is_read_only() {
        let state = playing_with(&[PieceKind::T]);
        let before = state.active;
        let (x, y, shape) = state.ghost_position();
        assert_eq!((x, y), (4, 18));
        assert_eq!(shape, before.shape());
        assert_eq!(state.active, before);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut state = playing_with(&[PieceKind::T, PieceKind::O]);
        state.apply_hold();
        let snap = state.snapshot();
        assert_eq!(snap.active.kind, PieceKind::O);
        assert_eq!(snap.hold, Some(PieceKind::T));
        assert!(!snap.can_hold);
        assert_eq!(snap.ghost_y, 18);
        assert_eq!(snap.phase, GamePhase::Playing);
    }
}
