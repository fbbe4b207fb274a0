//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of
//! the piece that locked there. Uses a flat array for cache locality.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows with y < 0 are the open spawn buffer above the board.

use arrayvec::ArrayVec;

use crate::shapes::ShapeMatrix;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Cells written by a single commit (a shape never has more than 16).
pub type CommittedCells = ArrayVec<(i8, i8), 16>;

/// Row indices removed by a line clear, bottom to top.
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Row-major (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a piece cell may not sit at (x, y): outside the side walls,
    /// below the floor, or on an occupied cell. Rows above the board are open.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        self.is_blocked_wide(x as i16, y as i16)
    }

    /// `is_blocked` on widened coordinates, so origin plus offset never wraps.
    pub(crate) fn is_blocked_wide(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i16 || y >= BOARD_HEIGHT as i16 {
            return true;
        }
        // In range for i8 here: 0 <= x < 10 and y < 20.
        y >= 0 && self.is_occupied(x as i8, y as i8)
    }

    /// Whether `shape` placed with its top-left corner at (x, y) overlaps a
    /// wall, the floor or a locked cell.
    pub fn collides(&self, shape: &ShapeMatrix, x: i8, y: i8) -> bool {
        shape
            .minos()
            .any(|(cx, cy)| self.is_blocked_wide(x as i16 + cx as i16, y as i16 + cy as i16))
    }

    /// Stamp `shape` into the board. Cells above the board are dropped.
    /// Returns the cells actually written.
    pub fn commit(&mut self, shape: &ShapeMatrix, x: i8, y: i8, color: Color) -> CommittedCells {
        let mut written = CommittedCells::new();
        for (cx, cy) in shape.minos() {
            let (Some(bx), Some(by)) = (x.checked_add(cx), y.checked_add(cy)) else {
                continue;
            };
            if by >= 0 && self.set(bx, by, Some(color)) {
                written.push((bx, by));
            }
        }
        written
    }

    pub fn is_row_occupied(&self, y: usize) -> bool {
        self.row(y).iter().any(|cell| cell.is_some())
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Terminal condition: anything locked in the top row.
    pub fn is_top_out(&self) -> bool {
        self.is_row_occupied(0)
    }

    fn row(&self, y: usize) -> &[Cell] {
        if y >= BOARD_HEIGHT as usize {
            return &[];
        }
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Remove every full row, compacting the rows above downward.
    /// Returns the removed row indices, bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y as u8);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Row-major cells, for snapshots and rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::base_shape;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn spawn_buffer_is_open() {
        let board = Board::new();
        let i = base_shape(PieceKind::I);
        assert!(!board.collides(&i, 3, -1));
        assert!(!board.collides(&i, 3, -5));
        // Side walls still apply above the board.
        assert!(board.collides(&i, 7, -1));
    }

    #[test]
    fn extreme_origins_do_not_wrap() {
        let mut board = Board::new();
        let i = base_shape(PieceKind::I);
        assert!(board.collides(&i, i8::MAX, 0));
        assert!(board.collides(&i, 0, i8::MAX));
        assert!(board.collides(&i, i8::MIN, 0));
        assert!(!board.collides(&i, 0, i8::MIN));
        assert!(board.is_blocked(i8::MAX, i8::MAX));

        let o = base_shape(PieceKind::O);
        assert!(board.commit(&o, 0, i8::MIN, Color::RED).is_empty());
        assert!(board.commit(&o, i8::MAX, 5, Color::RED).is_empty());
    }

    #[test]
    fn commit_drops_cells_above_board() {
        let mut board = Board::new();
        let o = base_shape(PieceKind::O);
        let written = board.commit(&o, 4, -1, Color::YELLOW);
        assert_eq!(written.as_slice(), &[(4, 0), (5, 0)]);
        assert!(board.is_top_out());
    }

    #[test]
    fn clear_full_rows_compacts() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 19, Some(Color::RED));
            board.set(x, 17, Some(Color::RED));
        }
        board.set(2, 18, Some(Color::BLUE));
        board.set(5, 16, Some(Color::GREEN));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(2, 19), Some(Some(Color::BLUE)));
        assert_eq!(board.get(5, 18), Some(Some(Color::GREEN)));
        assert!(!board.is_row_occupied(17));
    }
}
