//! Shape catalog - piece matrices and the wall-kick table
//!
//! Shapes are small binary matrices (row-major, `y` grows downward). Rotation
//! is the clockwise quarter turn of the matrix itself, so a rotated shape may
//! change width and height (the I piece is 4×1 flat and 1×4 upright).

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Largest side of any catalog shape.
pub const MAX_SHAPE_SIDE: usize = 4;

/// A binary piece matrix of at most 4×4 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of 0/1 values.
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W <= MAX_SHAPE_SIDE && H <= MAX_SHAPE_SIDE);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at (x, y) is filled. Out-of-matrix is empty.
    pub fn filled(&self, x: i8, y: i8) -> bool {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return false;
        }
        self.cells[y as usize][x as usize]
    }

    /// Offsets of every filled cell, row by row.
    pub fn minos(self) -> impl Iterator<Item = (i8, i8)> {
        (0..self.height as i8)
            .flat_map(move |y| (0..self.width as i8).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.filled(x, y))
    }

    /// Clockwise quarter turn: reverse the rows, then transpose.
    pub fn rotate_cw(self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// The filled cell with three filled orthogonal neighbours, if any.
    ///
    /// Only the T shape has one; spin corners are sampled around it.
    pub fn hub(&self) -> Option<(i8, i8)> {
        self.minos().find(|&(x, y)| {
            let neighbours = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)];
            neighbours
                .iter()
                .filter(|&&(nx, ny)| self.filled(nx, ny))
                .count()
                >= 3
        })
    }
}

const CATALOG: [ShapeMatrix; 7] = [
    // I
    ShapeMatrix::from_rows([[1, 1, 1, 1]]),
    // O
    ShapeMatrix::from_rows([[1, 1], [1, 1]]),
    // T
    ShapeMatrix::from_rows([[1, 1, 1], [0, 1, 0]]),
    // J
    ShapeMatrix::from_rows([[1, 1, 1], [1, 0, 0]]),
    // L
    ShapeMatrix::from_rows([[1, 1, 1], [0, 0, 1]]),
    // S
    ShapeMatrix::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z
    ShapeMatrix::from_rows([[1, 1, 0], [0, 1, 1]]),
];

/// Spawn-orientation matrix of a variant.
pub fn base_shape(kind: PieceKind) -> ShapeMatrix {
    CATALOG[kind.index()]
}

/// Kick candidates tried in order, indexed by the rotation the piece turns
/// *from*. Every list starts with the unshifted position.
pub type KickTable = [[(i8, i8); 5]; 4];

pub const KICK_TABLE: KickTable = [
    // from 0
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // from 1
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // from 2
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // from 3
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

pub fn kick_offsets(from: Rotation) -> &'static [(i8, i8); 5] {
    &KICK_TABLE[from.index() as usize]
}

/// Column a shape enters the board at: centred, rounding left.
pub fn spawn_column(shape: &ShapeMatrix) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8
}

/// Row every piece enters the board at.
pub const SPAWN_ROW: i8 = 0;
