//! Shared data structures and constants.
//!
//! Everything in this crate is plain data with no external dependencies, so it
//! can be used by the core state machine, the session driver and the terminal
//! front-end alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Rows above the board (negative `y`) are an open spawn buffer.
//!
//! # Timing Constants
//!
//! All times are milliseconds on the simulation clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame step used by the terminal runner |
//! | `GRAVITY_MS` | 500 | Interval between gravity steps |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a resting piece commits |
//! | `MOVE_COOLDOWN_MS` | 100 | Advisory rate limit for moves |
//! | `ROTATE_COOLDOWN_MS` | 200 | Advisory rate limit for rotations |
//! | `SPIN_WINDOW_MS` | 100 | Max gap between rotations for a spin |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert!(piece.supports_spin_detection());
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces kept in the next queue.
pub const NEXT_QUEUE_LEN: usize = 5;

/// Frame step in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Fixed gravity interval.
pub const GRAVITY_MS: u32 = 500;

/// Lock delay once a piece rests on a surface.
pub const LOCK_DELAY_MS: u32 = 500;

/// Minimum time between two accepted moves (enforced by the caller).
pub const MOVE_COOLDOWN_MS: u32 = 100;

/// Minimum time between two accepted rotations (enforced by the caller).
pub const ROTATE_COOLDOWN_MS: u32 = 200;

/// A T rotation within this long of the previous rotation may count as a spin.
pub const SPIN_WINDOW_MS: u32 = 100;


/// 24-bit display color of a piece (and of the board cells it leaves behind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const PURPLE: Color = Color::new(128, 0, 128);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven piece variants.
///
/// Declaration order is the catalog order (I, O, T, J, L, S, Z) and is what
/// [`PieceKind::index`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All variants in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display color of the variant.
    pub fn color(self) -> Color {
        match self {
            PieceKind::I => Color::CYAN,
            PieceKind::O => Color::YELLOW,
            PieceKind::T => Color::PURPLE,
            PieceKind::J => Color::BLUE,
            PieceKind::L => Color::ORANGE,
            PieceKind::S => Color::GREEN,
            PieceKind::Z => Color::RED,
        }
    }

    /// Whether a successful rotation of this variant is checked for a spin.
    pub fn supports_spin_detection(self) -> bool {
        matches!(self, PieceKind::T)
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Rotation state of a piece.
///
/// Pieces only rotate clockwise, so the cycle is
/// North → East → South → West → North, with indices 0 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index in `0..4`.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Player intents, produced by the input layer and dispatched by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its landing row and lock on the next tick
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Swap the active piece with the hold slot
    Hold,
    /// Toggle pause
    Pause,
    /// Start from the menu, resume, or restart after game over
    Start,
    /// Leave a paused game for the menu
    ExitToMenu,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive).
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            "exittomenu" => Some(GameAction::ExitToMenu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
            GameAction::ExitToMenu => "exitToMenu",
        }
    }
}

/// A cell on the board: empty, or occupied with the color of the piece that
/// locked there.
pub type Cell = Option<Color>;
