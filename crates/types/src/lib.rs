//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both games and by the
//! presentation layer. All types are pure data with no external dependencies,
//! so they can be used by the simulation cores, the terminal renderer and tests
//! alike.
//!
//! # Board Dimensions
//!
//! | Game | Width | Height | Notes |
//! |------|-------|--------|-------|
//! | Tetris | 12 | 24 | fixed stage, pieces spawn horizontally centered |
//! | Snake | viewport / tile | viewport / tile | derived when the drawing context is ready |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TETRIS_INTERVAL_MS` | 300 | Gravity step interval |
//! | `SNAKE_INTERVAL_MS` | 90 | Snake step interval |
//!
//! # Examples
//!
//! ```
//! use pocket_arcade_types::{Direction, PieceKind, TetrisAction, TETRIS_WIDTH};
//!
//! assert_eq!(PieceKind::T.size(), 3);
//! assert_eq!(PieceKind::ALL.len(), 7);
//!
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert_ne!(TetrisAction::Rotate, TetrisAction::Pause);
//! assert_eq!(TETRIS_WIDTH, 12);
//! ```

/// Tetris stage width in blocks
pub const TETRIS_WIDTH: i32 = 12;

/// Tetris stage height in blocks
pub const TETRIS_HEIGHT: i32 = 24;

/// Tetris block edge in pixels
pub const TETRIS_SQUARE_SIZE: u32 = 25;

/// Border width drawn around every Tetris block, in pixels
pub const TETRIS_BORDER_WIDTH: f32 = 0.5;

/// Delay between two gravity steps (milliseconds)
pub const TETRIS_INTERVAL_MS: u32 = 300;

/// Snake length right after a restart
pub const SNAKE_INITIAL_SIZE: usize = 6;

/// Snake tile edge in pixels
pub const SNAKE_TILE_SIZE: u32 = 30;

/// Delay between two snake steps (milliseconds)
pub const SNAKE_INTERVAL_MS: u32 = 90;

/// Number of food tiles placed on restart
pub const SNAKE_INITIAL_FOOD: usize = 3;

/// Head position of a fresh snake (row, col)
pub const SNAKE_START: Position = Position::new(3, 3);

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Flat points for every landed piece, multiplied by (level + 1)
pub const DROP_POINTS: u32 = 5;

/// Cleared lines needed to go up one level
pub const LINES_PER_LEVEL: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_scoring_table() {
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
        assert_eq!(DROP_POINTS, 5);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn piece_sizes_match_bounding_boxes() {
        assert_eq!(PieceKind::I.size(), 4);
        assert_eq!(PieceKind::O.size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(kind.size(), 3);
        }
    }

    #[test]
    fn rgb_from_hex() {
        assert_eq!(Rgb::from_hex(0xff8000), Rgb::new(0xff, 0x80, 0x00));
        assert_eq!(Rgb::from_hex(0x2d3236).to_hex(), 0x2d3236);
    }

    #[test]
    fn opposite_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Colors shared by the cores and the renderer.
pub mod palette {
    use super::Rgb;

    /// Empty Tetris cell
    pub const TETRIS_BACKGROUND: Rgb = Rgb::from_hex(0x2d3236);
    /// Grid lines around empty Tetris cells
    pub const TETRIS_GRID: Rgb = Rgb::from_hex(0x373c40);
    /// Border around occupied Tetris cells
    pub const TETRIS_BLOCK_BORDER: Rgb = Rgb::from_hex(0x373c40);

    pub const SNAKE_FOOD: Rgb = Rgb::from_hex(0xff0000);
    pub const SNAKE_BODY: Rgb = Rgb::from_hex(0x6660e7);
    pub const SNAKE_BACKGROUND: Rgb = Rgb::from_hex(0x7ed321);
    pub const SNAKE_GRID: Rgb = Rgb::from_hex(0x131313);
}

/// The seven tetromino piece kinds
///
/// Each kind has a square bounding box (`size`) and a fill color:
/// - **I**: orange, 4x4
/// - **J**: green, 3x3
/// - **L**: red, 3x3
/// - **O**: yellow, 2x2
/// - **S**: pale blue, 3x3
/// - **T**: blue, 3x3
/// - **Z**: amber, 3x3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in the order used by the random picker.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Edge of the square bounding box holding every rotation
    pub const fn size(&self) -> i32 {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }

    /// Fill color of the piece's blocks
    pub const fn color(&self) -> Rgb {
        match self {
            PieceKind::I => Rgb::from_hex(0xff8000),
            PieceKind::J => Rgb::from_hex(0x2cc990),
            PieceKind::L => Rgb::from_hex(0xf34344),
            PieceKind::O => Rgb::from_hex(0xffdf00),
            PieceKind::S => Rgb::from_hex(0xccdce4),
            PieceKind::T => Rgb::from_hex(0x008aff),
            PieceKind::Z => Rgb::from_hex(0xfcb941),
        }
    }
}

/// A cell of the Tetris stage
///
/// - `None`: empty
/// - `Some(PieceKind)`: frozen block, drawn with the kind's color
pub type Cell = Option<PieceKind>;

/// Heading of a swipe or of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The heading a snake may never reverse into
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Row/column pair on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Component-wise sum (no wrapping)
    pub const fn offset(self, by: Position) -> Self {
        Self {
            row: self.row + by.row,
            col: self.col + by.col,
        }
    }
}

/// Which game a host is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameKind {
    Snake,
    #[default]
    Tetris,
}

impl GameKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snake" => Some(GameKind::Snake),
            "tetris" => Some(GameKind::Tetris),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Tetris => "tetris",
        }
    }
}

/// Keyboard-level Tetris commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece one quarter turn
    Rotate,
    /// One gravity step right away
    SoftDrop,
    /// Fall until landing
    HardDrop,
    /// Toggle pause
    Pause,
}

/// Lifecycle of one game controller
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver -> Running` (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl PlayState {
    pub fn is_running(&self) -> bool {
        matches!(self, PlayState::Running)
    }
}

/// Event emitted by a game controller for the presentation layer.
///
/// Controllers buffer these; hosts drain them once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The session score changed
    Score(u32),
    /// Entered (`true`) or left (`false`) the running state
    Playing(bool),
    /// A new preview piece was generated (Tetris)
    NextPiece(PieceKind),
}

/// One block draw request, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDraw {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub fill: Rgb,
    pub border: Rgb,
    pub border_width: f32,
}
