//! Pieces module - tetromino shapes and the falling piece
//!
//! Every kind has four precomputed rotation matrices, stored row-major and
//! padded to 4x4. Only the top-left `size`x`size` square of a matrix is
//! meaningful; [`Tetromino::has_block`] is the single primitive collision and
//! drawing build on.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Row-major occupancy grid for one rotation (`[y][x]`)
pub type ShapeMatrix = [[u8; 4]; 4];

/// All four rotations of one kind, indexed by angle
pub type RotationSet = [ShapeMatrix; 4];

const I_SHAPES: RotationSet = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

const J_SHAPES: RotationSet = [
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
];

const L_SHAPES: RotationSet = [
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const O_SHAPES: RotationSet = [[[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]; 4];

const S_SHAPES: RotationSet = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const T_SHAPES: RotationSet = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

const Z_SHAPES: RotationSet = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
];

/// Rotation matrices for a piece kind
pub fn shapes(kind: PieceKind) -> &'static RotationSet {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Horizontally centered spawn column: `floor(width/2 - size/2)`
pub fn spawn_x(kind: PieceKind, board_width: i32) -> i32 {
    (board_width - kind.size()).div_euclid(2)
}

/// A tetromino on (or about to enter) the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Column of the bounding box's left edge
    pub x: i32,
    /// Row of the bounding box's top edge
    pub y: i32,
    /// Rotation index, 0..=3
    pub angle: u8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position of a `board_width` stage
    pub fn new(kind: PieceKind, board_width: i32) -> Self {
        Self {
            kind,
            x: spawn_x(kind, board_width),
            y: 0,
            angle: 0,
        }
    }

    pub fn size(&self) -> i32 {
        self.kind.size()
    }

    /// Rotate one quarter turn
    pub fn rotate(&mut self) {
        self.angle = (self.angle + 1) % 4;
    }

    /// Undo [`rotate`](Self::rotate)
    pub fn anti_rotate(&mut self) {
        self.angle = (self.angle + 3) % 4;
    }

    /// Unchecked offset. Callers validate against the stage afterwards.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Whether the current rotation fills local cell `(x, y)`
    pub fn has_block(&self, x: i32, y: i32) -> bool {
        let size = self.size();
        if x < 0 || y < 0 || x >= size || y >= size {
            return false;
        }
        shapes(self.kind)[self.angle as usize % 4][y as usize][x as usize] == 1
    }

    /// Absolute `(x, y)` of every filled block
    pub fn blocks(&self) -> ArrayVec<(i32, i32), 4> {
        let mut out = ArrayVec::new();
        let size = self.size();
        for y in 0..size {
            for x in 0..size {
                if self.has_block(x, y) && !out.is_full() {
                    out.push((self.x + x, self.y + y));
                }
            }
        }
        out
    }
}
