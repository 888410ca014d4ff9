//! Stage module - the Tetris grid
//!
//! Each cell is empty or holds the kind of the piece that was frozen there.
//! Uses a flat array, row-major (`y * width + x`). Coordinates are `(x, y)`
//! with `x` growing to the right and `y` growing downwards; rows above the
//! stage (`y < 0`) are where pieces spawn partially.

use crate::pieces::Tetromino;
use crate::settings::BoardSize;
use crate::types::Cell;

/// The Tetris stage
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Stage {
    /// Create a new empty stage
    pub fn new(size: BoardSize) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y`, shifting every row above it down by one.
    /// Row 0 becomes empty.
    pub fn clear_row(&mut self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }

        let width = self.width as usize;
        // copy_within handles the overlapping ranges
        for row in (1..=y as usize).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);

        true
    }

    /// Whether `piece` overlaps a wall, the floor or a frozen block.
    ///
    /// Blocks above the stage only collide with the side walls.
    pub fn is_collision(&self, piece: &Tetromino) -> bool {
        piece.blocks().iter().any(|&(x, y)| {
            x < 0 || x >= self.width || y >= self.height || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Freeze `piece` into the stage and clear the rows it completed.
    ///
    /// Blocks outside the stage are dropped. Rows are checked from the top of
    /// the piece's box downwards; returns the number of rows cleared.
    pub fn unite(&mut self, piece: &Tetromino) -> usize {
        for (x, y) in piece.blocks() {
            self.set(x, y, Some(piece.kind));
        }

        let mut cleared = 0;
        for local_y in 0..piece.size() {
            let y = piece.y + local_y;
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn stage() -> Stage {
        Stage::new(BoardSize::new(12, 24))
    }

    fn fill_row_except(stage: &mut Stage, y: i32, gaps: &[i32]) {
        for x in 0..stage.width() {
            if !gaps.contains(&x) {
                stage.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_index_bounds() {
        let stage = stage();
        assert_eq!(stage.index(0, 0), Some(0));
        assert_eq!(stage.index(11, 0), Some(11));
        assert_eq!(stage.index(0, 1), Some(12));
        assert_eq!(stage.index(11, 23), Some(287));
        assert_eq!(stage.index(-1, 0), None);
        assert_eq!(stage.index(12, 0), None);
        assert_eq!(stage.index(0, 24), None);
    }

    #[test]
    fn test_spawn_above_stage_only_hits_walls() {
        let mut stage = stage();
        fill_row_except(&mut stage, 0, &[]);
        let mut piece = Tetromino::new(PieceKind::I, 12);
        // I's blocks sit on local row 1, so y = -1 puts them on row 0
        piece.y = -2;
        assert!(!stage.is_collision(&piece));
        piece.y = -1;
        assert!(stage.is_collision(&piece));

        piece.y = -2;
        piece.x = -1;
        assert!(stage.is_collision(&piece));
    }

    #[test]
    fn test_floor_collision() {
        let stage = stage();
        let mut piece = Tetromino::new(PieceKind::O, 12);
        piece.y = 22;
        assert!(!stage.is_collision(&piece));
        piece.y = 23;
        assert!(stage.is_collision(&piece));
    }

    #[test]
    fn test_unite_without_clear() {
        let mut stage = stage();
        let mut piece = Tetromino::new(PieceKind::O, 12);
        piece.y = 22;
        assert_eq!(stage.unite(&piece), 0);
        assert_eq!(stage.get(5, 22), Some(Some(PieceKind::O)));
        assert_eq!(stage.get(6, 23), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_unite_clears_two_rows_in_order() {
        let mut stage = stage();
        fill_row_except(&mut stage, 22, &[5, 6]);
        fill_row_except(&mut stage, 23, &[5, 6]);
        stage.set(0, 21, Some(PieceKind::T));

        let mut piece = Tetromino::new(PieceKind::O, 12);
        piece.y = 22;
        assert_eq!(stage.unite(&piece), 2);

        // The marker from row 21 fell two rows.
        assert_eq!(stage.get(0, 23), Some(Some(PieceKind::T)));
        assert!(stage.rows().take(23).flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_row_zero_empties_top() {
        let mut stage = stage();
        fill_row_except(&mut stage, 0, &[]);
        assert!(stage.clear_row(0));
        assert!(stage.rows().next().unwrap().iter().all(|c| c.is_none()));
        assert!(!stage.clear_row(24));
    }

    #[test]
    fn test_reset() {
        let mut stage = stage();
        stage.set(3, 3, Some(PieceKind::L));
        stage.reset();
        assert!(stage.cells().iter().all(|c| c.is_none()));
    }
}
