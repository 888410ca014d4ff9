//! Snake board - a grid of tiles addressed by [`Position`]
//!
//! Tile flags are the source of truth for occupancy. A tile can be snake and
//! food at the same time: food is placed by marking a tile both `is_snake`
//! and `is_food`, which is how the tick tells "eat" apart from "bite".
//!
//! Every write marks the tile dirty so a host only repaints what changed.

use crate::settings::BoardSize;
use crate::types::{palette, Direction, Position, Rgb};

/// State of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    pub is_snake: bool,
    pub is_food: bool,
    /// Heading the snake had when its head entered this tile
    pub direction: Option<Direction>,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        is_snake: false,
        is_food: false,
        direction: None,
    };

    pub const FOOD: Tile = Tile {
        is_snake: true,
        is_food: true,
        direction: None,
    };

    pub fn body(direction: Direction) -> Self {
        Self {
            is_snake: true,
            is_food: false,
            direction: Some(direction),
        }
    }

    /// Display color: food wins over body, body over background.
    pub fn color(&self) -> Rgb {
        if self.is_food {
            palette::SNAKE_FOOD
        } else if self.is_snake {
            palette::SNAKE_BODY
        } else {
            palette::SNAKE_BACKGROUND
        }
    }
}

/// Unit `(drow, dcol)` step for a heading
pub fn velocity_for_direction(direction: Direction) -> Position {
    match direction {
        Direction::Up => Position::new(-1, 0),
        Direction::Down => Position::new(1, 0),
        Direction::Left => Position::new(0, -1),
        Direction::Right => Position::new(0, 1),
    }
}

#[derive(Debug, Clone)]
pub struct SnakeBoard {
    size: BoardSize,
    walls_looping: bool,
    tiles: Vec<Tile>,
    dirty: Vec<bool>,
}

impl SnakeBoard {
    pub fn new(size: BoardSize, walls_looping: bool) -> Self {
        let area = size.area();
        Self {
            size,
            walls_looping,
            tiles: vec![Tile::EMPTY; area],
            dirty: vec![true; area],
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn walls_looping(&self) -> bool {
        self.walls_looping
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.size.contains(pos) {
            Some(pos.row as usize * self.size.width as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Resolve a possibly off-board position.
    ///
    /// With looping walls each axis wraps to the opposite edge. Without, an
    /// off-board position resolves to `None`.
    pub fn loop_position(&self, pos: Position) -> Option<Position> {
        if self.walls_looping {
            if self.size.width <= 0 || self.size.height <= 0 {
                return None;
            }
            Some(Position::new(
                pos.row.rem_euclid(self.size.height),
                pos.col.rem_euclid(self.size.width),
            ))
        } else if self.size.contains(pos) {
            Some(pos)
        } else {
            None
        }
    }

    /// Tile at `pos`, `None` off the board
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|idx| self.tiles[idx])
    }

    /// Overwrite the tile at `pos`. Returns false off the board.
    pub fn set(&mut self, pos: Position, tile: Tile) -> bool {
        match self.index(pos) {
            Some(idx) => {
                if self.tiles[idx] != tile {
                    self.tiles[idx] = tile;
                    self.dirty[idx] = true;
                }
                true
            }
            None => false,
        }
    }

    /// Clear every tile, marking the changed ones dirty
    pub fn reset(&mut self) {
        for (tile, dirty) in self.tiles.iter_mut().zip(self.dirty.iter_mut()) {
            if *tile != Tile::EMPTY {
                *tile = Tile::EMPTY;
                *dirty = true;
            }
        }
    }

    /// Positions that are not part of the snake (food counts as snake)
    pub fn free_positions(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| matches!(self.get(pos), Some(tile) if !tile.is_snake))
            .collect()
    }

    /// Every board position, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.size.width.max(0);
        let height = self.size.height.max(0);
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Take the tiles written since the last call, with their current state.
    pub fn take_dirty(&mut self) -> Vec<(Position, Tile)> {
        let width = self.size.width.max(1);
        let mut out = Vec::new();
        for (idx, dirty) in self.dirty.iter_mut().enumerate() {
            if *dirty {
                *dirty = false;
                let pos = Position::new(idx as i32 / width, idx as i32 % width);
                out.push((pos, self.tiles[idx]));
            }
        }
        out
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
