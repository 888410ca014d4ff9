//! Game settings and environment overrides.
//!
//! Defaults mirror the constants in [`crate::types`]. Every setting can be
//! overridden through environment variables:
//!
//! - `ARCADE_SNAKE_INTERVAL_MS`: snake step interval (default 90)
//! - `ARCADE_SNAKE_WRAP`: `0`/`false` to turn wall looping off (default on)
//! - `ARCADE_SNAKE_INITIAL_SIZE`: snake length after restart (default 6)
//! - `ARCADE_SNAKE_FOOD`: food tiles placed on restart (default 3)
//! - `ARCADE_TETRIS_INTERVAL_MS`: gravity interval (default 300)
//! - `ARCADE_SEED`: fixed RNG seed
//! - `ARCADE_BEST_SCORE_DIR`: directory holding the best-score files
//! - `ARCADE_LOG_PATH`: file receiving tracing output

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::{
    Position, SNAKE_INITIAL_FOOD, SNAKE_INITIAL_SIZE, SNAKE_INTERVAL_MS, SNAKE_START,
    SNAKE_TILE_SIZE, TETRIS_BORDER_WIDTH, TETRIS_HEIGHT, TETRIS_INTERVAL_MS,
    TETRIS_SQUARE_SIZE, TETRIS_WIDTH,
};

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| {
        let v = v.trim().to_lowercase();
        !(v == "0" || v == "false" || v == "off" || v == "no")
    })
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
}

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: i32,
    pub height: i32,
}

impl BoardSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whole tiles that fit in a viewport: `floor(viewport / tile)` per axis.
    pub fn from_viewport(
        viewport_width: u32,
        viewport_height: u32,
        tile_size: u32,
    ) -> Result<Self, ConfigError> {
        if tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let width = viewport_width / tile_size;
        let height = viewport_height / tile_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        Ok(Self {
            width: width.min(i32::MAX as u32) as i32,
            height: height.min(i32::MAX as u32) as i32,
        })
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col >= 0 && pos.col < self.width && pos.row >= 0 && pos.row < self.height
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// Snake tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeSettings {
    pub initial_size: usize,
    pub tile_size: u32,
    pub interval_ms: u32,
    /// Leaving one edge re-enters at the opposite edge
    pub walls_looping: bool,
    pub initial_food: usize,
    pub has_grid: bool,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            initial_size: SNAKE_INITIAL_SIZE,
            tile_size: SNAKE_TILE_SIZE,
            interval_ms: SNAKE_INTERVAL_MS,
            walls_looping: true,
            initial_food: SNAKE_INITIAL_FOOD,
            has_grid: true,
        }
    }
}

impl SnakeSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            initial_size: env_parse("ARCADE_SNAKE_INITIAL_SIZE").unwrap_or(defaults.initial_size),
            interval_ms: env_parse("ARCADE_SNAKE_INTERVAL_MS").unwrap_or(defaults.interval_ms),
            walls_looping: env_flag("ARCADE_SNAKE_WRAP").unwrap_or(defaults.walls_looping),
            initial_food: env_parse("ARCADE_SNAKE_FOOD").unwrap_or(defaults.initial_food),
            ..defaults
        }
    }

    /// Check that a fresh snake fits on `board`.
    ///
    /// The body starts at [`SNAKE_START`] and extends to the right. With
    /// looping walls it only has to fit in one row; without, it must not cross
    /// the right edge.
    pub fn validate(&self, board: BoardSize) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.initial_size == 0 {
            return Err(ConfigError::ZeroInitialSize);
        }
        let len = self.initial_size.min(i32::MAX as usize) as i32;
        let (min_width, min_height) = if self.walls_looping {
            (len, 1)
        } else {
            (SNAKE_START.col + len, SNAKE_START.row + 1)
        };
        if board.width < min_width || board.height < min_height {
            return Err(ConfigError::BoardTooSmall {
                width: board.width,
                height: board.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }
}

/// Tetris tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct TetrisSettings {
    pub width: i32,
    pub height: i32,
    pub square_size: u32,
    pub interval_ms: u32,
    pub border_width: f32,
}

impl Default for TetrisSettings {
    fn default() -> Self {
        Self {
            width: TETRIS_WIDTH,
            height: TETRIS_HEIGHT,
            square_size: TETRIS_SQUARE_SIZE,
            interval_ms: TETRIS_INTERVAL_MS,
            border_width: TETRIS_BORDER_WIDTH,
        }
    }
}

impl TetrisSettings {
    /// Largest tetromino bounding box; smaller stages cannot spawn the I piece.
    pub const MIN_EDGE: i32 = 4;

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            interval_ms: env_parse("ARCADE_TETRIS_INTERVAL_MS").unwrap_or(defaults.interval_ms),
            ..defaults
        }
    }

    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.square_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.width < Self::MIN_EDGE || self.height < Self::MIN_EDGE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min_width: Self::MIN_EDGE,
                min_height: Self::MIN_EDGE,
            });
        }
        Ok(())
    }
}

/// Host-level options shared by both games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcadeConfig {
    pub seed: Option<u32>,
    pub best_score_dir: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl ArcadeConfig {
    pub fn from_env() -> Self {
        Self {
            seed: env_parse("ARCADE_SEED"),
            best_score_dir: env_path("ARCADE_BEST_SCORE_DIR"),
            log_path: env_path("ARCADE_LOG_PATH"),
        }
    }
}
