//! Error types surfaced by the cores.
//!
//! Invalid moves and game over are ordinary game outcomes and never show up
//! here. Only configuration problems (refuse to start) and best-score
//! persistence failures are errors.

use std::fmt;

/// The game cannot start with the given dimensions or timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The viewport yields no whole tile in at least one dimension.
    ZeroViewport { width: u32, height: u32 },
    /// Tile edge of zero pixels.
    ZeroTileSize,
    /// The board cannot hold the initial entity.
    BoardTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
    /// Tick interval of zero milliseconds.
    ZeroInterval,
    /// A snake needs at least one segment.
    ZeroInitialSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroViewport { width, height } => {
                write!(f, "viewport {width}x{height} holds no whole tile")
            }
            Self::ZeroTileSize => write!(f, "tile size must be at least one pixel"),
            Self::BoardTooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "board {width}x{height} is smaller than the required {min_width}x{min_height}"
            ),
            Self::ZeroInterval => write!(f, "tick interval must be at least 1ms"),
            Self::ZeroInitialSize => write!(f, "snake must start with at least one segment"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reading or writing the persisted best score failed.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "best score i/o: {err}"),
            Self::Format(err) => write!(f, "best score format: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err)
    }
}
