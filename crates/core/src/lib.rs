//! Core game logic - the Snake and Tetris simulations
//!
//! Nothing in here draws, reads the clock or waits for input. A host feeds the
//! controllers abstract inputs (tap, swipe, key press) and elapsed time, then
//! drains [`GameEvent`](types::GameEvent)s and draw requests back out.
//!
//! # Module Structure
//!
//! - [`snake_board`] / [`snake_game`]: tile grid and the Snake controller
//! - [`stage`] / [`pieces`]: Tetris grid, tetromino shapes and collision
//! - [`tetris_game`]: the Tetris controller
//! - [`scoring`]: line-clear scoring and level progression
//! - [`scheduler`]: time-injected tick timer with stale-tick rejection
//! - [`paint`]: diffing block painter and per-session texture cache
//! - [`settings`]: tuning, environment overrides and validation
//! - [`store`]: best-score persistence
//! - [`rng`]: seeded randomness
//!
//! # Example
//!
//! ```
//! use pocket_arcade_core::{MemoryStore, TetrisGame, TetrisSettings};
//! use pocket_arcade_core::types::TetrisAction;
//!
//! let mut game = TetrisGame::new(TetrisSettings::default(), Box::new(MemoryStore::default()), 42)
//!     .unwrap();
//! game.on_tap();
//! game.on_key(TetrisAction::HardDrop);
//! assert_eq!(game.score(), 5);
//! ```
//!
//! # Timing
//!
//! Call `update(elapsed_ms)` once per frame. It fires at most one step when
//! more than one interval (90 ms Snake, 300 ms Tetris by default) has passed.

pub mod error;
pub mod paint;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod settings;
pub mod snake_board;
pub mod snake_game;
pub mod stage;
pub mod store;
pub mod tetris_game;

pub use pocket_arcade_types as types;

pub use error::{ConfigError, StoreError};
pub use paint::{StagePainter, TextureCache, TextureSource};
pub use pieces::Tetromino;
pub use rng::SimpleRng;
pub use scheduler::{TickScheduler, TickToken};
pub use scoring::ScoreManager;
pub use settings::{ArcadeConfig, BoardSize, SnakeSettings, TetrisSettings};
pub use snake_board::{SnakeBoard, Tile};
pub use snake_game::SnakeGame;
pub use stage::Stage;
pub use store::{BestScoreStore, JsonFileStore, MemoryStore};
pub use tetris_game::TetrisGame;
