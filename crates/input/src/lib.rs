//! Terminal input module.
//!
//! Maps `crossterm` key events onto the abstract inputs the game controllers
//! understand: taps, swipes and Tetris key presses. Snake is steered with
//! swipes, so the same arrow key means "swipe" in Snake and "move" in Tetris.

pub mod map;

pub use pocket_arcade_types as types;

pub use map::{map_key, should_quit, ArcadeInput};
