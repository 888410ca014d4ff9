//! Terminal presentation layer.
//!
//! Renders into a framebuffer of styled character cells and flushes only the
//! changed runs to the terminal. The game cores stay unaware of it: the view
//! consumes their draw requests (Tetris blocks, Snake tiles) and a small HUD
//! summary.
//!
//! One board cell is two terminal columns wide to compensate for the usual
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pocket_arcade_core as core;
pub use pocket_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, BlockGlyphs, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
