//! Pocket arcade (workspace facade crate).
//!
//! Re-exports the member crates as `pocket_arcade::{core,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use pocket_arcade_core as core;
pub use pocket_arcade_input as input;
pub use pocket_arcade_term as term;
pub use pocket_arcade_types as types;
