//! Guideline Tetris (workspace facade crate).
//!
//! Re-exports the member crates under short names so the binary, the
//! integration tests and the benches can write `guideline_tetris::core::...`.

pub use guideline_tetris_core as core;
pub use guideline_tetris_input as input;
pub use guideline_tetris_leaderboard as leaderboard;
pub use guideline_tetris_term as term;
pub use guideline_tetris_types as types;
