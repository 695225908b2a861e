//! Terminal frontend: a small, game-oriented rendering layer.
//!
//! The view draws a [`core::GameSnapshot`] into a framebuffer; the renderer
//! diffs framebuffers and flushes the changes through crossterm. No widget
//! toolkit, so the aspect ratio (2 columns per matrix cell) stays exact.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use guideline_tetris_core as core;
pub use guideline_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, Area, GameView, Overlay, ViewLayout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
