//! Input layer: terminal events to per-tick game input.
//!
//! This crate does not know about the game rules. It maps `crossterm` key and
//! mouse events onto [`types::Command`]s and turns them into one
//! [`types::TickInput`] per tick:
//!
//! - [`keyboard`]: held / just-pressed / just-released state, with a release
//!   timeout for terminals that never report key releases
//! - [`movement`]: left/right priority and DAS/ARR auto shift
//! - [`touch`]: drag, swipe and tap gestures from the mouse
//! - [`controls`]: all of the above composed behind one `tick` call

pub mod controls;
pub mod keyboard;
pub mod map;
pub mod movement;
pub mod touch;

pub use guideline_tetris_types as types;

pub use controls::Controls;
pub use keyboard::{KeyboardState, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{map_key, should_quit, Binding, SessionAction};
pub use movement::{DirectionEdge, HeldDirections, InvalidTransition, MovementMachine, ShiftTiming};
pub use touch::{PointerSample, PointerTracker, Rect, TouchLayout, TouchMachine, TouchState};
