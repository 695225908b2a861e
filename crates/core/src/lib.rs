//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of a guideline falling-block game and the
//! phase machine that drives a session. It has **no dependencies** on a
//! terminal, a clock or the filesystem: the driver feeds elapsed time and
//! one [`TickInput`](types::TickInput) per frame, and reads back a
//! [`GameSnapshot`] plus a list of [`GameEvent`]s.
//!
//! # Module Structure
//!
//! - [`board`]: 10x40 matrix (20 visible rows) with line clearing
//! - [`shapes`]: rotation masks and SRS wall kick tables
//! - [`piece`]: a tetromino on the matrix, movement and kicked rotation
//! - [`rng`]: 7-bag randomizer with a look-ahead queue
//! - [`placement_lock`]: extended placement lock (15 moves, 500ms)
//! - [`scoring`]: line clear points, back-to-back Tetris bonus, levels
//! - [`timer`]: the fall timer
//! - [`rules`]: tunable rules with environment overrides
//! - [`game_state`]: the generation / falling / lock / pattern phase machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use guideline_tetris_core::{GameState, Phase};
//! use guideline_tetris_core::types::TickInput;
//!
//! let mut game = GameState::new(12345);
//! game.tick(16, &TickInput::default()).unwrap();
//! assert_eq!(game.phase(), Phase::Falling);
//!
//! let drop = TickInput { hard_drop: true, ..TickInput::default() };
//! game.tick(16, &drop).unwrap();
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod error;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod placement_lock;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod timer;

pub use guideline_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::{BlockOut, GameOver, LockOut};
pub use events::GameEvent;
pub use game_state::{GameState, Phase};
pub use piece::{Bounds, Piece};
pub use placement_lock::PlacementLock;
pub use rng::{Randomizer, SimpleRng};
pub use rules::Rules;
pub use scoring::{clear_message, fall_interval_ms, ClearMessages, InvalidLineCount, Scoring};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timer::IntervalTimer;
