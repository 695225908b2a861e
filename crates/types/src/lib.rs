//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game rules, input state machines, terminal rendering).
//!
//! # Board Dimensions
//!
//! The matrix follows the 2009 guideline layout:
//!
//! - **Columns**: 10 (numbered 1-10, left to right)
//! - **Rows**: 40 (numbered 1-40, bottom to top)
//! - **Visible rows**: 20 (rows 21-40 are the hidden buffer above the play area)
//!
//! Coordinates are 1-based with row 1 at the bottom, so "falling" means
//! decreasing the row number.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DELAYED_AUTO_SHIFT_MS` | 300 | Hold time before auto-repeat kicks in |
//! | `AUTO_REPEAT_MS` | 20 | Interval between auto-repeat moves |
//! | `LOCK_ALLOWED_TIME_MS` | 500 | Placement lock time allotment |
//! | `BASE_FALL_MS` | 1000 | Gravity at level 1 |
//! | `FLASH_MS` | 2000 | How long clear messages stay on screen |
//!
//! # Examples
//!
//! ```
//! use guideline_tetris_types::{Command, PieceKind, Rotation, RotationDirection, BOARD_COLUMNS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let rotated = Rotation::Spawn.rotate(RotationDirection::Clockwise);
//! assert_eq!(rotated, Rotation::Right);
//!
//! assert_eq!(Command::from_str("rotateCCW"), Some(Command::RotateCcw));
//! assert_eq!(BOARD_COLUMNS, 10);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_COLUMNS: u8 = 10;

/// Board height in cells, including the hidden buffer (40 rows)
pub const BOARD_ROWS: u8 = 40;

/// Rows of the play area that are shown to the player (20 rows)
pub const VISIBLE_ROWS: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// DAS (Delayed Auto Shift): roughly 0.3 seconds between press and auto-repeat.
pub const DELAYED_AUTO_SHIFT_MS: u32 = 300;

/// ARR (Auto Repeat): crossing the whole matrix takes about half a second.
///
/// Derived as `columns / 0.5` and used directly as a millisecond interval.
pub const AUTO_REPEAT_MS: u32 = BOARD_COLUMNS as u32 * 2;

/// Moves and rotations a grounded piece may make before it is forced to lock.
pub const LOCK_ALLOWED_MOVES: u8 = 15;

/// Time a grounded piece may rest without moving before it locks.
pub const LOCK_ALLOWED_TIME_MS: i32 = 500;

/// Number of upcoming pieces kept in the preview queue.
pub const NEXT_QUEUE_LENGTH: usize = 6;

/// Gravity at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_MS: u32 = 1000;

/// Soft drop falls 20x faster than the current gravity.
pub const SOFT_DROP_DIVISOR: u32 = 20;

/// How long line-clear messages stay visible.
pub const FLASH_MS: u32 = 2000;

/// Maximum length of a leaderboard name.
pub const LEADERBOARD_NAME_LIMIT: usize = 30;

/// Number of leaderboard entries loaded for display.
pub const LEADERBOARD_SIZE: usize = 30;

/// Pointer presses shorter than this count as taps.
pub const TAP_MAX_MS: u32 = 200;

/// Downward swipe speed (cells per second) that turns a drag into a hard drop.
pub const HARD_DROP_SWIPE_CELLS_PER_SEC: f32 = 30.0;

/// Points awarded for clearing N lines at once (index = lines).
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Extra points for a Tetris that directly follows another Tetris.
pub const BACK_TO_BACK_BONUS: u32 = 400;

/// Points per row for a soft drop step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Lines needed to reach level 2.
pub const INITIAL_GOAL: u32 = 10;

/// Lines added to the goal on the first level-up.
pub const INITIAL_GOAL_INCREMENT: u32 = 15;

/// Growth of the goal increment on every level-up.
pub const GOAL_INCREMENT_STEP: u32 = 5;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use guideline_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states of the Super Rotation System (SRS)
///
/// - **Spawn**: "0", the orientation a piece enters the matrix with
/// - **Right**: "R", rotated 90° clockwise
/// - **Reverse**: "2", rotated 180°
/// - **Left**: "L", rotated 90° counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    /// Index 0..=3 in clockwise order.
    pub fn index(&self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Reverse => 2,
            Rotation::Left => 3,
        }
    }

    /// Inverse of [`Rotation::index`], taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::Spawn,
            1 => Rotation::Right,
            2 => Rotation::Reverse,
            _ => Rotation::Left,
        }
    }

    /// Target state of a quarter turn. Always non-negative modulo 4.
    ///
    /// ```
    /// use guideline_tetris_types::{Rotation, RotationDirection};
    ///
    /// assert_eq!(Rotation::Left.rotate(RotationDirection::Clockwise), Rotation::Spawn);
    /// assert_eq!(Rotation::Spawn.rotate(RotationDirection::CounterClockwise), Rotation::Left);
    /// ```
    pub fn rotate(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self::from_index(self.index() + 1),
            RotationDirection::CounterClockwise => Self::from_index(self.index() + 3),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Spawn => "0",
            Rotation::Right => "R",
            Rotation::Reverse => "2",
            Rotation::Left => "L",
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Player commands understood by the game engine
///
/// This is the complete vocabulary shared by the keyboard and touch front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Fall faster while held (one point per row)
    SoftDrop,
    /// Instantly drop piece to the floor and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the piece in play with the hold slot (once per piece)
    Hold,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Left,
        Command::Right,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Hold,
    ];

    /// Position in [`Command::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use guideline_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("rotatecw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "hold" => Some(Command::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCW",
            Command::RotateCcw => "rotateCCW",
            Command::Hold => "hold",
        }
    }
}

/// A position on the matrix (1-based, row 1 at the bottom)
///
/// Coordinates outside the matrix are representable; the board decides validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub column: i8,
    pub row: i8,
}

impl Coord {
    pub const fn new(column: i8, row: i8) -> Self {
        Self { column, row }
    }

    /// Offset by `dx` columns and `dy` rows (positive `dy` is up).
    #[inline]
    pub const fn plus(self, dx: i8, dy: i8) -> Self {
        Self {
            column: self.column + dx,
            row: self.row + dy,
        }
    }
}

/// A single occupied cell of the matrix.
///
/// `locked` is true for minos that have been transferred to the board; the
/// renderer draws them darker than minos of the piece in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mino {
    pub kind: PieceKind,
    pub locked: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Mino)`: Cell filled by a locked mino of the given kind
pub type Cell = Option<Mino>;

/// Everything the game engine reads from the input layer in one tick.
///
/// Produced by the input state machines and consumed by
/// `GameState::tick`. Edge-triggered commands are `true` only on the tick the
/// command fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Horizontal movement pulse: -1, 0 or 1 columns.
    pub movement: i8,
    /// Soft drop key is currently held (level, not edge).
    pub soft_drop_held: bool,
    /// One-shot soft drop step (touch drag downwards).
    pub soft_drop_step: bool,
    /// Hard drop fired this tick.
    pub hard_drop: bool,
    /// Rotation fired this tick. Clockwise wins when both fired.
    pub rotate: Option<RotationDirection>,
    /// Hold fired this tick.
    pub hold: bool,
}

impl TickInput {
    /// True when the tick carries no command at all.
    pub fn is_idle(&self) -> bool {
        *self == TickInput::default()
    }

    /// The edge-triggered part of this tick, without the held soft drop.
    pub fn one_shots(&self) -> TickInput {
        TickInput {
            soft_drop_held: false,
            ..*self
        }
    }

    /// This tick plus one-shot commands left over from earlier ticks.
    ///
    /// Levels come from this tick. A movement pulse of this tick replaces the
    /// pending one, and so does a rotation.
    pub fn with_pending(&self, pending: &TickInput) -> TickInput {
        TickInput {
            movement: if self.movement != 0 {
                self.movement
            } else {
                pending.movement
            },
            soft_drop_held: self.soft_drop_held,
            soft_drop_step: self.soft_drop_step || pending.soft_drop_step,
            hard_drop: self.hard_drop || pending.hard_drop,
            rotate: self.rotate.or(pending.rotate),
            hold: self.hold || pending.hold,
        }
    }

    /// Apply a single one-shot command to this tick.
    pub fn push(&mut self, command: Command) {
        match command {
            Command::Left => self.movement = -1,
            Command::Right => self.movement = 1,
            Command::SoftDrop => self.soft_drop_step = true,
            Command::HardDrop => self.hard_drop = true,
            Command::RotateCw => self.rotate = Some(RotationDirection::Clockwise),
            Command::RotateCcw => {
                if self.rotate.is_none() {
                    self.rotate = Some(RotationDirection::CounterClockwise);
                }
            }
            Command::Hold => self.hold = true,
        }
    }
}
