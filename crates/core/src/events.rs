//! Change notifications produced by the phase machine.
//!
//! The game never draws anything itself. Every tick it records what happened
//! to pieces and the matrix; the driver drains the list and forwards it to the
//! renderer, the log, or wherever else it is needed.

use crate::error::GameOver;
use crate::scoring::ClearMessages;
use crate::types::{Coord, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece entered play from the next queue or the hold slot.
    Spawned { kind: PieceKind, from_hold: bool },
    /// The piece in play changed position or rotation.
    PieceMoved { kind: PieceKind, cells: [Coord; 4] },
    /// The piece in play was transferred to the matrix.
    PieceLocked { kind: PieceKind, cells: [Coord; 4] },
    /// The piece in play went to the hold slot.
    Held { kind: PieceKind },
    /// Full rows were removed from the matrix.
    RowsCleared { count: u32, messages: ClearMessages },
    GameOver(GameOver),
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::PieceMoved { .. } => "moved",
            GameEvent::PieceLocked { .. } => "locked",
            GameEvent::Held { .. } => "held",
            GameEvent::RowsCleared { .. } => "cleared",
            GameEvent::GameOver(_) => "game_over",
        }
    }
}
