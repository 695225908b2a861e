//! Terminal game-over conditions.

use crate::types::{Coord, PieceKind};

/// A piece could not be locked because one of its resting cells is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tried to lock a mino at column {}, row {}, but the cell is occupied", at.column, at.row)]
pub struct LockOut {
    pub at: Coord,
}

/// A freshly generated piece overlaps blocks already in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no room to place {} piece", kind.as_str())]
pub struct BlockOut {
    pub kind: PieceKind,
}

/// Why a session ended. Both kinds are final.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GameOver {
    #[display("lock out: {_0}")]
    LockOut(LockOut),
    #[display("block out: {_0}")]
    BlockOut(BlockOut),
}

impl GameOver {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOver::LockOut(_) => "lock out",
            GameOver::BlockOut(_) => "block out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_out_converts_into_game_over() {
        let err: GameOver = LockOut {
            at: Coord::new(3, 7),
        }
        .into();
        assert_eq!(err.as_str(), "lock out");
        assert!(err.to_string().contains("column 3, row 7"));
    }

    #[test]
    fn block_out_names_the_piece() {
        let err = GameOver::from(BlockOut { kind: PieceKind::T });
        assert_eq!(err.to_string(), "block out: no room to place t piece");
    }
}
