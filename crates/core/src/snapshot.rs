//! Read-only view of a session for renderers.

use crate::error::GameOver;
use crate::game_state::{GameState, Phase};
use crate::piece::Piece;
use crate::types::{Cell, Coord, PieceKind, Rotation, BOARD_COLUMNS, VISIBLE_ROWS};

/// Visible part of the matrix, `board[0]` is row 1 (the bottom row).
pub type VisibleBoard = [[Cell; BOARD_COLUMNS as usize]; VISIBLE_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: [Coord; 4],
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            cells: *value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: VisibleBoard,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: Vec<PieceKind>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub goal: u32,
    pub tetrises: u32,
    pub combos: u32,
    pub phase: Phase,
    pub game_over: Option<GameOver>,
    pub flash: Vec<&'static str>,
    pub game_time_ms: u64,
}

impl GameSnapshot {
    /// Tetrises per minute of play.
    pub fn tetrises_per_minute(&self) -> f64 {
        self.per_minute(self.tetrises)
    }

    /// Lines per minute of play.
    pub fn lines_per_minute(&self) -> f64 {
        self.per_minute(self.lines)
    }

    fn per_minute(&self, n: u32) -> f64 {
        if self.game_time_ms == 0 {
            return 0.0;
        }
        60_000.0 / self.game_time_ms as f64 * f64::from(n)
    }

    /// Visible cell at a 1-based coordinate, None outside the visible area.
    pub fn cell(&self, at: Coord) -> Option<Cell> {
        if at.column < 1 || at.row < 1 {
            return None;
        }
        self.board
            .get(at.row as usize - 1)
            .and_then(|row| row.get(at.column as usize - 1))
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.game_over.is_none()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLUMNS as usize]; VISIBLE_ROWS as usize],
            active: None,
            ghost: None,
            hold: None,
            can_hold: true,
            next_queue: Vec::new(),
            score: 0,
            lines: 0,
            level: 1,
            goal: 0,
            tetrises: 0,
            combos: 0,
            phase: Phase::Generation,
            game_over: None,
            flash: Vec::new(),
            game_time_ms: 0,
        }
    }
}

impl GameState {
    /// Fill an existing snapshot, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (i, row) in out.board.iter_mut().enumerate() {
            if let Some(cells) = self.board().row(i as i8 + 1) {
                row.copy_from_slice(cells);
            }
        }

        out.active = self.active().map(PieceSnapshot::from);
        out.ghost = self.ghost().map(PieceSnapshot::from);
        out.hold = self.hold_piece();
        out.can_hold = self.can_hold();
        out.next_queue.clear();
        out.next_queue.extend(self.next_queue());

        let scoring = self.scoring();
        out.score = scoring.score();
        out.lines = scoring.lines_cleared();
        out.level = scoring.level();
        out.goal = scoring.goal();
        out.tetrises = scoring.tetrises();
        out.combos = scoring.combos();

        out.phase = self.phase();
        out.game_over = self.game_over();
        out.flash.clear();
        out.flash.extend_from_slice(self.flash_messages());
        out.game_time_ms = self.game_time_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mino, TickInput};

    #[test]
    fn test_snapshot_of_running_game() {
        let mut state = GameState::new(42);
        let upcoming: Vec<_> = state.next_queue().collect();
        state.tick(16, &TickInput::default()).unwrap();

        let snap = state.snapshot();
        let active = snap.active.unwrap();
        assert_eq!(active.kind, upcoming[0]);
        assert_eq!(snap.ghost.unwrap().kind, upcoming[0]);
        assert_eq!(snap.next_queue.len(), 6);
        assert_eq!(snap.next_queue[..5], upcoming[1..]);
        assert_eq!(snap.phase, Phase::Falling);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.goal, 10);
        assert!(snap.playable());
    }

    #[test]
    fn test_visible_board_is_bottom_up() {
        let mut state = GameState::new(1);
        let mino = Mino {
            kind: PieceKind::L,
            locked: true,
        };
        state.board_mut().set(Coord::new(1, 1), Some(mino));
        state.board_mut().set(Coord::new(10, 20), Some(mino));
        state.board_mut().set(Coord::new(3, 21), Some(mino));

        let snap = state.snapshot();
        assert_eq!(snap.board[0][0], Some(mino));
        assert_eq!(snap.cell(Coord::new(10, 20)), Some(Some(mino)));
        assert_eq!(snap.cell(Coord::new(3, 21)), None, "buffer rows are hidden");
        assert_eq!(snap.cell(Coord::new(0, 1)), None);
        assert_eq!(snap.cell(Coord::new(2, 2)), Some(None));
    }

    #[test]
    fn test_per_minute_stats() {
        let snap = GameSnapshot {
            lines: 30,
            tetrises: 2,
            game_time_ms: 120_000,
            ..GameSnapshot::default()
        };
        assert_eq!(snap.lines_per_minute(), 15.0);
        assert_eq!(snap.tetrises_per_minute(), 1.0);
        assert_eq!(GameSnapshot::default().lines_per_minute(), 0.0);
    }
}
