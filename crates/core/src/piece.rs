//! Piece module - a tetromino on the matrix and its SRS rotation
//!
//! A `Piece` is a small `Copy` value: shape, rotation state, the top-left
//! corner of its rotation box (the anchor) and the four cells it covers.
//! Moves and rotations compute a new value and replace the old one wholesale,
//! so a failed rotation can never leave a half-updated piece behind.

use crate::board::Board;
use crate::shapes::{box_size, kicks, mask};
use crate::types::{Coord, PieceKind, Rotation, RotationDirection};

/// Extent of a piece on the matrix (inclusive, 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_column: i8,
    pub max_column: i8,
    pub min_row: i8,
    pub max_row: i8,
}

impl Bounds {
    /// Distance between the outermost columns (a vertical I has width 0).
    pub fn width(&self) -> i8 {
        self.max_column - self.min_column
    }

    /// Distance between the outermost rows.
    pub fn height(&self) -> i8 {
        self.max_row - self.min_row
    }
}

/// A tetromino positioned on the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    /// Top-left corner of the rotation box.
    anchor: Coord,
    cells: [Coord; 4],
    locked: bool,
}

impl Piece {
    /// Create a piece in spawn rotation with its box in the bottom-left corner
    /// of the matrix (anchor at column 1, row = box size).
    pub fn new(kind: PieceKind) -> Self {
        let anchor = Coord::new(1, box_size(kind));
        Self {
            kind,
            rotation: Rotation::Spawn,
            anchor,
            cells: cells_from_mask(kind, Rotation::Spawn, anchor),
            locked: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn cells(&self) -> &[Coord; 4] {
        &self.cells
    }

    /// The piece has been transferred to the board.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn mark_locked(&mut self) {
        self.locked = true;
    }

    /// Every cell can be occupied.
    pub fn is_valid(&self, board: &Board) -> bool {
        self.cells.iter().all(|&at| board.can_move_to(at))
    }

    /// The piece translated by `dx` columns and `dy` rows, without any checks.
    pub fn moved_by(&self, dx: i8, dy: i8) -> Self {
        Self {
            anchor: self.anchor.plus(dx, dy),
            cells: self.cells.map(|at| at.plus(dx, dy)),
            ..*self
        }
    }

    pub fn can_move_by(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.cells.iter().all(|&at| board.can_move_to(at.plus(dx, dy)))
    }

    /// Translate unconditionally. Callers check [`Piece::can_move_by`] first.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        *self = self.moved_by(dx, dy);
    }

    /// Move so that the lowest, leftmost corner of the bounds lands on `(column, row)`.
    pub fn move_bottom_left_to(&mut self, column: i8, row: i8) {
        let bounds = self.bounds();
        self.move_by(column - bounds.min_column, row - bounds.min_row);
    }

    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds {
            min_column: i8::MAX,
            max_column: i8::MIN,
            min_row: i8::MAX,
            max_row: i8::MIN,
        };
        for at in &self.cells {
            b.min_column = b.min_column.min(at.column);
            b.max_column = b.max_column.max(at.column);
            b.min_row = b.min_row.min(at.row);
            b.max_row = b.max_row.max(at.row);
        }
        b
    }

    /// The piece in the target rotation state, placed by the unkicked mask.
    fn rotation_candidate(&self, direction: RotationDirection) -> Self {
        let to = self.rotation.rotate(direction);
        Self {
            rotation: to,
            cells: cells_from_mask(self.kind, to, self.anchor),
            ..*self
        }
    }

    /// Try the five SRS kick tests in order and return the first placement that fits.
    pub fn rotated(&self, board: &Board, direction: RotationDirection) -> Option<Self> {
        let candidate = self.rotation_candidate(direction);
        kicks(self.kind, self.rotation, candidate.rotation)
            .iter()
            .map(|&(kx, ky)| candidate.moved_by(kx, ky))
            .find(|kicked| kicked.is_valid(board))
    }

    /// Rotate with wall kicks. On failure the piece is left untouched.
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        match self.rotated(board, direction) {
            Some(rotated) => {
                *self = rotated;
                true
            }
            None => false,
        }
    }

    /// Rotate in place by the unkicked mask without consulting any board.
    pub fn rotate_unchecked(&mut self, direction: RotationDirection) {
        *self = self.rotation_candidate(direction);
    }

    /// Return to spawn rotation through unchecked quarter turns.
    pub fn reset_rotation(&mut self) {
        match self.rotation {
            Rotation::Spawn => {}
            Rotation::Right => self.rotate_unchecked(RotationDirection::CounterClockwise),
            Rotation::Reverse => {
                self.rotate_unchecked(RotationDirection::Clockwise);
                self.rotate_unchecked(RotationDirection::Clockwise);
            }
            Rotation::Left => self.rotate_unchecked(RotationDirection::Clockwise),
        }
    }

    /// A new piece of the same shape at the initial position.
    pub fn fresh(&self) -> Self {
        Self::new(self.kind)
    }

    /// Copy rotation state, anchor and cell positions from another piece.
    pub fn sync_with(&mut self, other: &Piece) {
        debug_assert_eq!(self.kind, other.kind);
        self.rotation = other.rotation;
        self.anchor = other.anchor;
        self.cells = other.cells;
    }

    /// Rows the piece can fall before landing.
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let mut distance: i8 = 0;
        while self.can_move_by(board, 0, -(distance + 1)) {
            distance += 1;
        }
        distance as u32
    }

    /// Fall straight down until landed. Returns the number of rows dropped.
    pub fn drop_to_floor(&mut self, board: &Board) -> u32 {
        let distance = self.drop_distance(board);
        self.move_by(0, -(distance as i8));
        distance
    }

    /// The piece cannot fall any further.
    pub fn is_landed(&self, board: &Board) -> bool {
        !self.can_move_by(board, 0, -1)
    }
}

fn cells_from_mask(kind: PieceKind, rotation: Rotation, anchor: Coord) -> [Coord; 4] {
    mask(kind, rotation).map(|(x, y)| anchor.plus(x, -y))
}
