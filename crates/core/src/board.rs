//! Board module - manages the matrix
//!
//! The matrix is a 10x40 grid where each cell is empty or holds a locked mino.
//! Rows 21-40 form the hidden buffer above the visible play area.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates are 1-based: columns 1..=10 left to right, rows 1..=40 bottom to top.

use crate::error::LockOut;
use crate::piece::Piece;
use crate::types::{Cell, Coord, Mino, BOARD_COLUMNS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_COLUMNS as usize) * (BOARD_ROWS as usize);

/// The matrix - 10 columns x 40 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major from the bottom ((row - 1) * COLUMNS + (column - 1))
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from a 1-based coordinate
    #[inline(always)]
    fn index(column: i8, row: i8) -> Option<usize> {
        if column < 1 || column > BOARD_COLUMNS as i8 || row < 1 || row > BOARD_ROWS as i8 {
            return None;
        }
        Some((row as usize - 1) * (BOARD_COLUMNS as usize) + (column as usize - 1))
    }

    pub fn columns(&self) -> u8 {
        BOARD_COLUMNS
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    /// Get cell at a coordinate.
    /// Returns None if out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        Self::index(at.column, at.row).map(|idx| self.cells[idx])
    }

    /// Set cell at a coordinate.
    /// Returns false if out of bounds
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match Self::index(at.column, at.row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Column and row are inside the matrix.
    pub fn is_valid(&self, at: Coord) -> bool {
        Self::index(at.column, at.row).is_some()
    }

    /// Nothing is locked at this coordinate.
    ///
    /// Out-of-range coordinates are never empty; combine with [`Board::is_valid`]
    /// or use [`Board::can_move_to`].
    pub fn is_empty(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(None))
    }

    /// A mino may occupy this coordinate.
    pub fn can_move_to(&self, at: Coord) -> bool {
        self.is_valid(at) && self.is_empty(at)
    }

    /// Transfer a piece's minos to the matrix.
    ///
    /// Fails with [`LockOut`] if any target cell is taken or outside the matrix.
    /// Nothing is written on failure.
    pub fn lock(&mut self, piece: &mut Piece) -> Result<(), LockOut> {
        if let Some(&at) = piece.cells().iter().find(|&&at| !self.can_move_to(at)) {
            return Err(LockOut { at });
        }

        let mino = Mino {
            kind: piece.kind(),
            locked: true,
        };
        for &at in piece.cells() {
            self.set(at, Some(mino));
        }
        piece.mark_locked();
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_filled(&self, row: i8) -> bool {
        match self.row(row) {
            Some(cells) => cells.iter().all(|cell| cell.is_some()),
            None => false,
        }
    }

    /// Empty every cell in a row.
    pub fn clear_row(&mut self, row: i8) {
        if let Some(start) = Self::index(1, row) {
            self.cells[start..start + BOARD_COLUMNS as usize].fill(None);
        }
    }

    /// Move every row at or above `from_row` down by one.
    ///
    /// Rows are processed from `from_row` upward; the top row becomes empty.
    /// Row `from_row - 1` is overwritten, so callers clear it first.
    pub fn shift_down(&mut self, from_row: i8) {
        let width = BOARD_COLUMNS as usize;
        let first = from_row.max(2);
        if first > BOARD_ROWS as i8 {
            return;
        }

        let src_start = (first as usize - 1) * width;
        // copy_within handles the overlap
        self.cells.copy_within(src_start.., src_start - width);
        self.cells[BOARD_SIZE - width..].fill(None);
    }

    /// Borrow one row of cells (columns 1..=10), or None when out of range.
    pub fn row(&self, row: i8) -> Option<&[Cell]> {
        let start = Self::index(1, row)?;
        Some(&self.cells[start..start + BOARD_COLUMNS as usize])
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, top row first, bottom row last.
    ///
    /// `#` marks an occupied cell and `.` an empty one. The rows given end up at
    /// the bottom of the matrix.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PieceKind;

        let mut board = Board::new();
        for (i, line) in rows.iter().rev().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.set(
                        Coord::new(x as i8 + 1, i as i8 + 1),
                        Some(Mino {
                            kind: PieceKind::I,
                            locked: true,
                        }),
                    );
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
