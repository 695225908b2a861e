//! Board tests: bounds, locking and line clearing through the public API.

use guideline_tetris::core::{Board, LockOut, Piece};
use guideline_tetris::types::{Coord, Mino, PieceKind, BOARD_COLUMNS, BOARD_ROWS};

fn mino(kind: PieceKind) -> Option<Mino> {
    Some(Mino { kind, locked: true })
}

fn fill_row(board: &mut Board, row: i8) {
    for column in 1..=BOARD_COLUMNS as i8 {
        board.set(Coord::new(column, row), mino(PieceKind::I));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.columns(), 10);
    assert_eq!(board.rows(), 40);
    assert_eq!(board.occupied(), 0);

    for row in 1..=BOARD_ROWS as i8 {
        for column in 1..=BOARD_COLUMNS as i8 {
            let at = Coord::new(column, row);
            assert!(board.can_move_to(at), "{:?} should be free", at);
        }
    }
}

#[test]
fn test_board_bounds_are_one_based() {
    let board = Board::new();
    assert!(!board.is_valid(Coord::new(0, 1)));
    assert!(!board.is_valid(Coord::new(1, 0)));
    assert!(!board.is_valid(Coord::new(11, 1)));
    assert!(!board.is_valid(Coord::new(1, 41)));
    assert!(board.is_valid(Coord::new(10, 40)));

    // out of range is never empty
    assert!(!board.is_empty(Coord::new(0, 0)));
    assert_eq!(board.get(Coord::new(-1, 3)), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    let at = Coord::new(5, 10);

    assert!(board.set(at, mino(PieceKind::T)));
    assert_eq!(board.get(at), Some(mino(PieceKind::T)));
    assert!(!board.can_move_to(at));

    assert!(board.set(at, None));
    assert!(board.can_move_to(at));
    assert!(!board.set(Coord::new(11, 10), mino(PieceKind::T)));
}

#[test]
fn test_lock_transfers_cells_once() {
    let mut board = Board::new();
    let mut piece = Piece::new(PieceKind::O);
    assert!(piece.is_valid(&board));

    board.lock(&mut piece).unwrap();
    assert!(piece.is_locked());
    assert_eq!(board.occupied(), 4);
    for &at in piece.cells() {
        assert_eq!(board.get(at), Some(mino(PieceKind::O)));
    }

    let mut again = piece;
    assert!(matches!(board.lock(&mut again), Err(LockOut { .. })));
    assert_eq!(board.occupied(), 4);
}

#[test]
fn test_lock_out_writes_nothing() {
    let mut board = Board::new();
    let mut piece = Piece::new(PieceKind::I);
    let blocked = piece.cells()[3];
    board.set(blocked, mino(PieceKind::Z));

    assert_eq!(board.lock(&mut piece), Err(LockOut { at: blocked }));
    assert_eq!(board.occupied(), 1);
    assert!(!piece.is_locked());
}

#[test]
fn test_row_filled_and_cleared() {
    let mut board = Board::new();
    fill_row(&mut board, 1);
    board.set(Coord::new(3, 2), mino(PieceKind::S));

    assert!(board.is_row_filled(1));
    assert!(!board.is_row_filled(2));
    assert!(!board.is_row_filled(0));

    board.clear_row(1);
    assert!(!board.is_row_filled(1));
    assert_eq!(board.occupied(), 1);

    board.shift_down(2);
    assert_eq!(board.get(Coord::new(3, 1)), Some(mino(PieceKind::S)));
    assert_eq!(board.get(Coord::new(3, 2)), Some(None));
}

#[test]
fn test_shift_down_moves_everything_above() {
    let mut board = Board::new();
    board.set(Coord::new(1, 5), mino(PieceKind::J));
    board.set(Coord::new(10, 40), mino(PieceKind::L));
    board.clear_row(4);

    board.shift_down(5);
    assert_eq!(board.get(Coord::new(1, 4)), Some(mino(PieceKind::J)));
    assert_eq!(board.get(Coord::new(10, 39)), Some(mino(PieceKind::L)));
    assert_eq!(board.row(40).unwrap().iter().flatten().count(), 0);
}

#[test]
fn test_clear_empties_everything() {
    let mut board = Board::new();
    fill_row(&mut board, 7);
    board.clear();
    assert_eq!(board.occupied(), 0);
}
