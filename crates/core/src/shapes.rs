//! Shapes module - tetromino rotation masks and SRS wall kick tables
//!
//! Every shape has one occupancy mask per rotation state. A mask is stored as
//! the four occupied `(x, y)` offsets inside its bounding box, with `x` growing
//! to the right and `y` growing *downward* from the box's top-left corner.
//! Boxes are 4x4 for I, 2x2 for O and 3x3 for the rest.
//!
//! Wall kick offsets are `(x, y)` with `y` growing *upward*, matching the
//! matrix's row numbering.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino inside the rotation box (y down).
pub type MaskOffset = (i8, i8);

/// Four mino offsets for one rotation state.
pub type Mask = [MaskOffset; 4];

/// One `(x, y)` kick offset per test, test 0 first (y up).
pub type KickTests = [(i8, i8); 5];

/// Kick tests for the eight directed rotation transitions.
pub type KickTable = [KickTests; 8];

/// Side length of the rotation box of a shape.
pub fn box_size(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Occupancy mask of a shape in a rotation state.
pub fn mask(kind: PieceKind, rotation: Rotation) -> Mask {
    let masks = match kind {
        PieceKind::I => &I_MASKS,
        PieceKind::O => &O_MASKS,
        PieceKind::T => &T_MASKS,
        PieceKind::S => &S_MASKS,
        PieceKind::Z => &Z_MASKS,
        PieceKind::J => &J_MASKS,
        PieceKind::L => &L_MASKS,
    };
    masks[rotation.index()]
}

/// Kick tests for rotating `kind` from one state to an adjacent one.
///
/// I has its own table; every other shape shares the JLSTZ table. O never
/// needs more than test 0 because its mask is the same in every state.
///
/// Only quarter turns are in the table; a 180° pair is a contract violation.
pub fn kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static KickTests {
    let table = match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    &table[transition_index(from, to)]
}

/// Row of the kick table for a transition.
///
/// Order: 0->R, R->0, R->2, 2->R, 2->L, L->2, L->0, 0->L
fn transition_index(from: Rotation, to: Rotation) -> usize {
    use Rotation::*;
    match (from, to) {
        (Spawn, Right) => 0,
        (Right, Spawn) => 1,
        (Right, Reverse) => 2,
        (Reverse, Right) => 3,
        (Reverse, Left) => 4,
        (Left, Reverse) => 5,
        (Left, Spawn) => 6,
        (Spawn, Left) => 7,
        _ => {
            debug_assert!(false, "no kick data for {:?} -> {:?}", from, to);
            0
        }
    }
}

// 0000 / 1111 / 0000 / 0000, then clockwise
const I_MASKS: [Mask; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_MASKS: [Mask; 4] = [[(0, 0), (1, 0), (0, 1), (1, 1)]; 4];

const T_MASKS: [Mask; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_MASKS: [Mask; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_MASKS: [Mask; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_MASKS: [Mask; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_MASKS: [Mask; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// JLSTZ kick table (shared by J, L, S, T, Z and O)
const JLSTZ_KICKS: KickTable = [
    // 0->R
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // R->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // R->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->R
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->L
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // L->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // L->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->L
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I kick table
const I_KICKS: KickTable = [
    // 0->R
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // R->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // R->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->R
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->L
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // L->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // L->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->L
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RotationDirection;

    #[test]
    fn masks_fit_inside_their_box() {
        for kind in PieceKind::ALL {
            let size = box_size(kind);
            for r in 0..4 {
                for (x, y) in mask(kind, Rotation::from_index(r)) {
                    assert!((0..size).contains(&x) && (0..size).contains(&y));
                }
            }
        }
    }

    #[test]
    fn opposite_transitions_kick_in_opposite_directions() {
        for kind in [PieceKind::I, PieceKind::T] {
            for r in 0..4 {
                let from = Rotation::from_index(r);
                let to = from.rotate(RotationDirection::Clockwise);
                let forward = kicks(kind, from, to);
                let back = kicks(kind, to, from);
                for test in 0..5 {
                    assert_eq!(forward[test].0, -back[test].0);
                    assert_eq!(forward[test].1, -back[test].1);
                }
            }
        }
    }

    #[test]
    fn test_zero_never_kicks() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let from = Rotation::from_index(r);
                let to = from.rotate(RotationDirection::CounterClockwise);
                assert_eq!(kicks(kind, from, to)[0], (0, 0));
            }
        }
    }
}
