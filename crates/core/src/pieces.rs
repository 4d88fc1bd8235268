//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Implements the Super Rotation System (SRS) with wall kick tables.
//! Reference: https://tetris.wiki/SRS
//!
//! Coordinates are grid coordinates: `x` grows to the right and `y` grows
//! downward. Kick offsets are the published SRS values (which use y-up) with
//! their vertical component negated.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Kick offsets tried after the un-shifted placement, in order.
pub type KickRow = [MinoOffset; 4];

/// Row of the spawn origin: the two rows directly above the visible field.
pub const SPAWN_ROW: i8 = -2;

/// Shapes indexed by `[kind][rotation]`, kinds in id order (I O T S Z J L).
const SHAPES: [[PieceShape; 4]; 7] = [
    // I: horizontal on row 1 / vertical right-aligned / row 2 / left-aligned
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O: identical in every state
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Get the cell offsets for a piece kind and rotation
pub fn cells_for(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[(kind.id() - 1) as usize][rotation.index()]
}

/// Marker row for transitions that have no kicks (180° or identity).
const NO_KICKS: KickRow = [(0, 0); 4];

/// JLSTZ kick table indexed by `[from][to]` (shared by J, L, S, T, Z)
static JLSTZ_KICKS: [[KickRow; 4]; 4] = [
    // from North
    [
        NO_KICKS,
        [(-1, 0), (-1, -1), (0, 2), (-1, 2)], // 0->R
        NO_KICKS,
        [(1, 0), (1, -1), (0, 2), (1, 2)], // 0->L
    ],
    // from East
    [
        [(1, 0), (1, 1), (0, -2), (1, -2)], // R->0
        NO_KICKS,
        [(1, 0), (1, 1), (0, -2), (1, -2)], // R->2
        NO_KICKS,
    ],
    // from South
    [
        NO_KICKS,
        [(-1, 0), (-1, -1), (0, 2), (-1, 2)], // 2->R
        NO_KICKS,
        [(1, 0), (1, -1), (0, 2), (1, 2)], // 2->L
    ],
    // from West
    [
        [(-1, 0), (-1, 1), (0, -2), (-1, -2)], // L->0
        NO_KICKS,
        [(-1, 0), (-1, 1), (0, -2), (-1, -2)], // L->2
        NO_KICKS,
    ],
];

/// I piece kick table indexed by `[from][to]` (different from JLSTZ)
static I_KICKS: [[KickRow; 4]; 4] = [
    // from North
    [
        NO_KICKS,
        [(-2, 0), (1, 0), (-2, 1), (1, -2)], // 0->R
        NO_KICKS,
        [(-1, 0), (2, 0), (-1, -2), (2, 1)], // 0->L
    ],
    // from East
    [
        [(2, 0), (-1, 0), (2, -1), (-1, 2)], // R->0
        NO_KICKS,
        [(-1, 0), (2, 0), (-1, -2), (2, 1)], // R->2
        NO_KICKS,
    ],
    // from South
    [
        NO_KICKS,
        [(1, 0), (-2, 0), (1, 2), (-2, -1)], // 2->R
        NO_KICKS,
        [(2, 0), (-1, 0), (2, -1), (-1, 2)], // 2->L
    ],
    // from West
    [
        [(1, 0), (-2, 0), (1, 2), (-2, -1)], // L->0
        NO_KICKS,
        [(-2, 0), (1, 0), (-2, 1), (1, -2)], // L->2
        NO_KICKS,
    ],
];

/// Get the SRS wall kicks for a rotation transition.
///
/// The un-shifted placement is not part of the returned sequence; callers test
/// it first. O pieces and non-adjacent transitions have no kicks.
pub fn kick_table(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [MinoOffset] {
    let adjacent = (from.index() + to.index()) % 2 == 1;
    if !adjacent {
        return &[];
    }
    match kind {
        PieceKind::O => &[],
        PieceKind::I => &I_KICKS[from.index()][to.index()],
        _ => &JLSTZ_KICKS[from.index()][to.index()],
    }
}

/// Spawn origin for new pieces on a board of the given width.
///
/// Column 3 on a standard 10-wide board, so the 3-wide pieces sit left of
/// center and I/O are centered.
pub fn spawn_origin(width: u8) -> (i8, i8) {
    (((width as i8) - 4) / 2, SPAWN_ROW)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn test_every_shape_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                let shape = cells_for(kind, rotation);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} {:?}", kind, rotation);
                    }
                }
            }
        }
    }

    #[test]
    fn test_o_piece_shape_is_rotation_invariant() {
        let north = cells_for(PieceKind::O, Rotation::North);
        for rotation in ROTATIONS {
            assert_eq!(cells_for(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn test_kick_tables_only_cover_adjacent_states() {
        for kind in PieceKind::ALL {
            for from in ROTATIONS {
                assert!(kick_table(kind, from, from).is_empty());
                assert!(kick_table(kind, from, from.rotate_cw().rotate_cw()).is_empty());
                let cw = kick_table(kind, from, from.rotate_cw());
                let ccw = kick_table(kind, from, from.rotate_ccw());
                if kind == PieceKind::O {
                    assert!(cw.is_empty() && ccw.is_empty());
                } else {
                    assert_eq!(cw.len(), 4);
                    assert_eq!(ccw.len(), 4);
                }
            }
        }
    }

    #[test]
    fn test_kicks_invert_between_opposite_transitions() {
        // SRS tables are antisymmetric: the kicks for B->A negate those of A->B.
        for kind in [PieceKind::I, PieceKind::T] {
            for from in ROTATIONS {
                let to = from.rotate_cw();
                let forward = kick_table(kind, from, to);
                let backward = kick_table(kind, to, from);
                for (f, b) in forward.iter().zip(backward) {
                    assert_eq!((f.0, f.1), (-b.0, -b.1));
                }
            }
        }
    }

    #[test]
    fn test_i_piece_uses_own_table() {
        assert_ne!(
            kick_table(PieceKind::I, Rotation::North, Rotation::East),
            kick_table(PieceKind::T, Rotation::North, Rotation::East)
        );
        assert_eq!(
            kick_table(PieceKind::S, Rotation::North, Rotation::East),
            kick_table(PieceKind::T, Rotation::North, Rotation::East)
        );
    }

    #[test]
    fn test_spawn_origin() {
        assert_eq!(spawn_origin(10), (3, SPAWN_ROW));
        assert_eq!(spawn_origin(4), (0, SPAWN_ROW));
    }
}
