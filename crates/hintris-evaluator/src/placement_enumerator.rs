//! Enumeration of final resting placements.
//!
//! For every rotation and every box column in `-3..13`, the piece is hard
//! dropped from row 0. A placement is kept when the landed piece does not
//! collide and its box row is at least 0. Placements are produced
//! rotation-major, then by ascending column, and are not deduplicated: the O
//! piece yields the same cells for all four rotations.

use std::ops::Range;

use arrayvec::ArrayVec;
use hintris_engine::{Grid, Piece, PieceKind, Rotation};
use serde::{Deserialize, Serialize};

/// Box columns tried for every rotation.
pub const PLACEMENT_X_RANGE: Range<i32> = -3..13;

#[expect(clippy::cast_sign_loss)]
const COLUMNS_PER_ROTATION: usize = (PLACEMENT_X_RANGE.end - PLACEMENT_X_RANGE.start) as usize;

/// Upper bound of placements a single piece can have.
pub const MAX_PLACEMENTS: usize = Rotation::ALL.len() * COLUMNS_PER_ROTATION;

pub type Placements = ArrayVec<Placement, MAX_PLACEMENTS>;

/// A final resting position: box column, rotation and landed box row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub rotation: Rotation,
    pub y: i32,
}

impl Placement {
    #[must_use]
    pub const fn to_piece(self, kind: PieceKind) -> Piece {
        Piece::with_placement(kind, self.x, self.y, self.rotation)
    }
}

/// Drops the piece from row 0 in its column and rotation.
///
/// Returns the last row before the first collision, or `None` if the piece
/// already collides at row 0.
#[must_use]
pub fn hard_drop(grid: &Grid, piece: Piece) -> Option<Piece> {
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const FLOOR: i32 = Grid::HEIGHT as i32;
    // A piece whose box starts at the floor row always collides.
    let first_collision = (0..=FLOOR)
        .find(|&y| grid.is_colliding(piece.with_position(piece.x(), y)))
        .unwrap_or(FLOOR);
    let landed = piece.with_position(piece.x(), first_collision - 1);
    (landed.y() >= 0 && !grid.is_colliding(landed)).then_some(landed)
}

/// Lists every reachable resting placement of `kind` on `grid`.
#[must_use]
pub fn available_placements(grid: &Grid, kind: PieceKind) -> Placements {
    let mut placements = Placements::new();
    for rotation in Rotation::ALL {
        for x in PLACEMENT_X_RANGE {
            let piece = Piece::with_placement(kind, x, 0, rotation);
            if let Some(landed) = hard_drop(grid, piece) {
                placements.push(Placement {
                    x,
                    rotation,
                    y: landed.y(),
                });
            }
        }
    }
    placements
}
