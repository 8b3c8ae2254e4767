//! Result of simulating a single placement.
//!
//! [`PlacementAnalysis`] places a piece on a private copy of the grid, clears
//! full rows once, and keeps both the number of cleared lines and the
//! resulting [`BoardAnalysis`].

use hintris_engine::{Grid, Piece};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Piece,
    cleared_lines: usize,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    #[must_use]
    pub fn from_grid(before_placement: &Grid, placement: Piece) -> Self {
        let mut grid = before_placement.clone();
        grid.fill_piece(placement);
        let cleared_lines = grid.clear_lines();

        Self {
            placement,
            cleared_lines,
            board_analysis: BoardAnalysis::from_grid(grid),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    /// The grid after placement and line clearing.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.board_analysis.grid()
    }
}
