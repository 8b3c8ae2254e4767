//! Scoring of board states.
//!
//! A [`PlacementEvaluator`] turns the board left behind by a placement into a
//! single desirability score. [`HeuristicEvaluator`] is the linear four-factor
//! model:
//!
//! ```text
//! score = w.height·aggregate_height + w.lines·cleared_lines
//!       + w.holes·holes + w.bumpiness·bumpiness
//! ```
//!
//! Scores are unbounded and not clamped; with the default weights most
//! non-empty boards score below zero.

use std::fmt;

use hintris_engine::Grid;

use crate::{
    board_analysis::BoardAnalysis, placement_analysis::PlacementAnalysis,
    weights::HeuristicWeights,
};

/// Evaluates board states (higher is better).
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_board(&self, board: &BoardAnalysis, cleared_lines: usize) -> f64;

    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        self.evaluate_board(analysis.board_analysis(), analysis.cleared_lines())
    }

    /// Scores a grid that was reached without clearing lines.
    fn evaluate_grid(&self, grid: &Grid) -> f64 {
        self.evaluate_board(&BoardAnalysis::from_grid(grid.clone()), 0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut HeuristicWeights {
        &mut self.weights
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    #[inline]
    #[expect(clippy::cast_precision_loss)]
    fn evaluate_board(&self, board: &BoardAnalysis, cleared_lines: usize) -> f64 {
        let w = &self.weights;
        w.height * f64::from(board.aggregate_height())
            + w.lines * cleared_lines as f64
            + w.holes * f64::from(board.holes())
            + w.bumpiness * f64::from(board.bumpiness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_grid_scores_zero() {
        let evaluator = HeuristicEvaluator::default();
        assert_close(evaluator.evaluate_grid(&Grid::EMPTY), 0.0);
    }

    #[test]
    fn test_linear_combination() {
        let evaluator = HeuristicEvaluator::default();
        let grid = Grid::from_ascii(
            "
            #.........
            ..........
            #.........
            ",
        );
        let analysis = BoardAnalysis::from_grid(grid);
        // Height 3, one hole, bumpiness 3, two lines credited.
        let w = HeuristicWeights::DEFAULT;
        let expected = w.height * 3.0 + w.lines * 2.0 + w.holes * 1.0 + w.bumpiness * 3.0;
        assert_close(evaluator.evaluate_board(&analysis, 2), expected);
    }

    #[test]
    fn test_custom_weights() {
        let evaluator = HeuristicEvaluator::new(HeuristicWeights {
            height: 1.0,
            lines: 0.0,
            holes: 0.0,
            bumpiness: 0.0,
        });
        let grid = Grid::from_ascii("##########");
        assert_close(evaluator.evaluate_grid(&grid), 10.0);
    }
}
