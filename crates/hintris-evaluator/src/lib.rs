//! Board evaluation and placement enumeration for the hintris predictor.
//!
//! - [`board_analysis`] - Lazily computed heights, holes and bumpiness of a grid
//! - [`placement_analysis`] - The grid left behind by one placement and its cleared lines
//! - [`placement_evaluator`] - Scoring of board states ([`HeuristicEvaluator`])
//! - [`placement_enumerator`] - Every reachable resting placement of a piece
//! - [`weights`] - Heuristic coefficients and partial updates
//!
//! # Example
//!
//! ```
//! use hintris_engine::{Grid, PieceKind};
//! use hintris_evaluator::{
//!     HeuristicEvaluator, PlacementAnalysis, PlacementEvaluator as _, available_placements,
//! };
//!
//! let grid = Grid::EMPTY;
//! let evaluator = HeuristicEvaluator::default();
//! let best = available_placements(&grid, PieceKind::T)
//!     .into_iter()
//!     .map(|p| {
//!         let analysis = PlacementAnalysis::from_grid(&grid, p.to_piece(PieceKind::T));
//!         (p, evaluator.evaluate_placement(&analysis))
//!     })
//!     .max_by(|a, b| a.1.total_cmp(&b.1));
//! assert!(best.is_some());
//! ```

pub use self::{
    board_analysis::BoardAnalysis,
    placement_analysis::PlacementAnalysis,
    placement_enumerator::{MAX_PLACEMENTS, Placement, Placements, available_placements, hard_drop},
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
    weights::{HeuristicWeights, WeightsUpdate},
};

pub mod board_analysis;
pub mod placement_analysis;
pub mod placement_enumerator;
pub mod placement_evaluator;
pub mod weights;
