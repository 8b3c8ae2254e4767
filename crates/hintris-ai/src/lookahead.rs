//! Placement scoring with a depth-limited lookahead over upcoming pieces.
//!
//! The immediate score of a placement is the heuristic value of the board it
//! leaves behind. When upcoming pieces are known, it is blended with the best
//! discounted value reachable by placing them:
//!
//! ```text
//! raw = 0.7 · immediate + 0.3 · lookahead(board, next[..2], 2)
//! lookahead(board, [p, rest..], d) = max over the first 5 placements of p of
//!     immediate(p) + 0.8 · lookahead(board after p, rest, d - 1)
//! ```
//!
//! The lookahead tries the first five placements in enumeration order, not
//! the five best. This bounds the search to `5^depth` leaves.

use std::ops::RangeInclusive;

use hintris_engine::{Grid, PieceKind};
use hintris_evaluator::{Placement, PlacementAnalysis, PlacementEvaluator, available_placements};

/// Plies searched below a scored placement.
pub const LOOKAHEAD_DEPTH: usize = 2;
/// Upcoming pieces considered by the lookahead.
pub const LOOKAHEAD_PIECES: usize = 2;
/// Placements tried per ply, in enumeration order.
pub const LOOKAHEAD_CANDIDATES: usize = 5;
/// Hard cap on the depth accepted by [`lookahead`].
pub const MAX_LOOKAHEAD_DEPTH: usize = 4;
/// Discount applied to each deeper ply.
pub const FUTURE_DISCOUNT: f64 = 0.8;
/// Share of the immediate score when blending with the lookahead.
pub const IMMEDIATE_WEIGHT: f64 = 0.7;
/// Share of the lookahead score when blending.
pub const LOOKAHEAD_WEIGHT: f64 = 0.3;
/// Range of reported placement scores.
pub const REPORTED_SCORE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// A placement with its unclamped score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    pub placement: Placement,
    /// Blended score used for ranking and confidence.
    pub raw_score: f64,
}

impl ScoredPlacement {
    /// The raw score clamped to `[0, 100]`.
    #[must_use]
    pub fn reported_score(&self) -> f64 {
        self.raw_score
            .clamp(*REPORTED_SCORE_RANGE.start(), *REPORTED_SCORE_RANGE.end())
    }
}

/// Scores placing `kind` at `placement`, adding `noise` to the immediate term.
#[must_use]
pub fn score_placement(
    evaluator: &dyn PlacementEvaluator,
    kind: PieceKind,
    placement: Placement,
    grid: &Grid,
    next_pieces: &[PieceKind],
    noise: f64,
) -> ScoredPlacement {
    let analysis = PlacementAnalysis::from_grid(grid, placement.to_piece(kind));
    let immediate = evaluator.evaluate_placement(&analysis) + noise;
    let raw_score = if next_pieces.is_empty() {
        immediate
    } else {
        let upcoming = &next_pieces[..next_pieces.len().min(LOOKAHEAD_PIECES)];
        let future = lookahead(evaluator, analysis.grid(), upcoming, LOOKAHEAD_DEPTH);
        IMMEDIATE_WEIGHT * immediate + LOOKAHEAD_WEIGHT * future
    };
    ScoredPlacement {
        placement,
        raw_score,
    }
}

/// Best discounted value reachable by placing `pieces` in order, up to `depth` plies.
///
/// Returns the plain heuristic of `grid` at depth 0, when no pieces remain, or
/// when the next piece has no legal placement. `depth` is capped at
/// [`MAX_LOOKAHEAD_DEPTH`].
#[must_use]
pub fn lookahead(
    evaluator: &dyn PlacementEvaluator,
    grid: &Grid,
    pieces: &[PieceKind],
    depth: usize,
) -> f64 {
    let depth = depth.min(MAX_LOOKAHEAD_DEPTH);
    let Some((&kind, rest)) = pieces.split_first().filter(|_| depth > 0) else {
        return evaluator.evaluate_grid(grid);
    };

    available_placements(grid, kind)
        .into_iter()
        .take(LOOKAHEAD_CANDIDATES)
        .map(|placement| {
            let analysis = PlacementAnalysis::from_grid(grid, placement.to_piece(kind));
            let immediate = evaluator.evaluate_placement(&analysis);
            immediate + FUTURE_DISCOUNT * lookahead(evaluator, analysis.grid(), rest, depth - 1)
        })
        .max_by(f64::total_cmp)
        .unwrap_or_else(|| evaluator.evaluate_grid(grid))
}
