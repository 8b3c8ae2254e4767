use std::fmt;

use hintris_engine::{Grid, PieceKind, Rotation};
use hintris_evaluator::{Placement, PlacementAnalysis};
use serde::{Deserialize, Serialize};

use crate::{difficulty::Difficulty, lookahead::ScoredPlacement};

/// Alternatives reported after the best move.
pub const MAX_ALTERNATIVES: usize = 3;
/// Raw score gap that maps to full confidence.
pub const CONFIDENCE_SCORE_GAP: f64 = 20.0;

/// A recommended placement with its reported score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub x: i32,
    pub rotation: Rotation,
    pub y: i32,
    pub score: f64,
}

impl ScoredMove {
    #[must_use]
    pub const fn new(placement: Placement, score: f64) -> Self {
        Self {
            x: placement.x,
            rotation: placement.rotation,
            y: placement.y,
            score,
        }
    }

    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement {
            x: self.x,
            rotation: self.rotation,
            y: self.y,
        }
    }
}

impl From<&ScoredPlacement> for ScoredMove {
    fn from(scored: &ScoredPlacement) -> Self {
        Self::new(scored.placement, scored.reported_score())
    }
}

/// The predictor's answer for one piece on one board.
///
/// ```
/// use hintris_ai::Predictor;
/// use hintris_engine::{Grid, Piece, PieceKind};
///
/// let mut predictor = Predictor::new();
/// let prediction = predictor
///     .predict_best_move(Piece::new(PieceKind::O), &Grid::EMPTY, &[])
///     .unwrap();
/// assert!(!prediction.cached);
/// assert!(prediction.alternatives.len() <= 3);
/// assert!((0.0..=1.0).contains(&prediction.confidence));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(rename = "move")]
    pub best_move: ScoredMove,
    pub confidence: f64,
    pub alternatives: Vec<ScoredMove>,
    pub reasoning: String,
    pub cached: bool,
}

impl Prediction {
    /// Builds a prediction from placements sorted best first.
    ///
    /// Returns `None` when `ranked` is empty.
    #[must_use]
    pub fn from_ranked(
        kind: PieceKind,
        grid: &Grid,
        ranked: &[ScoredPlacement],
        difficulty: Difficulty,
    ) -> Option<Self> {
        let (best, rest) = ranked.split_first()?;
        Some(Self {
            best_move: best.into(),
            confidence: confidence(ranked, difficulty),
            alternatives: rest
                .iter()
                .take(MAX_ALTERNATIVES)
                .map(ScoredMove::from)
                .collect(),
            reasoning: reasoning(kind, grid, best),
            cached: false,
        })
    }
}

/// Confidence in `[0, 1]` from the gap between the two best raw scores.
///
/// A single candidate is certain regardless of difficulty.
#[must_use]
pub fn confidence(ranked: &[ScoredPlacement], difficulty: Difficulty) -> f64 {
    match ranked {
        [best, second, ..] => {
            let gap = (best.raw_score - second.raw_score) / CONFIDENCE_SCORE_GAP;
            (gap.min(1.0) * difficulty.accuracy()).max(0.0)
        }
        _ => 1.0,
    }
}

/// Quality label derived from a reported score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ScoreBand {
    Excellent,
    Good,
    Acceptable,
    Defensive,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            Self::Excellent
        } else if score > 60.0 {
            Self::Good
        } else if score > 40.0 {
            Self::Acceptable
        } else {
            Self::Defensive
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Defensive => "defensive",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the best placement by simulating `kind` there.
#[must_use]
pub fn reasoning(kind: PieceKind, grid: &Grid, best: &ScoredPlacement) -> String {
    let analysis = PlacementAnalysis::from_grid(grid, best.placement.to_piece(kind));
    let band = ScoreBand::from_score(best.reported_score());
    let mut text = format!("{band} placement");
    match analysis.cleared_lines() {
        0 => {}
        1 => text.push_str(", clears 1 line"),
        n => text.push_str(&format!(", clears {n} lines")),
    }
    match analysis.board_analysis().holes() {
        0 => {}
        1 => text.push_str(", leaves 1 hole"),
        n => text.push_str(&format!(", leaves {n} holes")),
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(x: i32, raw_score: f64) -> ScoredPlacement {
        ScoredPlacement {
            placement: Placement {
                x,
                rotation: Rotation::SPAWN,
                y: 18,
            },
            raw_score,
        }
    }

    fn level(level: u8) -> Difficulty {
        Difficulty::new(level).unwrap()
    }

    #[test]
    fn test_confidence_single_candidate() {
        assert_eq!(confidence(&[scored(0, -3.0)], level(1)), 1.0);
        assert_eq!(confidence(&[], level(10)), 1.0);
    }

    #[test]
    fn test_confidence_scales_with_gap_and_accuracy() {
        let ranked = [scored(0, 10.0), scored(1, 0.0)];
        assert!((confidence(&ranked, level(1)) - 0.3).abs() < 1e-12);

        let wide = [scored(0, 50.0), scored(1, 0.0)];
        assert!((confidence(&wide, level(1)) - 0.6).abs() < 1e-12);
        assert!((confidence(&wide, level(10)) - 0.915).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_floored_at_zero() {
        let ranked = [scored(0, 0.0), scored(1, 5.0)];
        assert_eq!(confidence(&ranked, level(5)), 0.0);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80.5), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Acceptable);
        assert_eq!(ScoreBand::from_score(40.0), ScoreBand::Defensive);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Defensive);
    }

    #[test]
    fn test_reasoning_uses_recommended_piece() {
        // A vertical I in column 9 completes four rows; a T there would not.
        let grid = Grid::from_ascii(
            "#########.\n\
             #########.\n\
             #########.\n\
             #########.",
        );
        let best = ScoredPlacement {
            placement: Placement {
                x: 7,
                rotation: Rotation::new(1),
                y: 16,
            },
            raw_score: 150.0,
        };
        assert_eq!(
            reasoning(PieceKind::I, &grid, &best),
            "excellent placement, clears 4 lines"
        );
    }

    #[test]
    fn test_reasoning_reports_holes() {
        // An O bridging the gap in column 1 covers one empty cell.
        let grid = Grid::from_ascii("#.########");
        let best = ScoredPlacement {
            placement: Placement {
                x: 0,
                rotation: Rotation::SPAWN,
                y: 17,
            },
            raw_score: -8.0,
        };
        assert_eq!(
            reasoning(PieceKind::O, &grid, &best),
            "defensive placement, leaves 1 hole"
        );
    }

    #[test]
    fn test_from_ranked() {
        let ranked = [
            scored(0, 42.0),
            scored(1, 30.0),
            scored(2, 20.0),
            scored(3, 10.0),
            scored(4, 0.0),
        ];
        let prediction =
            Prediction::from_ranked(PieceKind::I, &Grid::EMPTY, &ranked, level(1)).unwrap();
        assert_eq!(prediction.best_move.x, 0);
        assert_eq!(prediction.best_move.score, 42.0);
        assert_eq!(
            prediction
                .alternatives
                .iter()
                .map(|m| m.x)
                .collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert!(prediction.reasoning.starts_with("acceptable placement"));
        assert!(!prediction.cached);

        assert!(Prediction::from_ranked(PieceKind::I, &Grid::EMPTY, &[], level(1)).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let prediction = Prediction::from_ranked(
            PieceKind::I,
            &Grid::EMPTY,
            &[scored(0, 120.0)],
            level(1),
        )
        .unwrap();
        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "move": { "x": 0, "rotation": 0, "y": 18, "score": 100.0 },
                "confidence": 1.0,
                "alternatives": [],
                "reasoning": "excellent placement",
                "cached": false,
            })
        );
    }
}
