//! Move prediction for a heuristic Tetris player.
//!
//! [`Predictor`] ranks every resting placement of the falling piece with a
//! four-factor heuristic, optionally looking ahead at upcoming pieces, and
//! reports the best move with a confidence value. Predictions are cached per
//! piece and board; difficulty scales score noise and confidence.
//!
//! # Example
//!
//! ```
//! use hintris_ai::{PredictionRequest, Predictor};
//!
//! let request: PredictionRequest = serde_json::from_value(serde_json::json!({
//!     "piece": {"type": "I", "x": 3, "y": 0, "rotation": 0},
//!     "grid": vec![vec![0u8; 10]; 20],
//!     "nextPieces": ["O"],
//! }))
//! .unwrap();
//! let prediction = Predictor::new().handle_request(&request).unwrap();
//! assert!(!prediction.reasoning.is_empty());
//! ```

use hintris_engine::{InvalidGridError, PieceKind, UnknownPieceKindError};

pub use self::{
    cache::{DEFAULT_CACHE_CAPACITY, PredictionCache},
    config::PredictorConfig,
    difficulty::{Difficulty, InvalidDifficultyError},
    event::GameEvent,
    fingerprint::Fingerprint,
    lookahead::{ScoredPlacement, lookahead, score_placement},
    noise::ScoreNoise,
    prediction::{Prediction, ScoreBand, ScoredMove},
    predictor::Predictor,
    request::{PredictionRequest, RawPiece},
};

mod cache;
mod config;
mod difficulty;
mod event;
mod fingerprint;
pub mod lookahead;
mod noise;
pub mod prediction;
mod predictor;
pub mod request;

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum PredictionError {
    #[display("invalid grid: {_0}")]
    InvalidGrid(InvalidGridError),
    #[display("{_0}")]
    UnknownPieceKind(UnknownPieceKindError),
    #[display("{_0}")]
    InvalidDifficulty(InvalidDifficultyError),
    #[display("no legal placement for piece {kind}")]
    NoLegalPlacement { kind: PieceKind },
}
