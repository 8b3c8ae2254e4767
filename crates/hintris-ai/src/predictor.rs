use hintris_engine::{Grid, Piece, PieceKind, Rotation};
use hintris_evaluator::{HeuristicEvaluator, HeuristicWeights, WeightsUpdate, available_placements};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    PredictionError,
    cache::PredictionCache,
    config::PredictorConfig,
    difficulty::{Difficulty, InvalidDifficultyError},
    event::GameEvent,
    fingerprint::Fingerprint,
    lookahead::{ScoredPlacement, score_placement},
    noise::ScoreNoise,
    prediction::Prediction,
    request::PredictionRequest,
};

/// Move predictor holding weights, difficulty, noise source and cache.
///
/// All state belongs to the instance, so independent predictors never
/// interfere. Mutating operations take `&mut self`; wrap the predictor in a
/// mutex to share it across threads.
///
/// # Example
///
/// ```
/// use hintris_ai::{Predictor, ScoreNoise};
/// use hintris_engine::{Grid, Piece, PieceKind};
///
/// let mut predictor = Predictor::new().with_noise(ScoreNoise::seeded(1));
/// let grid = Grid::EMPTY;
/// let first = predictor
///     .predict_best_move(Piece::new(PieceKind::T), &grid, &[PieceKind::I])
///     .unwrap();
/// let again = predictor
///     .predict_best_move(Piece::new(PieceKind::T), &grid, &[PieceKind::I])
///     .unwrap();
/// assert!(again.cached);
/// assert_eq!(again.best_move, first.best_move);
/// ```
#[derive(Debug, Clone)]
pub struct Predictor {
    evaluator: HeuristicEvaluator,
    difficulty: Difficulty,
    auto_difficulty: bool,
    cache: PredictionCache,
    noise: ScoreNoise,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor {
    /// Default weights, difficulty 1, entropy-seeded noise.
    #[must_use]
    pub fn new() -> Self {
        Self {
            evaluator: HeuristicEvaluator::default(),
            difficulty: Difficulty::default(),
            auto_difficulty: true,
            cache: PredictionCache::default(),
            noise: ScoreNoise::from_entropy(),
        }
    }

    pub fn from_config(config: &PredictorConfig) -> Result<Self, InvalidDifficultyError> {
        let difficulty = Difficulty::new(config.difficulty)?;
        let noise = config
            .noise_seed
            .map_or_else(ScoreNoise::from_entropy, ScoreNoise::seeded);
        Ok(Self {
            evaluator: HeuristicEvaluator::new(config.weights),
            difficulty,
            auto_difficulty: config.auto_difficulty,
            cache: PredictionCache::with_capacity(config.cache_capacity),
            noise,
        })
    }

    #[must_use]
    pub fn with_noise(mut self, noise: ScoreNoise) -> Self {
        self.noise = noise;
        self
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        self.evaluator.weights()
    }

    #[must_use]
    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    /// Sets the level, leaving the current one in place if `level` is out of range.
    pub fn set_difficulty(&mut self, level: u8) -> Result<(), InvalidDifficultyError> {
        let difficulty =
            Difficulty::new(level).inspect_err(|err| warn!(%err, "difficulty rejected"))?;
        self.change_difficulty(difficulty);
        Ok(())
    }

    /// Overwrites the weights named in `update`. Cached predictions are kept.
    pub fn update_weights(&mut self, update: &WeightsUpdate) {
        self.evaluator.weights_mut().apply(update);
        debug!(weights = ?self.evaluator.weights(), "weights updated");
    }

    pub fn on_game_started(&mut self) {
        self.clear_cache("game started");
    }

    pub fn on_game_restarted(&mut self) {
        self.clear_cache("game restarted");
    }

    /// Adapts the difficulty to the cumulative game score.
    ///
    /// Returns the new level when it changed.
    pub fn on_piece_locked(&mut self, score: u64) -> Option<Difficulty> {
        if !self.auto_difficulty {
            return None;
        }
        let target = Difficulty::for_score(score);
        (target != self.difficulty).then(|| {
            self.change_difficulty(target);
            target
        })
    }

    pub fn handle_event(&mut self, event: GameEvent) -> Option<Difficulty> {
        match event {
            GameEvent::GameStarted => {
                self.on_game_started();
                None
            }
            GameEvent::GameRestarted => {
                self.on_game_restarted();
                None
            }
            GameEvent::PieceLocked { score } => self.on_piece_locked(score),
        }
    }

    /// Validates a raw request and predicts its best move.
    ///
    /// A valid `difficulty_level` is applied before predicting and stays in
    /// effect. Nothing changes if any part of the request is invalid.
    pub fn handle_request(
        &mut self,
        request: &PredictionRequest,
    ) -> Result<Prediction, PredictionError> {
        let grid = Grid::from_rows(&request.grid).map_err(PredictionError::InvalidGrid)?;
        let kind = request
            .piece
            .kind
            .parse::<PieceKind>()
            .map_err(PredictionError::UnknownPieceKind)?;
        let next_pieces = request
            .next_pieces
            .iter()
            .map(|name| name.parse::<PieceKind>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(PredictionError::UnknownPieceKind)?;
        let difficulty = request
            .difficulty_level
            .map(Difficulty::try_from)
            .transpose()
            .map_err(PredictionError::InvalidDifficulty)?;

        if let Some(difficulty) = difficulty {
            self.change_difficulty(difficulty);
        }
        let piece = Piece::with_placement(
            kind,
            request.piece.x,
            request.piece.y,
            Rotation::new(request.piece.rotation),
        );
        self.predict_best_move(piece, &grid, &next_pieces)
    }

    /// Ranks every placement of `piece` on `grid` and recommends the best.
    ///
    /// Results are cached by the piece and grid. Upcoming pieces do not take
    /// part in the cache key.
    pub fn predict_best_move(
        &mut self,
        piece: Piece,
        grid: &Grid,
        next_pieces: &[PieceKind],
    ) -> Result<Prediction, PredictionError> {
        let fingerprint = Fingerprint::new(piece, grid);
        if let Some(hit) = self.cache.get(&fingerprint) {
            debug!(%fingerprint, "prediction cache hit");
            return Ok(Prediction {
                cached: true,
                ..hit.clone()
            });
        }

        let kind = piece.kind();
        let ranked = self.rank_placements(kind, grid, next_pieces);
        let Some(prediction) = Prediction::from_ranked(kind, grid, &ranked, self.difficulty) else {
            warn!(%piece, "no legal placement");
            return Err(PredictionError::NoLegalPlacement { kind });
        };
        debug!(
            %fingerprint,
            candidates = ranked.len(),
            best_score = prediction.best_move.score,
            confidence = prediction.confidence,
            "prediction computed"
        );
        self.cache.insert(fingerprint, prediction.clone());
        Ok(prediction)
    }

    /// Scores all placements, best first. Ties keep enumeration order.
    fn rank_placements(
        &mut self,
        kind: PieceKind,
        grid: &Grid,
        next_pieces: &[PieceKind],
    ) -> Vec<ScoredPlacement> {
        let placements = available_placements(grid, kind);
        let accuracy = self.difficulty.accuracy();
        let noise = placements
            .iter()
            .map(|_| self.noise.sample(accuracy))
            .collect::<Vec<_>>();
        let evaluator = &self.evaluator;

        #[cfg(feature = "rayon")]
        let mut ranked = placements
            .as_slice()
            .par_iter()
            .zip(noise.par_iter())
            .map(|(&placement, &sample)| {
                score_placement(evaluator, kind, placement, grid, next_pieces, sample)
            })
            .collect::<Vec<_>>();
        #[cfg(not(feature = "rayon"))]
        let mut ranked = placements
            .iter()
            .zip(&noise)
            .map(|(&placement, &sample)| {
                score_placement(evaluator, kind, placement, grid, next_pieces, sample)
            })
            .collect::<Vec<_>>();

        ranked.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));
        ranked
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            info!(
                from = self.difficulty.level(),
                to = difficulty.level(),
                "difficulty changed"
            );
            self.difficulty = difficulty;
        }
    }

    fn clear_cache(&mut self, reason: &str) {
        info!(entries = self.cache.len(), reason, "prediction cache cleared");
        self.cache.clear();
    }
}
