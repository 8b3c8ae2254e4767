use std::path::PathBuf;

use hintris_ai::{Difficulty, PredictionError, Predictor};
use hintris_engine::{GameStats, Grid, Piece, PieceBuffer};
use serde::Serialize;
use tracing::{debug, info};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Maximum number of pieces to place
    #[clap(long, default_value_t = 500)]
    turns: usize,
    /// Seed for the piece sequence and, unless the config sets one, the score noise
    #[clap(long)]
    seed: Option<u64>,
    /// Path to the predictor configuration (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of upcoming pieces shown to the predictor
    #[clap(long, default_value_t = 2)]
    lookahead: usize,
}

/// Outcome of a headless game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GameSummary {
    pieces: usize,
    score: u64,
    lines: usize,
    /// Number of single, double, triple and tetris clears.
    line_clears: [usize; 4],
    difficulty: Difficulty,
    game_over: bool,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        turns,
        seed,
        config,
        lookahead,
    } = arg;

    let mut config = util::read_config_or_default(config.as_deref())?;
    if config.noise_seed.is_none() {
        config.noise_seed = *seed;
    }
    let mut predictor = Predictor::from_config(&config)?;
    let buffer = seed.map_or_else(PieceBuffer::new, PieceBuffer::with_seed);

    let summary = play(&mut predictor, buffer, *turns, *lookahead)?;
    info!(
        pieces = summary.pieces,
        score = summary.score,
        game_over = summary.game_over,
        "game finished"
    );
    Output::save_json(&summary, None)
}

/// Places up to `turns` pieces, stopping early when the stack tops out.
pub(crate) fn play(
    predictor: &mut Predictor,
    mut buffer: PieceBuffer,
    turns: usize,
    lookahead: usize,
) -> Result<GameSummary, PredictionError> {
    let mut grid = Grid::EMPTY;
    let mut stats = GameStats::new();
    let mut game_over = false;
    predictor.on_game_started();

    for turn in 0..turns {
        let kind = buffer.pop_next();
        let next_pieces = buffer.next_pieces().take(lookahead).collect::<Vec<_>>();
        let spawned = Piece::new(kind);
        if grid.is_colliding(spawned) {
            debug!(turn, %spawned, "spawn blocked");
            game_over = true;
            break;
        }

        let prediction = match predictor.predict_best_move(spawned, &grid, &next_pieces) {
            Ok(prediction) => prediction,
            Err(PredictionError::NoLegalPlacement { .. }) => {
                game_over = true;
                break;
            }
            Err(err) => return Err(err),
        };

        let placed = prediction.best_move.placement().to_piece(kind);
        grid.fill_piece(placed);
        let cleared_lines = grid.clear_lines();
        stats.complete_piece_drop(cleared_lines);
        debug!(
            turn,
            %placed,
            cleared_lines,
            score = stats.score(),
            confidence = prediction.confidence,
            "piece locked"
        );
        if let Some(difficulty) = predictor.on_piece_locked(stats.score()) {
            info!(turn, level = difficulty.level(), "difficulty adapted");
        }
    }

    let counter = stats.line_cleared_counter();
    Ok(GameSummary {
        pieces: stats.completed_pieces(),
        score: stats.score(),
        lines: stats.total_cleared_lines(),
        line_clears: [counter[1], counter[2], counter[3], counter[4]],
        difficulty: predictor.difficulty(),
        game_over,
    })
}
