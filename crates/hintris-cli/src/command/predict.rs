use std::path::PathBuf;

use anyhow::Context as _;
use hintris_ai::{PredictionRequest, Predictor};
use tracing::info;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Path to the prediction request (JSON format)
    request_path: PathBuf,
    /// Path to the predictor configuration (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let PredictArg {
        request_path,
        config,
        output,
    } = arg;

    let config = util::read_config_or_default(config.as_deref())?;
    let mut predictor = Predictor::from_config(&config)?;
    let request: PredictionRequest = util::read_json_file("request", request_path)?;

    let prediction = predictor
        .handle_request(&request)
        .with_context(|| format!("Failed to predict move for {}", request_path.display()))?;
    info!(
        x = prediction.best_move.x,
        rotation = %prediction.best_move.rotation,
        y = prediction.best_move.y,
        confidence = prediction.confidence,
        "predicted move"
    );

    Output::save_json(&prediction, output.clone())
}
