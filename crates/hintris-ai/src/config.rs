use hintris_evaluator::HeuristicWeights;
use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// Predictor settings, typically loaded from JSON.
///
/// Every field is optional in the serialized form.
///
/// ```
/// use hintris_ai::PredictorConfig;
///
/// let config: PredictorConfig = serde_json::from_str(r#"{"difficulty": 4}"#).unwrap();
/// assert_eq!(config.difficulty, 4);
/// assert_eq!(config.cache_capacity, 1000);
/// assert!(config.auto_difficulty);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub weights: HeuristicWeights,
    /// Initial level, validated by [`Predictor::from_config`](crate::Predictor::from_config).
    pub difficulty: u8,
    pub cache_capacity: usize,
    /// Follow the game score on [`GameEvent::PieceLocked`](crate::GameEvent::PieceLocked).
    pub auto_difficulty: bool,
    /// Seed for reproducible noise. Entropy seeded when absent.
    pub noise_seed: Option<u64>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            weights: HeuristicWeights::default(),
            difficulty: 1,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            auto_difficulty: true,
            noise_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config: PredictorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PredictorConfig::default());
    }

    #[test]
    fn test_partial_weights() {
        let config: PredictorConfig =
            serde_json::from_str(r#"{"weights": {"holes": -1.0}, "noise_seed": 7}"#).unwrap();
        assert_eq!(config.weights.holes, -1.0);
        assert_eq!(config.weights.height, HeuristicWeights::DEFAULT.height);
        assert_eq!(config.noise_seed, Some(7));
    }
}
