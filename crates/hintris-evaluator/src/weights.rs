use serde::{Deserialize, Serialize};

/// Coefficients of the four-factor linear board heuristic.
///
/// Height, holes and bumpiness are penalties (negative); cleared lines are a
/// bonus. Missing fields deserialize to the default values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub height: f64,
    pub lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl HeuristicWeights {
    /// Hand-tuned default set.
    pub const DEFAULT: Self = Self {
        height: -0.510_066,
        lines: 0.760_666,
        holes: -0.356_63,
        bumpiness: -0.184_483,
    };

    /// Overwrites the fields present in `update`, leaving the others as they are.
    pub fn apply(&mut self, update: &WeightsUpdate) {
        let WeightsUpdate {
            height,
            lines,
            holes,
            bumpiness,
        } = *update;
        if let Some(w) = height {
            self.height = w;
        }
        if let Some(w) = lines {
            self.lines = w;
        }
        if let Some(w) = holes {
            self.holes = w;
        }
        if let Some(w) = bumpiness {
            self.bumpiness = w;
        }
    }
}

/// A partial update of [`HeuristicWeights`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsUpdate {
    pub height: Option<f64>,
    pub lines: Option<f64>,
    pub holes: Option<f64>,
    pub bumpiness: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update() {
        let mut weights = HeuristicWeights::DEFAULT;
        weights.apply(&WeightsUpdate {
            holes: Some(-1.0),
            ..WeightsUpdate::default()
        });
        assert_eq!(weights.holes, -1.0);
        assert_eq!(weights.height, HeuristicWeights::DEFAULT.height);
        assert_eq!(weights.lines, HeuristicWeights::DEFAULT.lines);
        assert_eq!(weights.bumpiness, HeuristicWeights::DEFAULT.bumpiness);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let weights: HeuristicWeights = serde_json::from_str(r#"{"lines": 2.0}"#).unwrap();
        assert_eq!(weights.lines, 2.0);
        assert_eq!(weights.height, HeuristicWeights::DEFAULT.height);

        let update: WeightsUpdate = serde_json::from_str(r#"{"bumpiness": -0.5}"#).unwrap();
        assert_eq!(update.bumpiness, Some(-0.5));
        assert_eq!(update.height, None);
    }
}
