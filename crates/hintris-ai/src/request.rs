//! Unvalidated prediction input as received from callers.

use serde::{Deserialize, Serialize};

/// A piece as described by the caller. `kind` is a kind name such as `"T"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPiece {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub rotation: i32,
}

/// One prediction request.
///
/// Grid dimensions, piece kinds and difficulty are checked by
/// [`Predictor::handle_request`](crate::Predictor::handle_request).
///
/// ```
/// use hintris_ai::PredictionRequest;
///
/// let json = r#"{
///     "piece": {"type": "T", "x": 3, "y": 0, "rotation": 0},
///     "grid": [],
///     "nextPieces": ["I", "O"],
///     "difficultyLevel": 5
/// }"#;
/// let request: PredictionRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.next_pieces.len(), 2);
/// assert_eq!(request.difficulty_level, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub piece: RawPiece,
    pub grid: Vec<Vec<u8>>,
    #[serde(default)]
    pub next_pieces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Any integer is accepted here; levels outside `1..=10` are rejected
    /// when the request is handled.
    pub difficulty_level: Option<i64>,
}
