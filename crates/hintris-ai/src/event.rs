use serde::{Deserialize, Serialize};

/// Game lifecycle notifications consumed by the predictor.
///
/// ```
/// use hintris_ai::GameEvent;
///
/// let event: GameEvent = serde_json::from_str(r#"{"type":"pieceLocked","score":12000}"#).unwrap();
/// assert_eq!(event, GameEvent::PieceLocked { score: 12_000 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    GameStarted,
    GameRestarted,
    /// A piece settled; `score` is the cumulative game score.
    PieceLocked { score: u64 },
}
