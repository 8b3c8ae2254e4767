use serde::{Deserialize, Serialize};

/// A difficulty level outside `1..=10` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "difficulty level must be between {} and {}, got {level}",
    Difficulty::MIN.0,
    Difficulty::MAX.0
)]
pub struct InvalidDifficultyError {
    level: i64,
}

impl InvalidDifficultyError {
    #[must_use]
    pub fn level(&self) -> i64 {
        self.level
    }
}

/// Predictor difficulty level in `1..=10`.
///
/// The level sets the predictor's accuracy, which scales both the noise
/// added to placement scores and the reported confidence.
///
/// # Example
///
/// ```
/// use hintris_ai::Difficulty;
///
/// assert_eq!(Difficulty::new(1).unwrap().accuracy(), 0.6);
/// assert!(Difficulty::new(11).is_err());
/// assert_eq!(Difficulty::for_score(25_000).level(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = InvalidDifficultyError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = InvalidDifficultyError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .ok()
            .filter(|l| (Self::MIN.0..=Self::MAX.0).contains(l))
            .map(Self)
            .ok_or(InvalidDifficultyError { level })
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl Difficulty {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    /// Score needed per level when adapting difficulty from the game score.
    pub const SCORE_PER_LEVEL: u64 = 10_000;

    pub fn new(level: u8) -> Result<Self, InvalidDifficultyError> {
        Self::try_from(i64::from(level))
    }

    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// `0.6 + (level - 1) × 0.035`: 0.6 at level 1, 0.915 at level 10.
    #[must_use]
    pub fn accuracy(self) -> f64 {
        0.6 + f64::from(self.0 - 1) * 0.035
    }

    /// Level targeted for a cumulative game score: one level per 10 000 points, capped at 10.
    #[must_use]
    pub fn for_score(score: u64) -> Self {
        let level = (score / Self::SCORE_PER_LEVEL + 1).min(u64::from(Self::MAX.0));
        Self(u8::try_from(level).unwrap_or(Self::MAX.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_bounds() {
        assert_eq!(Difficulty::MIN.accuracy(), 0.6);
        assert_eq!(Difficulty::MAX.accuracy(), 0.6 + 9.0 * 0.035);
        assert!((Difficulty::MAX.accuracy() - 0.915).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_is_increasing() {
        let accuracies: Vec<_> = (1..=10)
            .map(|l| Difficulty::new(l).unwrap().accuracy())
            .collect();
        assert!(accuracies.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(Difficulty::new(0).unwrap_err().level(), 0);
        assert_eq!(Difficulty::new(11).unwrap_err().level(), 11);
        assert_eq!(
            Difficulty::new(11).unwrap_err().to_string(),
            "difficulty level must be between 1 and 10, got 11"
        );
    }

    #[test]
    fn test_wide_levels_are_rejected() {
        assert_eq!(Difficulty::try_from(7_i64).unwrap().level(), 7);
        for level in [-1_i64, 300, i64::MAX, i64::MIN] {
            assert_eq!(Difficulty::try_from(level).unwrap_err().level(), level);
        }
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(Difficulty::for_score(0).level(), 1);
        assert_eq!(Difficulty::for_score(9_999).level(), 1);
        assert_eq!(Difficulty::for_score(10_000).level(), 2);
        assert_eq!(Difficulty::for_score(95_000).level(), 10);
        assert_eq!(Difficulty::for_score(u64::MAX).level(), 10);
    }

    #[test]
    fn test_serde_validates_level() {
        let d: Difficulty = serde_json::from_str("4").unwrap();
        assert_eq!(d.level(), 4);
        assert!(serde_json::from_str::<Difficulty>("0").is_err());
        assert_eq!(serde_json::to_string(&d).unwrap(), "4");
    }
}
