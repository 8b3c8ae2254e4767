use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

/// Scale of the score perturbation at accuracy 0.
pub const NOISE_SCALE: f64 = 0.2;

/// Source of the uniform perturbation added to immediate placement scores.
///
/// A sample is `(u - 0.5) × (1 - accuracy) × 0.2` with `u` uniform in
/// `[0, 1)`, so lower accuracy means a wider spread. Seeded sources make
/// predictions reproducible; [`ScoreNoise::silent`] disables the perturbation.
#[derive(Debug, Clone)]
pub struct ScoreNoise {
    rng: Option<Pcg32>,
}

impl Default for ScoreNoise {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ScoreNoise {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(Pcg32::seed_from_u64(seed)),
        }
    }

    /// A source that always yields zero.
    #[must_use]
    pub const fn silent() -> Self {
        Self { rng: None }
    }

    pub fn sample(&mut self, accuracy: f64) -> f64 {
        let Some(rng) = &mut self.rng else {
            return 0.0;
        };
        let u: f64 = rng.random();
        (u - 0.5) * (1.0 - accuracy) * NOISE_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_is_zero() {
        let mut noise = ScoreNoise::silent();
        assert_eq!(noise.sample(0.6), 0.0);
    }

    #[test]
    fn test_samples_are_bounded_by_accuracy() {
        let mut noise = ScoreNoise::seeded(1);
        let bound = (1.0 - 0.6) * NOISE_SCALE / 2.0;
        for _ in 0..1000 {
            let s = noise.sample(0.6);
            assert!((-bound..bound).contains(&s), "{s} out of bounds");
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = ScoreNoise::seeded(42);
        let mut b = ScoreNoise::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.sample(0.7).to_bits(), b.sample(0.7).to_bits());
        }
    }
}
