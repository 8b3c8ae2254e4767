use std::collections::VecDeque;

use rand::{Rng, SeedableRng as _, seq::SliceRandom};
use rand_pcg::Pcg32;

use crate::PieceKind;

/// Supplies pieces using the 7-bag randomization algorithm.
///
/// Every run of seven pieces drawn from a fresh bag contains each kind exactly
/// once. The buffer keeps more than one bag queued so that a preview of the
/// upcoming pieces is always available.
///
/// # Example
///
/// ```
/// use hintris_engine::PieceBuffer;
///
/// let mut buffer = PieceBuffer::with_seed(42);
/// let first = buffer.pop_next();
/// let upcoming: Vec<_> = buffer.next_pieces().take(2).collect();
/// assert_eq!(upcoming.len(), 2);
/// # let _ = first;
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    bag: VecDeque<PieceKind>,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBuffer {
    /// Creates a new piece buffer with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut this = Self {
            rng: Pcg32::seed_from_u64(seed),
            bag: VecDeque::with_capacity(PieceKind::LEN * 2),
        };
        this.fill_bag();
        this
    }

    /// Refills when 7 or fewer pieces remain.
    fn fill_bag(&mut self) {
        while self.bag.len() <= PieceKind::LEN {
            let mut new_bag = PieceKind::ALL;
            new_bag.shuffle(&mut self.rng);
            self.bag.extend(new_bag);
        }
    }

    /// Draws the next piece from the bag.
    pub fn pop_next(&mut self) -> PieceKind {
        self.fill_bag();
        self.bag
            .pop_front()
            .expect("Piece bag should never be empty")
    }

    /// Returns an iterator over the upcoming pieces, nearest first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.bag.iter().copied()
    }
}
