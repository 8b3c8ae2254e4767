use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::{fingerprint::Fingerprint, prediction::Prediction};

/// Default number of entries held before eviction.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Predictions memoized by [`Fingerprint`].
///
/// Entries are kept in insertion order. When an insert makes the cache hold
/// more than `capacity` entries, the oldest half is dropped in one pass.
#[derive(Debug, Clone)]
pub struct PredictionCache {
    entries: HashMap<Fingerprint, Prediction>,
    order: VecDeque<Fingerprint>,
    capacity: usize,
}

impl Default for PredictionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl PredictionCache {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&Prediction> {
        self.entries.get(fingerprint)
    }

    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn insert(&mut self, fingerprint: Fingerprint, prediction: Prediction) {
        if self
            .entries
            .insert(fingerprint.clone(), prediction)
            .is_none()
        {
            self.order.push_back(fingerprint);
        }
        if self.entries.len() > self.capacity {
            self.evict_oldest_half();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Drops the oldest half, or more when that still exceeds the capacity.
    fn evict_oldest_half(&mut self) {
        let len = self.entries.len();
        let count = (len / 2).max(len.saturating_sub(self.capacity));
        for fingerprint in self.order.drain(..count) {
            self.entries.remove(&fingerprint);
        }
        debug!(
            evicted = count,
            remaining = self.entries.len(),
            "prediction cache evicted"
        );
    }
}
