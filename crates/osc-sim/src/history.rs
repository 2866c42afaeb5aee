//! Bounded trail history for rendering.

use std::collections::VecDeque;

/// Number of recent samples retained for trail rendering.
pub const TRAIL_CAPACITY: usize = 50;

/// Fixed-capacity FIFO of recent trail-coordinate samples.
///
/// Oldest samples are dropped first. This is a rendering aid, not part of
/// the physical state; it is cleared on reset.
#[derive(Clone, Debug, Default)]
pub struct TrailHistory {
    samples: VecDeque<f64>,
}

impl TrailHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(TRAIL_CAPACITY),
        }
    }

    /// Append a sample, dropping the oldest once at capacity.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == TRAIL_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Copy of the samples in chronological order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}
