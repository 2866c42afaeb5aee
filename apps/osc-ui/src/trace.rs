//! Rolling time-series buffer for plotting.

use std::collections::VecDeque;

/// Retained plot samples: 20 s at the 0.016 s frame step.
const PLOT_CAPACITY: usize = 1250;

/// Rolling buffer of (t, value) samples for the live plot.
///
/// Distinct from the session's trail history: this is a frontend concern
/// with its own, longer window.
#[derive(Default)]
pub struct PlotTrace {
    samples: VecDeque<[f64; 2]>,
}

impl PlotTrace {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(PLOT_CAPACITY),
        }
    }

    pub fn push(&mut self, t_s: f64, value: f64) {
        if self.samples.len() == PLOT_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back([t_s, value]);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples in chronological order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_over_at_capacity() {
        let mut trace = PlotTrace::new();
        for i in 0..(PLOT_CAPACITY + 5) {
            trace.push(i as f64, 0.0);
        }
        let points = trace.points();
        assert_eq!(points.len(), PLOT_CAPACITY);
        assert_eq!(points[0][0], 5.0);
    }
}
