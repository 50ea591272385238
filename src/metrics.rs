// Rolling session metrics
// Fixed-capacity latency window plus cumulative run statistics

use serde::Serialize;

/// Fixed-capacity circular buffer of inter-update intervals (seconds)
///
/// Once full, each push overwrites the oldest sample. Owned by the caller
/// (the session), not hidden behind shared state.
#[derive(Debug, Clone)]
pub struct LatencyWindow {
    samples: Vec<f64>,
    capacity: usize,
    /// Next slot to overwrite once the buffer is full
    head: usize,
}

impl LatencyWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "latency window capacity must be non-zero");
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    /// Record one inter-update interval
    pub fn push(&mut self, interval_secs: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push(interval_secs);
        } else {
            self.samples[self.head] = interval_secs;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Rolling average interval in seconds
    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        }
    }

    /// Updates per second implied by the rolling average
    pub fn throughput(&self) -> Option<f64> {
        self.average().and_then(|avg| {
            if avg > 0.0 {
                Some(1.0 / avg)
            } else {
                None
            }
        })
    }
}

/// Cumulative statistics over a simulation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub partial_fills: u64,
    pub total_fees: f64,
    pub total_slippage_cost: f64,
    pub total_impact_cost: f64,
    pub total_cost: f64,
    /// Rolling window average at the end of the run
    pub average_latency_ms: f64,
}
