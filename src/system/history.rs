use std::collections::VecDeque;

use crate::error::{MonitorError, Result};
use crate::system::metric::Metric;

pub const DEFAULT_CAPACITY: usize = 60;

/// Upper bound accepted from config.
pub const MAX_CAPACITY: usize = 1_000_000;

#[derive(Debug, Clone)]
struct Series {
    values: VecDeque<f64>,
    capacity: usize,
}

impl Series {
    fn new(capacity: usize) -> Self {
        Self {
            // Grows on push; `capacity` only caps it.
            values: VecDeque::new(),
            capacity,
        }
    }

    fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }
}

/// Rolling history for every [`Metric`], each series capped at the same capacity.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    series: [Series; Metric::COUNT],
    capacity: usize,
}

impl SampleBuffer {
    /// `capacity` must be non-zero; `Config::validate` rejects zero before we get here.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            series: std::array::from_fn(|_| Series::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, metric: Metric, value: f64) {
        self.series[metric.index()].push(value);
    }

    /// Oldest-first copy of the retained samples.
    pub fn history(&self, metric: Metric) -> Vec<f64> {
        self.series[metric.index()].values.iter().copied().collect()
    }

    pub fn latest(&self, metric: Metric) -> f64 {
        self.try_latest(metric).unwrap_or(0.0)
    }

    pub fn try_latest(&self, metric: Metric) -> Result<f64> {
        self.series[metric.index()]
            .values
            .back()
            .copied()
            .ok_or(MonitorError::BufferEmpty(metric))
    }

    pub fn len(&self, metric: Metric) -> usize {
        self.series[metric.index()].values.len()
    }

    pub fn is_empty(&self, metric: Metric) -> bool {
        self.len(metric) == 0
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;
    use proptest::prelude::*;

    #[test]
    fn history_push_latest() {
        let mut buffer = SampleBuffer::new(60);
        buffer.push(Metric::Cpu, 5.0);
        buffer.push(Metric::Cpu, 10.0);
        assert_eq!(buffer.len(Metric::Cpu), 2);
        assert_eq!(buffer.latest(Metric::Cpu), 10.0);
        assert!(buffer.is_empty(Metric::Ram));
    }

    #[test]
    fn ring_buffer_evicts_oldest_first() {
        let mut buffer = SampleBuffer::new(3);
        for value in [10.0, 20.0, 30.0, 40.0] {
            buffer.push(Metric::Disk, value);
        }
        assert_debug_snapshot!(buffer.history(Metric::Disk), @r"
        [
            20.0,
            30.0,
            40.0,
        ]
        ");
    }

    #[test]
    fn empty_buffer_has_default_latest() {
        let buffer = SampleBuffer::new(5);
        assert_eq!(buffer.latest(Metric::Network), 0.0);
        assert_eq!(
            buffer.try_latest(Metric::Network),
            Err(MonitorError::BufferEmpty(Metric::Network))
        );
        assert!(buffer.history(Metric::Network).is_empty());
    }

    #[test]
    fn metrics_are_independent() {
        let mut buffer = SampleBuffer::new(2);
        buffer.push(Metric::Cpu, 1.0);
        buffer.push(Metric::Cpu, 2.0);
        buffer.push(Metric::Cpu, 3.0);
        buffer.push(Metric::Ram, 50.0);
        assert_eq!(buffer.history(Metric::Cpu), vec![2.0, 3.0]);
        assert_eq!(buffer.history(Metric::Ram), vec![50.0]);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut buffer = SampleBuffer::new(usize::MAX);
        buffer.push(Metric::Cpu, 1.0);
        assert_eq!(buffer.capacity(), usize::MAX);
        assert_eq!(buffer.history(Metric::Cpu), vec![1.0]);
    }

    #[test]
    fn history_is_a_copy() {
        let mut buffer = SampleBuffer::new(4);
        buffer.push(Metric::Ram, 1.0);
        let mut copy = buffer.history(Metric::Ram);
        copy.push(99.0);
        copy[0] = -1.0;
        assert_eq!(buffer.history(Metric::Ram), vec![1.0]);
    }

    proptest! {
        #[test]
        fn retains_last_capacity_values_in_order(
            capacity in 1usize..32,
            values in prop::collection::vec(0.0f64..100.0, 0..200),
        ) {
            let mut buffer = SampleBuffer::new(capacity);
            for &v in &values {
                buffer.push(Metric::Cpu, v);
            }

            let expected_len = values.len().min(capacity);
            let history = buffer.history(Metric::Cpu);
            prop_assert_eq!(history.len(), expected_len);
            prop_assert_eq!(&history[..], &values[values.len() - expected_len..]);
        }

        #[test]
        fn latest_is_most_recent_push(values in prop::collection::vec(any::<f64>(), 1..50)) {
            let mut buffer = SampleBuffer::new(8);
            for &v in &values {
                buffer.push(Metric::Network, v);
                prop_assert_eq!(buffer.latest(Metric::Network).to_bits(), v.to_bits());
            }
        }
    }
}
