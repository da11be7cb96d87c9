use std::time::Duration;

use crate::system::history::SampleBuffer;
use crate::system::metric::Metric;

/// Read-only view of one completed sampling cycle.
///
/// Built by the sampler from its own buffer and shared with sinks behind an
/// `Arc`; nothing outside this module can change it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    tick: u64,
    latest: [f64; Metric::COUNT],
    history: [Vec<f64>; Metric::COUNT],
    stale: [bool; Metric::COUNT],
    dropped_ticks: u64,
    network_window: Option<Duration>,
}

impl Snapshot {
    pub(crate) fn capture(
        tick: u64,
        buffer: &SampleBuffer,
        stale: [bool; Metric::COUNT],
        dropped_ticks: u64,
        network_window: Option<Duration>,
    ) -> Self {
        Snapshot {
            tick,
            latest: Metric::ALL.map(|m| buffer.latest(m)),
            history: Metric::ALL.map(|m| buffer.history(m)),
            stale,
            dropped_ticks,
            network_window,
        }
    }

    /// Placeholder shown before the first cycle completes.
    pub fn empty() -> Self {
        Snapshot {
            tick: 0,
            latest: [0.0; Metric::COUNT],
            history: Default::default(),
            stale: [false; Metric::COUNT],
            dropped_ticks: 0,
            network_window: None,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn latest(&self, metric: Metric) -> f64 {
        self.latest[metric.index()]
    }

    pub fn history(&self, metric: Metric) -> &[f64] {
        &self.history[metric.index()]
    }

    pub fn is_stale(&self, metric: Metric) -> bool {
        self.stale[metric.index()]
    }

    pub fn stale_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.is_stale(*m))
            .collect()
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }

    /// Wall time between the two most recent network samples.
    pub fn network_window(&self) -> Option<Duration> {
        self.network_window
    }

    /// Difference between the two most recent samples, if there are two.
    pub fn delta(&self, metric: Metric) -> Option<f64> {
        match self.history(metric) {
            [.., prev, last] => Some(last - prev),
            _ => None,
        }
    }
}
