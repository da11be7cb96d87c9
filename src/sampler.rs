use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::system::history::SampleBuffer;
use crate::system::metric::Metric;
use crate::system::snapshot::Snapshot;
use crate::system::source::{MetricReading, MetricSource};

/// Consumer of completed sampling cycles.
///
/// Called once per completed cycle, from the same task that drives the
/// sampler, so two renders never overlap.
pub trait RenderSink {
    fn render(&mut self, snapshot: Arc<Snapshot>);
}

impl<F> RenderSink for F
where
    F: FnMut(Arc<Snapshot>),
{
    fn render(&mut self, snapshot: Arc<Snapshot>) {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Sampling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Dropped,
}

/// Owns the rolling history and the at-most-one-cycle guard.
#[derive(Debug)]
pub struct Sampler {
    buffer: SampleBuffer,
    state: SamplerState,
    completed: u64,
    dropped: u64,
    last_network_push: Option<Instant>,
    network_window: Option<Duration>,
}

impl Sampler {
    pub fn new(history_capacity: usize) -> Self {
        Sampler {
            buffer: SampleBuffer::new(history_capacity),
            state: SamplerState::Idle,
            completed: 0,
            dropped: 0,
            last_network_push: None,
            network_window: None,
        }
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.dropped
    }

    /// Starts a cycle. Returns `false`, and counts the tick as dropped, when a
    /// cycle is already in flight.
    pub fn try_begin(&mut self) -> bool {
        match self.state {
            SamplerState::Idle => {
                self.state = SamplerState::Sampling;
                true
            }
            SamplerState::Sampling => {
                self.dropped += 1;
                debug!(dropped = self.dropped, "tick dropped, sampling still in flight");
                false
            }
        }
    }

    /// Records `reading` and returns the snapshot for this cycle.
    ///
    /// Failed metrics keep their previous history and are flagged stale.
    pub fn complete(&mut self, reading: MetricReading) -> Arc<Snapshot> {
        self.complete_at(reading, Instant::now())
    }

    /// [`complete`](Self::complete) with an explicit completion time.
    pub fn complete_at(&mut self, reading: MetricReading, now: Instant) -> Arc<Snapshot> {
        let mut stale = [false; Metric::COUNT];
        for metric in Metric::ALL {
            match reading.value(metric) {
                Ok(value) => {
                    self.buffer.push(metric, value);
                    if metric == Metric::Network {
                        self.network_window = self
                            .last_network_push
                            .map(|prev| now.saturating_duration_since(prev));
                        self.last_network_push = Some(now);
                    }
                }
                Err(err) => {
                    stale[metric.index()] = true;
                    match self.buffer.try_latest(metric) {
                        Ok(previous) => warn!(%err, previous, "keeping previous {metric} value"),
                        Err(_) => warn!(%err, "no {metric} value recorded yet"),
                    }
                }
            }
        }

        self.completed += 1;
        self.state = SamplerState::Idle;
        Arc::new(Snapshot::capture(
            self.completed,
            &self.buffer,
            stale,
            self.dropped,
            self.network_window,
        ))
    }

    /// Runs one whole cycle synchronously: sample, record, render.
    pub fn run_cycle<S, R>(&mut self, source: &mut S, sink: &mut R) -> TickOutcome
    where
        S: MetricSource + ?Sized,
        R: RenderSink + ?Sized,
    {
        if !self.try_begin() {
            return TickOutcome::Dropped;
        }
        let reading = source.sample();
        sink.render(self.complete(reading));
        TickOutcome::Rendered
    }
}
