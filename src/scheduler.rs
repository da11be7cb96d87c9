use std::sync::{Arc, Mutex, TryLockError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::sampler::{RenderSink, Sampler};
use crate::system::snapshot::Snapshot;
use crate::system::source::{MetricReading, MetricSource};

/// Runs sampling cycles off the event loop.
///
/// `MetricSource::sample` may block, so each cycle runs on tokio's blocking
/// pool under a timeout. The reading is handed back through the `deliver`
/// callback and must be passed to [`on_sampled`](Self::on_sampled) on the
/// loop task, which keeps rendering single-threaded.
pub struct Scheduler<S> {
    sampler: Sampler,
    source: Arc<Mutex<S>>,
    timeout: Duration,
}

impl<S> Scheduler<S>
where
    S: MetricSource + Send + 'static,
{
    pub fn new(source: S, history_capacity: usize, timeout: Duration) -> Self {
        Scheduler {
            sampler: Sampler::new(history_capacity),
            source: Arc::new(Mutex::new(source)),
            timeout,
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Starts a cycle unless one is already in flight. Returns whether a cycle
    /// was started.
    pub fn on_tick<F>(&mut self, deliver: F) -> bool
    where
        F: FnOnce(MetricReading) + Send + 'static,
    {
        if !self.sampler.try_begin() {
            return false;
        }

        let source = Arc::clone(&self.source);
        let timeout = self.timeout;
        tokio::spawn(async move {
            deliver(sample_with_timeout(source, timeout).await);
        });
        true
    }

    pub fn on_sampled<R>(&mut self, reading: MetricReading, sink: &mut R) -> Arc<Snapshot>
    where
        R: RenderSink + ?Sized,
    {
        let snapshot = self.sampler.complete(reading);
        sink.render(Arc::clone(&snapshot));
        snapshot
    }
}

async fn sample_with_timeout<S>(source: Arc<Mutex<S>>, timeout: Duration) -> MetricReading
where
    S: MetricSource + Send + 'static,
{
    let started = std::time::Instant::now();
    let task = tokio::task::spawn_blocking(move || match source.try_lock() {
        Ok(mut source) => source.sample(),
        // A read that timed out earlier still holds the source.
        Err(TryLockError::WouldBlock) => MetricReading::unavailable("previous read still stalled"),
        Err(TryLockError::Poisoned(_)) => MetricReading::unavailable("metric source panicked"),
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(reading)) => {
            debug!(elapsed_ms = started.elapsed().as_millis() as u64, "sample complete");
            reading
        }
        Ok(Err(err)) => {
            warn!(%err, "sampling task failed");
            MetricReading::unavailable("sampling task failed")
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "sampling timed out");
            MetricReading::unavailable("timed out")
        }
    }
}
