use crate::error::{MonitorError, Result};
use crate::system::metric::Metric;

/// One reading per metric; each field fails independently of the others.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub cpu_percent: Result<f64>,
    pub ram_percent: Result<f64>,
    pub net_bytes_total: Result<u64>,
    pub disk_percent: Result<f64>,
}

impl MetricReading {
    /// A reading where every query failed for the same reason.
    pub fn unavailable(reason: &str) -> Self {
        MetricReading {
            cpu_percent: Err(MonitorError::unavailable(Metric::Cpu, reason)),
            ram_percent: Err(MonitorError::unavailable(Metric::Ram, reason)),
            net_bytes_total: Err(MonitorError::unavailable(Metric::Network, reason)),
            disk_percent: Err(MonitorError::unavailable(Metric::Disk, reason)),
        }
    }

    /// The reading for `metric` as the value stored in history.
    pub fn value(&self, metric: Metric) -> Result<f64> {
        match metric {
            Metric::Cpu => self.cpu_percent.clone(),
            Metric::Ram => self.ram_percent.clone(),
            Metric::Network => self.net_bytes_total.clone().map(|bytes| bytes as f64),
            Metric::Disk => self.disk_percent.clone(),
        }
    }
}

/// Something that can query the host for a fresh [`MetricReading`].
///
/// Implementations may block on OS calls; the scheduler runs them off the
/// event loop.
pub trait MetricSource {
    fn sample(&mut self) -> MetricReading;
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn sample(&mut self) -> MetricReading {
        (**self).sample()
    }
}

pub(crate) fn percent_of(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((used as f64 / total as f64 * 100.0).clamp(0.0, 100.0))
}
