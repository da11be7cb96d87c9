use crate::system::metric::Metric;
use crate::system::snapshot::Snapshot;

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Bytes per second between the two most recent network samples, measured
/// over the wall time that actually separated them.
pub fn network_rate(snapshot: &Snapshot) -> Option<u64> {
    let window = snapshot.network_window().filter(|w| !w.is_zero())?;
    let delta = snapshot.delta(Metric::Network)?;
    Some((delta.max(0.0) * 1e9 / window.as_nanos() as f64).round() as u64)
}

/// Human-readable label such as `CPU Usage: 12.34%`.
pub fn metric_label(snapshot: &Snapshot, metric: Metric) -> String {
    let value = snapshot.latest(metric);
    let mut label = if metric.is_percent() {
        format!("{} Usage: {:.2}%", metric.label(), value)
    } else {
        let mut text = format!("{} Usage: {} bytes", metric.label(), value as u64);
        if let Some(rate) = network_rate(snapshot) {
            text.push_str(&format!(" ({}/s)", format_bytes(rate)));
        }
        text
    };
    if snapshot.is_stale(metric) {
        label.push_str(" (stale)");
    }
    label
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::sampler::Sampler;
    use crate::system::source::MetricReading;

    /// One reading per 500 ms.
    fn snapshot_with(readings: &[(f64, u64)], disk_ok: bool) -> std::sync::Arc<Snapshot> {
        let mut sampler = Sampler::new(8);
        let start = Instant::now();
        let mut last = None;
        for (i, &(cpu, net)) in readings.iter().enumerate() {
            sampler.try_begin();
            let mut reading = MetricReading {
                cpu_percent: Ok(cpu),
                ram_percent: Ok(50.0),
                net_bytes_total: Ok(net),
                disk_percent: Ok(70.125),
            };
            if !disk_ok {
                reading.disk_percent = MetricReading::unavailable("gone").disk_percent;
            }
            let at = start + Duration::from_millis(500 * i as u64);
            last = Some(sampler.complete_at(reading, at));
        }
        last.unwrap()
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn labels_use_two_decimals() {
        let snapshot = snapshot_with(&[(12.346, 100)], true);
        assert_eq!(metric_label(&snapshot, Metric::Cpu), "CPU Usage: 12.35%");
        assert_eq!(metric_label(&snapshot, Metric::Ram), "RAM Usage: 50.00%");
        assert_eq!(
            metric_label(&snapshot, Metric::Network),
            "Network Usage: 100 bytes"
        );
    }

    #[test]
    fn network_label_includes_rate() {
        let snapshot = snapshot_with(&[(1.0, 1000), (1.0, 3048)], true);
        assert_eq!(network_rate(&snapshot), Some(4096));
        assert_eq!(
            metric_label(&snapshot, Metric::Network),
            "Network Usage: 3048 bytes (4 KB/s)"
        );
    }

    #[test]
    fn early_manual_sample_uses_elapsed_time() {
        let mut sampler = Sampler::new(8);
        let t0 = Instant::now();
        let reading = |net: u64| MetricReading {
            cpu_percent: Ok(1.0),
            ram_percent: Ok(1.0),
            net_bytes_total: Ok(net),
            disk_percent: Ok(1.0),
        };

        sampler.try_begin();
        sampler.complete_at(reading(1000), t0);
        sampler.try_begin();
        let snapshot = sampler.complete_at(reading(1100), t0 + Duration::from_millis(100));

        assert_eq!(network_rate(&snapshot), Some(1000));
        assert_eq!(
            metric_label(&snapshot, Metric::Network),
            "Network Usage: 1100 bytes (1000 B/s)"
        );
    }

    #[test]
    fn stale_network_tick_does_not_inflate_rate() {
        let mut sampler = Sampler::new(8);
        let t0 = Instant::now();
        let reading = |net: Option<u64>| MetricReading {
            cpu_percent: Ok(1.0),
            ram_percent: Ok(1.0),
            net_bytes_total: net.ok_or_else(|| {
                crate::error::MonitorError::unavailable(Metric::Network, "down")
            }),
            disk_percent: Ok(1.0),
        };

        sampler.try_begin();
        sampler.complete_at(reading(Some(0)), t0);
        sampler.try_begin();
        sampler.complete_at(reading(None), t0 + Duration::from_secs(1));
        sampler.try_begin();
        let snapshot = sampler.complete_at(reading(Some(2000)), t0 + Duration::from_secs(2));

        assert_eq!(network_rate(&snapshot), Some(1000));
    }

    #[test]
    fn stale_metric_is_marked() {
        let snapshot = snapshot_with(&[(1.0, 0)], false);
        assert_eq!(
            metric_label(&snapshot, Metric::Disk),
            "Disk Usage: 0.00% (stale)"
        );
    }
}
