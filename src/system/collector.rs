use std::path::{Path, PathBuf};

use sysinfo::{Disks, Networks, System};

use super::metric::Metric;
use super::source::{MetricReading, MetricSource, percent_of};
use crate::error::{MonitorError, Result};

/// [`MetricSource`] backed by `sysinfo`.
///
/// CPU usage is measured between consecutive calls to [`sample`](Self::sample),
/// so the tick interval is the measurement window.
pub struct Collector {
    sys: System,
    networks: Networks,
    disks: Disks,
    disk_path: PathBuf,
    net_baseline: u64,
    net_total: u64,
}

impl Collector {
    pub fn new(disk_path: impl Into<PathBuf>) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        let networks = Networks::new_with_refreshed_list();
        let disks = Disks::new_with_refreshed_list();

        let net_baseline = interface_bytes(&networks);
        Collector {
            sys,
            networks,
            disks,
            disk_path: disk_path.into(),
            net_baseline,
            net_total: net_baseline,
        }
    }

    fn cpu_percent(&mut self) -> Result<f64> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(MonitorError::unavailable(Metric::Cpu, "no CPUs reported"));
        }
        Ok(f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0))
    }

    fn ram_percent(&mut self) -> Result<f64> {
        self.sys.refresh_memory();
        percent_of(self.sys.used_memory(), self.sys.total_memory())
            .ok_or_else(|| MonitorError::unavailable(Metric::Ram, "total memory is zero"))
    }

    fn net_bytes_total(&mut self) -> Result<u64> {
        self.networks.refresh(true);
        if self.networks.list().is_empty() {
            return Err(MonitorError::unavailable(
                Metric::Network,
                "no network interfaces",
            ));
        }
        let current = interface_bytes(&self.networks);
        // Interfaces can vanish and take their counters with them; only count growth.
        self.net_total += current.saturating_sub(self.net_baseline);
        self.net_baseline = current;
        Ok(self.net_total)
    }

    fn disk_percent(&mut self) -> Result<f64> {
        self.disks.refresh(true);

        let mounts = self
            .disks
            .list()
            .iter()
            .map(|d| (d.mount_point(), d.total_space(), d.available_space()));
        let Some((_, total, available)) = containing_mount(&self.disk_path, mounts) else {
            return Err(MonitorError::unavailable(
                Metric::Disk,
                format!("no mounted filesystem contains {}", self.disk_path.display()),
            ));
        };
        percent_of(total.saturating_sub(available), total).ok_or_else(|| {
            MonitorError::unavailable(
                Metric::Disk,
                format!("filesystem at {} reports zero size", self.disk_path.display()),
            )
        })
    }
}

impl MetricSource for Collector {
    fn sample(&mut self) -> MetricReading {
        let _span = tracing::debug_span!("collector.sample").entered();

        MetricReading {
            cpu_percent: self.cpu_percent(),
            ram_percent: self.ram_percent(),
            net_bytes_total: self.net_bytes_total(),
            disk_percent: self.disk_percent(),
        }
    }
}

fn interface_bytes(networks: &Networks) -> u64 {
    networks
        .list()
        .values()
        .map(|data| data.total_received() + data.total_transmitted())
        .sum()
}

/// Picks the mount whose mount point is the longest ancestor of `path`.
fn containing_mount<'a, I>(path: &Path, mounts: I) -> Option<(&'a Path, u64, u64)>
where
    I: IntoIterator<Item = (&'a Path, u64, u64)>,
{
    mounts
        .into_iter()
        .filter(|(mount, _, _)| path.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.components().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_deepest_mount_containing_path() {
        let mounts = vec![
            (Path::new("/"), 100, 50),
            (Path::new("/home"), 200, 20),
            (Path::new("/home/user/data"), 300, 30),
            (Path::new("/var"), 400, 40),
        ];
        let (mount, total, _) =
            containing_mount(Path::new("/home/user/docs"), mounts.clone()).unwrap();
        assert_eq!(mount, Path::new("/home"));
        assert_eq!(total, 200);

        let (mount, _, _) = containing_mount(Path::new("/"), mounts.clone()).unwrap();
        assert_eq!(mount, Path::new("/"));

        // Path prefixes are compared by component, not by string.
        let (mount, _, _) = containing_mount(Path::new("/variable"), mounts).unwrap();
        assert_eq!(mount, Path::new("/"));
    }

    #[test]
    fn no_mount_for_relative_path() {
        let mounts = vec![(Path::new("/"), 100, 50)];
        assert!(containing_mount(Path::new("relative/dir"), mounts).is_none());
    }

    #[test]
    fn samples_without_panicking() {
        let mut collector = Collector::new("/");
        let first = collector.sample();
        let second = collector.sample();

        if let Ok(cpu) = second.cpu_percent {
            assert!((0.0..=100.0).contains(&cpu));
        }
        if let Ok(ram) = second.ram_percent {
            assert!((0.0..=100.0).contains(&ram));
        }
        if let (Ok(a), Ok(b)) = (first.net_bytes_total, second.net_bytes_total) {
            assert!(b >= a);
        }
    }

    #[test]
    fn missing_disk_path_is_reported_not_fatal() {
        let mut collector = Collector::new("relative/path/without/mount");
        let reading = collector.sample();
        assert!(matches!(
            reading.disk_percent,
            Err(MonitorError::SourceUnavailable {
                metric: Metric::Disk,
                ..
            })
        ));
    }
}
