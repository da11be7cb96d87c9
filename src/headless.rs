use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use crate::sampler::RenderSink;
use crate::system::metric::Metric;
use crate::system::snapshot::Snapshot;

#[derive(Debug, Serialize)]
struct SnapshotRecord {
    tick: u64,
    stale: Vec<Metric>,
    dropped_ticks: u64,
    cpu_percent: f64,
    ram_percent: f64,
    net_bytes_total: u64,
    disk_percent: f64,
    history_len: usize,
}

impl SnapshotRecord {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        SnapshotRecord {
            tick: snapshot.tick(),
            stale: snapshot.stale_metrics(),
            dropped_ticks: snapshot.dropped_ticks(),
            cpu_percent: snapshot.latest(Metric::Cpu),
            ram_percent: snapshot.latest(Metric::Ram),
            net_bytes_total: snapshot.latest(Metric::Network) as u64,
            disk_percent: snapshot.latest(Metric::Disk),
            history_len: snapshot.history(Metric::Cpu).len(),
        }
    }
}

/// Render sink that writes one JSON object per snapshot.
pub struct JsonLinesSink<W> {
    out: W,
    rendered: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        JsonLinesSink { out, rendered: 0 }
    }

    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, snapshot: &Snapshot) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, &SnapshotRecord::from_snapshot(snapshot))?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, snapshot: Arc<Snapshot>) {
        self.rendered += 1;
        if let Err(err) = self.write_record(&snapshot) {
            error!(%err, tick = snapshot.tick(), "failed to write snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use crate::sampler::Sampler;
    use crate::system::source::MetricReading;
    use insta::assert_snapshot;

    #[test]
    fn writes_one_line_per_snapshot() {
        let mut sampler = Sampler::new(4);
        let mut sink = JsonLinesSink::new(Vec::new());

        for disk in [55.0, 60.5] {
            sampler.try_begin();
            let snapshot = sampler.complete(MetricReading {
                cpu_percent: Ok(12.5),
                ram_percent: Ok(40.0),
                net_bytes_total: Ok(2048),
                disk_percent: Ok(disk),
            });
            sink.render(snapshot);
        }
        sampler.try_begin();
        sampler.try_begin();
        let snapshot = sampler.complete(MetricReading {
            cpu_percent: Ok(25.0),
            ram_percent: Err(MonitorError::unavailable(Metric::Ram, "denied")),
            net_bytes_total: Ok(4096),
            disk_percent: Ok(61.0),
        });
        sink.render(snapshot);

        assert_eq!(sink.rendered(), 3);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_snapshot!(
            lines[2],
            @r#"{"tick":3,"stale":["ram"],"dropped_ticks":1,"cpu_percent":25.0,"ram_percent":40.0,"net_bytes_total":4096,"disk_percent":61.0,"history_len":3}"#
        );
    }
}
