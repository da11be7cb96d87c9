use std::fmt;

use serde::Serialize;

/// The host counters sampled every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Ram,
    Network,
    Disk,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Cpu, Metric::Ram, Metric::Network, Metric::Disk];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Metric::Cpu => 0,
            Metric::Ram => 1,
            Metric::Network => 2,
            Metric::Disk => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Ram => "RAM",
            Metric::Network => "Network",
            Metric::Disk => "Disk",
        }
    }

    /// Percentage metrics are bounded to 0..=100; the network counter is not.
    pub fn is_percent(self) -> bool {
        !matches!(self, Metric::Network)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
