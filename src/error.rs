use crate::system::metric::Metric;

pub type Result<T> = std::result::Result<T, MonitorError>;

// MonitorError is the error for the sampling core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    // SourceUnavailable is the error when a single metric query fails.
    #[error("{metric} unavailable: {reason}")]
    SourceUnavailable { metric: Metric, reason: String },

    // BufferEmpty is the error when history is read before the first sample.
    #[error("no {0} samples recorded yet")]
    BufferEmpty(Metric),

    // ConfigInvalid is the error when the configuration cannot be used.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),
}

impl MonitorError {
    pub fn unavailable(metric: Metric, reason: impl Into<String>) -> Self {
        MonitorError::SourceUnavailable {
            metric,
            reason: reason.into(),
        }
    }
}
