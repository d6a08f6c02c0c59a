//! Aggregate scheduling performance metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Throughput | Processes / latest termination time |
//! | Avg Wait Time | Mean READY time preceding each dispatch |
//! | Avg Turnaround Time | Mean (termination - arrival) |
//! | Avg Response Time | Mean (first dispatch - arrival) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Metrics for one (scheduler, test-case) run.
///
/// Serialized with exactly these four fields; this is the persisted
/// per-run record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    /// Processes completed per unit time.
    pub throughput: f64,
    /// Mean accumulated READY wait.
    pub avg_wait_time: f64,
    /// Mean termination minus arrival.
    pub avg_turnaround_time: f64,
    /// Mean first dispatch minus arrival.
    pub avg_response_time: f64,
}

impl AggregateMetrics {
    /// Value of one metric.
    pub fn get(&self, metric: MetricName) -> f64 {
        match metric {
            MetricName::Throughput => self.throughput,
            MetricName::AvgWaitTime => self.avg_wait_time,
            MetricName::AvgTurnaroundTime => self.avg_turnaround_time,
            MetricName::AvgResponseTime => self.avg_response_time,
        }
    }
}

/// The fixed set of comparable metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    /// `throughput`
    Throughput,
    /// `avg_wait_time`
    AvgWaitTime,
    /// `avg_turnaround_time`
    AvgTurnaroundTime,
    /// `avg_response_time`
    AvgResponseTime,
}

impl MetricName {
    /// All metrics, in report order.
    pub const ALL: [MetricName; 4] = [
        MetricName::Throughput,
        MetricName::AvgWaitTime,
        MetricName::AvgTurnaroundTime,
        MetricName::AvgResponseTime,
    ];

    /// Field name in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Throughput => "throughput",
            MetricName::AvgWaitTime => "avg_wait_time",
            MetricName::AvgTurnaroundTime => "avg_turnaround_time",
            MetricName::AvgResponseTime => "avg_response_time",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricName::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}
