//! Comparison aggregator.
//!
//! Collects per-run metrics into, per test case and per metric, an
//! ordered scheduler → value series ready for bar charts. Runs whose
//! metrics are unavailable are left out; a case with no available run
//! is left out entirely.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AggregateMetrics, MetricName};

/// One bar of a comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerValue {
    /// Scheduler identifier.
    pub scheduler: String,
    /// Metric value for that scheduler.
    pub value: f64,
}

/// One comparison chart: a metric across schedulers for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Test-case identifier.
    pub case: String,
    /// Compared metric.
    pub metric: MetricName,
    /// Values in scheduler order.
    pub values: Vec<SchedulerValue>,
}

/// Metrics of every available scheduler run for one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseComparison {
    /// Test-case identifier.
    pub case: String,
    runs: Vec<(String, AggregateMetrics)>,
}

impl CaseComparison {
    /// Scheduler identifiers with metrics, in insertion order.
    pub fn schedulers(&self) -> impl Iterator<Item = &str> + '_ {
        self.runs.iter().map(|(s, _)| s.as_str())
    }

    /// Scheduler → value series for one metric.
    pub fn series(&self, metric: MetricName) -> MetricSeries {
        MetricSeries {
            case: self.case.clone(),
            metric,
            values: self
                .runs
                .iter()
                .map(|(scheduler, m)| SchedulerValue {
                    scheduler: scheduler.clone(),
                    value: m.get(metric),
                })
                .collect(),
        }
    }

    /// Like [`series`](Self::series), by metric field name.
    ///
    /// Fails with `UnknownMetric` for a name outside the fixed set.
    pub fn series_by_name(&self, metric: &str) -> Result<MetricSeries> {
        Ok(self.series(metric.parse()?))
    }

    /// Series for every metric, in report order.
    pub fn all_series(&self) -> Vec<MetricSeries> {
        MetricName::ALL.iter().map(|&m| self.series(m)).collect()
    }
}

/// Cross-run comparison over all test cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    cases: Vec<CaseComparison>,
}

impl ComparisonTable {
    /// Builds the table by looking up each (scheduler, case) pair.
    ///
    /// # Arguments
    /// * `cases` - Test-case identifiers, in output order.
    /// * `schedulers` - Scheduler identifiers, in output order.
    /// * `lookup` - Returns the run's metrics, or `None` to skip the pair.
    pub fn build<C, S, F>(cases: &[C], schedulers: &[S], mut lookup: F) -> Self
    where
        C: AsRef<str>,
        S: AsRef<str>,
        F: FnMut(&str, &str) -> Option<AggregateMetrics>,
    {
        let mut table = Vec::new();
        for case in cases {
            let case = case.as_ref();
            let runs: Vec<(String, AggregateMetrics)> = schedulers
                .iter()
                .filter_map(|s| {
                    let s = s.as_ref();
                    lookup(s, case).map(|m| (s.to_string(), m))
                })
                .collect();
            if !runs.is_empty() {
                table.push(CaseComparison {
                    case: case.to_string(),
                    runs,
                });
            }
        }
        Self { cases: table }
    }

    /// Comparison for one case, if any run for it was available.
    pub fn case(&self, case: &str) -> Option<&CaseComparison> {
        self.cases.iter().find(|c| c.case == case)
    }

    /// All compared cases.
    pub fn cases(&self) -> &[CaseComparison] {
        &self.cases
    }

    /// Whether no case had any available run.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn metrics(throughput: f64, wait: f64) -> AggregateMetrics {
        AggregateMetrics {
            throughput,
            avg_wait_time: wait,
            avg_turnaround_time: wait * 2.0,
            avg_response_time: wait / 2.0,
        }
    }

    fn sample_table() -> ComparisonTable {
        let cases = ["case_1.txt", "case_2.txt", "case_3.txt"];
        let schedulers = ["EP", "RR", "EP_RR"];
        ComparisonTable::build(&cases, &schedulers, |s, c| match (s, c) {
            ("EP", "case_1.txt") => Some(metrics(0.5, 4.0)),
            ("RR", "case_1.txt") => Some(metrics(0.25, 2.0)),
            ("EP_RR", "case_2.txt") => Some(metrics(0.1, 1.0)),
            _ => None,
        })
    }

    #[test]
    fn test_build_skips_missing_runs_and_cases() {
        let table = sample_table();
        assert_eq!(table.cases().len(), 2);
        assert!(table.case("case_3.txt").is_none());

        let c1 = table.case("case_1.txt").unwrap();
        assert_eq!(c1.schedulers().collect::<Vec<_>>(), vec!["EP", "RR"]);
    }

    #[test]
    fn test_series_values_in_scheduler_order() {
        let table = sample_table();
        let series = table
            .case("case_1.txt")
            .unwrap()
            .series(MetricName::AvgWaitTime);
        assert_eq!(series.metric, MetricName::AvgWaitTime);
        let values: Vec<(&str, f64)> = series
            .values
            .iter()
            .map(|v| (v.scheduler.as_str(), v.value))
            .collect();
        assert_eq!(values, vec![("EP", 4.0), ("RR", 2.0)]);
    }

    #[test]
    fn test_series_by_name() {
        let table = sample_table();
        let c2 = table.case("case_2.txt").unwrap();
        let s = c2.series_by_name("throughput").unwrap();
        assert!((s.values[0].value - 0.1).abs() < 1e-10);

        assert!(matches!(
            c2.series_by_name("makespan"),
            Err(Error::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_all_series_cover_fixed_metric_set() {
        let table = sample_table();
        let all = table.case("case_1.txt").unwrap().all_series();
        let names: Vec<MetricName> = all.iter().map(|s| s.metric).collect();
        assert_eq!(names, MetricName::ALL.to_vec());
    }

    #[test]
    fn test_build_empty() {
        let cases: [&str; 0] = [];
        let table = ComparisonTable::build(&cases, &["EP"], |_, _| None);
        assert!(table.is_empty());
    }
}
