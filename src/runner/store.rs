//! Per-run output files.
//!
//! File names are derived from `(scheduler, case)` alone, so independent
//! runs never write the same file.
//!
//! | File | Content |
//! |------|---------|
//! | `{output}/{sched}_{case}_metrics.json` | `AggregateMetrics` |
//! | `{output}/{sched}_{case}.out` | raw trace text |
//! | `{charts}/Gantt_{sched}_{case}.json` | `RunningInterval` list |
//! | `{charts}/Compare_{metric}_{case}.json` | `MetricSeries` |

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::analysis::MetricSeries;
use crate::error::{Error, Result};
use crate::models::{AggregateMetrics, RunningInterval};

/// Reads and writes run artifacts under the output and chart directories.
#[derive(Debug, Clone)]
pub struct MetricsStore {
    output_dir: PathBuf,
    chart_dir: PathBuf,
}

impl MetricsStore {
    /// Creates a store over the given directories.
    pub fn new(output_dir: impl Into<PathBuf>, chart_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            chart_dir: chart_dir.into(),
        }
    }

    /// Creates both directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.output_dir, &self.chart_dir] {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }
        Ok(())
    }

    /// Path of a run's metrics record.
    pub fn metrics_path(&self, scheduler: &str, case: &str) -> PathBuf {
        self.output_dir.join(format!("{scheduler}_{case}_metrics.json"))
    }

    /// Path of a run's trace copy.
    pub fn trace_path(&self, scheduler: &str, case: &str) -> PathBuf {
        self.output_dir.join(format!("{scheduler}_{case}.out"))
    }

    /// Path of a run's Gantt data.
    pub fn gantt_path(&self, scheduler: &str, case: &str) -> PathBuf {
        self.chart_dir.join(format!("Gantt_{scheduler}_{case}.json"))
    }

    /// Path of a comparison series.
    pub fn comparison_path(&self, series: &MetricSeries) -> PathBuf {
        self.chart_dir
            .join(format!("Compare_{}_{}.json", series.metric, series.case))
    }

    /// Persists a run's metrics.
    pub fn save_metrics(
        &self,
        scheduler: &str,
        case: &str,
        metrics: &AggregateMetrics,
    ) -> Result<()> {
        write_json(&self.metrics_path(scheduler, case), metrics)
    }

    /// Loads a run's metrics; `None` if the run has no record.
    pub fn load_metrics(&self, scheduler: &str, case: &str) -> Result<Option<AggregateMetrics>> {
        let path = self.metrics_path(scheduler, case);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&path, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::json(&path, e))
    }

    /// Persists a verbatim copy of a run's trace.
    pub fn save_trace(&self, scheduler: &str, case: &str, text: &str) -> Result<()> {
        let path = self.trace_path(scheduler, case);
        fs::write(&path, text).map_err(|e| Error::io(&path, e))
    }

    /// Persists Gantt data for a run.
    pub fn save_timeline(
        &self,
        scheduler: &str,
        case: &str,
        intervals: &[RunningInterval],
    ) -> Result<PathBuf> {
        let path = self.gantt_path(scheduler, case);
        write_json(&path, intervals)?;
        Ok(path)
    }

    /// Removes a run's metrics record, trace copy and Gantt data.
    ///
    /// Files that do not exist are not an error.
    pub fn remove_run(&self, scheduler: &str, case: &str) -> Result<()> {
        for path in [
            self.metrics_path(scheduler, case),
            self.trace_path(scheduler, case),
            self.gantt_path(scheduler, case),
        ] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(&path, e)),
            }
        }
        Ok(())
    }

    /// Persists one comparison series.
    pub fn save_series(&self, series: &MetricSeries) -> Result<PathBuf> {
        let path = self.comparison_path(series);
        write_json(&path, series)?;
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    fs::write(path, text).map_err(|e| Error::io(path, e))
}
