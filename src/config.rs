//! Batch configuration.
//!
//! Every field has a default matching the conventional project layout,
//! so an empty JSON object `{}` is a complete configuration.
//!
//! ```
//! use sched_metrics::config::BatchConfig;
//!
//! let config: BatchConfig = serde_json::from_str(r#"{"output_dir": "out"}"#).unwrap();
//! assert_eq!(config.output_dir.to_str(), Some("out"));
//! assert_eq!(config.schedulers.len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A scheduler under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSpec {
    /// Identifier used in output file names and comparisons.
    pub name: String,
    /// Executable invoked with the test-case path as its only argument.
    pub executable: PathBuf,
}

impl SchedulerSpec {
    /// Creates a scheduler spec.
    pub fn new(name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
        }
    }

    /// Parses `NAME=PATH`.
    pub fn parse(spec: &str) -> std::result::Result<Self, String> {
        match spec.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => {
                Ok(Self::new(name, path))
            }
            _ => Err(format!("expected NAME=PATH, got '{spec}'")),
        }
    }
}

/// Locations and schedulers for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory of test-case files.
    pub test_dir: PathBuf,
    /// Directory for per-run metrics and trace copies.
    pub output_dir: PathBuf,
    /// Directory for Gantt and comparison chart data.
    pub chart_dir: PathBuf,
    /// Where a scheduler deposits its trace text.
    pub trace_path: PathBuf,
    /// Schedulers to evaluate, in comparison order.
    pub schedulers: Vec<SchedulerSpec>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            test_dir: PathBuf::from("input_files/test_cases"),
            output_dir: PathBuf::from("output_files/results"),
            chart_dir: PathBuf::from("results/charts"),
            trace_path: PathBuf::from("output_files/execution.txt"),
            schedulers: vec![
                SchedulerSpec::new("EP", "./bin/interrupts_EP"),
                SchedulerSpec::new("RR", "./bin/interrupts_RR"),
                SchedulerSpec::new("EP_RR", "./bin/interrupts_EP_RR"),
            ],
        }
    }
}

impl BatchConfig {
    /// Loads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| Error::json(path, e))
    }

    /// Scheduler names, in comparison order.
    pub fn scheduler_names(&self) -> Vec<String> {
        self.schedulers.iter().map(|s| s.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let c = BatchConfig::default();
        assert_eq!(c.test_dir, PathBuf::from("input_files/test_cases"));
        assert_eq!(c.scheduler_names(), vec!["EP", "RR", "EP_RR"]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c: BatchConfig = serde_json::from_str(
            r#"{"schedulers": [{"name": "FCFS", "executable": "/opt/fcfs"}]}"#,
        )
        .unwrap();
        assert_eq!(c.scheduler_names(), vec!["FCFS"]);
        assert_eq!(c.output_dir, PathBuf::from("output_files/results"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(&path, r#"{"chart_dir": "charts"}"#).unwrap();
        let c = BatchConfig::load(&path).unwrap();
        assert_eq!(c.chart_dir, PathBuf::from("charts"));

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(BatchConfig::load(&path), Err(Error::Json { .. })));
    }

    #[test]
    fn test_scheduler_spec_parse() {
        let s = SchedulerSpec::parse("RR=./bin/rr").unwrap();
        assert_eq!(s, SchedulerSpec::new("RR", "./bin/rr"));
        assert!(SchedulerSpec::parse("RR").is_err());
        assert!(SchedulerSpec::parse("=./bin/rr").is_err());
    }
}
