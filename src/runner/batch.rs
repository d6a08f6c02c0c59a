//! Batch driver over every (scheduler, test-case) pair.
//!
//! # Algorithm
//!
//! 1. Discover test cases (regular files in the test directory, by name).
//! 2. For each scheduler, for each case: obtain the trace, parse it,
//!    load the case's processes, compute metrics and the timeline, and
//!    persist the results.
//! 3. Build the cross-scheduler comparison from this batch's successful
//!    runs and write one chart series per (case, metric).
//!
//! A failing run is logged and recorded, and the batch moves on to the
//! next pair. Artifacts of a run are cleared before it starts and again if
//! it fails, so a failed run never leaves metrics behind from an earlier
//! batch. Only setup failures (unreadable test directory, output
//! directories that cannot be created) abort the batch.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::analysis::{extract_timeline, ComparisonTable};
use crate::config::{BatchConfig, SchedulerSpec};
use crate::error::{Error, Result};
use crate::models::AggregateMetrics;
use crate::parsing::{load_process_registry_file, parse_trace};
use crate::validation::validate_run;

use super::{MetricsStore, TraceSource};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Scheduler identifier.
    pub scheduler: String,
    /// Test-case identifier.
    pub case: String,
    /// Computed metrics.
    pub metrics: AggregateMetrics,
    /// Number of parsed transitions.
    pub transition_count: usize,
    /// Number of RUNNING intervals extracted.
    pub interval_count: usize,
    /// Number of consistency warnings raised for the run's inputs.
    pub warning_count: usize,
}

/// A run that failed, with its cause.
#[derive(Debug)]
pub struct RunFailure {
    /// Scheduler identifier.
    pub scheduler: String,
    /// Test-case identifier.
    pub case: String,
    /// Why the run failed.
    pub error: Error,
}

/// Summary of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successful runs, in execution order.
    pub outcomes: Vec<RunOutcome>,
    /// Failed runs, in execution order.
    pub failures: Vec<RunFailure>,
    /// Comparison over the successful runs.
    pub comparison: ComparisonTable,
}

impl BatchReport {
    /// Whether every run succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists test-case file names in `dir`, sorted.
pub fn discover_cases(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut cases = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| Error::io(entry.path(), e))?
            .is_file();
        if is_file {
            cases.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    cases.sort();
    Ok(cases)
}

/// Runs schedulers over test cases and persists the results.
pub struct Batch<'a, S: TraceSource> {
    config: &'a BatchConfig,
    source: S,
    store: MetricsStore,
}

impl<'a, S: TraceSource> Batch<'a, S> {
    /// Creates a batch over `config`, obtaining traces from `source`.
    pub fn new(config: &'a BatchConfig, source: S) -> Self {
        Self {
            config,
            source,
            store: MetricsStore::new(&config.output_dir, &config.chart_dir),
        }
    }

    /// The store results are written to.
    pub fn store(&self) -> &MetricsStore {
        &self.store
    }

    /// Runs every scheduler on every discovered case, then compares.
    pub fn run(&self) -> Result<BatchReport> {
        self.store.ensure_dirs()?;
        let cases = discover_cases(&self.config.test_dir)?;
        info!(
            "{} schedulers x {} test cases",
            self.config.schedulers.len(),
            cases.len()
        );

        let mut report = BatchReport::default();
        for scheduler in &self.config.schedulers {
            for case in &cases {
                info!("running {} on {}", scheduler.name, case);
                match self.run_case(scheduler, case) {
                    Ok(outcome) => report.outcomes.push(outcome),
                    Err(error) => {
                        warn!("{} on {} failed: {}", scheduler.name, case, error);
                        if let Err(e) = self.store.remove_run(&scheduler.name, case) {
                            warn!("could not clear {} on {}: {}", scheduler.name, case, e);
                        }
                        report.failures.push(RunFailure {
                            scheduler: scheduler.name.clone(),
                            case: case.clone(),
                            error,
                        });
                    }
                }
            }
        }

        let outcomes = &report.outcomes;
        let comparison = self.write_comparison(cases.as_slice(), |s, c| {
            outcomes
                .iter()
                .find(|o| o.scheduler == s && o.case == c)
                .map(|o| o.metrics)
        })?;
        report.comparison = comparison;
        Ok(report)
    }

    /// Runs one scheduler on one case and persists its artifacts.
    pub fn run_case(&self, scheduler: &SchedulerSpec, case: &str) -> Result<RunOutcome> {
        let case_path = self.config.test_dir.join(case);
        self.store.remove_run(&scheduler.name, case)?;
        let text = self.source.run(scheduler, &case_path)?;
        let transitions = parse_trace(text.as_deref())?;
        let registry = load_process_registry_file(&case_path)?;

        let warnings = validate_run(&transitions, &registry);
        for w in &warnings {
            warn!("{} on {}: {}", scheduler.name, case, w.message);
        }

        let metrics = AggregateMetrics::calculate(&transitions, &registry);
        let intervals = extract_timeline(&transitions);
        info!(
            "{} on {}: throughput={:.4} wait={:.2} turnaround={:.2} response={:.2}",
            scheduler.name,
            case,
            metrics.throughput,
            metrics.avg_wait_time,
            metrics.avg_turnaround_time,
            metrics.avg_response_time
        );

        self.store.save_metrics(&scheduler.name, case, &metrics)?;
        if let Some(text) = &text {
            self.store.save_trace(&scheduler.name, case, text)?;
        }
        if !intervals.is_empty() {
            self.store.save_timeline(&scheduler.name, case, &intervals)?;
        }

        Ok(RunOutcome {
            scheduler: scheduler.name.clone(),
            case: case.to_string(),
            metrics,
            transition_count: transitions.len(),
            interval_count: intervals.len(),
            warning_count: warnings.len(),
        })
    }

    /// Builds the comparison from persisted metrics and writes chart series.
    ///
    /// Pairs with no metrics record are skipped; an unreadable record is
    /// logged and skipped as well.
    pub fn compare<C: AsRef<str>>(&self, cases: &[C]) -> Result<ComparisonTable> {
        self.write_comparison(cases, |s, c| match self.store.load_metrics(s, c) {
            Ok(m) => m,
            Err(e) => {
                warn!("skipping {s} on {c} in comparison: {e}");
                None
            }
        })
    }

    fn write_comparison<C, F>(&self, cases: &[C], lookup: F) -> Result<ComparisonTable>
    where
        C: AsRef<str>,
        F: FnMut(&str, &str) -> Option<AggregateMetrics>,
    {
        let schedulers = self.config.scheduler_names();
        let table = ComparisonTable::build(cases, schedulers.as_slice(), lookup);

        for case in table.cases() {
            for series in case.all_series() {
                self.store.save_series(&series)?;
            }
        }
        info!("compared {} test cases", table.cases().len());
        Ok(table)
    }
}
