//! Batch orchestration around the analysis core.
//!
//! Provides the scheduler invocation boundary, per-run persistence, and
//! the batch driver that ties them together.
//!
//! # Usage
//!
//! ```no_run
//! use sched_metrics::config::BatchConfig;
//! use sched_metrics::runner::{Batch, CommandTraceSource};
//!
//! let config = BatchConfig::default();
//! let source = CommandTraceSource::new(&config.trace_path);
//! let report = Batch::new(&config, source).run().unwrap();
//! println!("{} runs failed", report.failures.len());
//! ```

mod batch;
mod source;
mod store;

pub use batch::{discover_cases, Batch, BatchReport, RunFailure, RunOutcome};
pub use source::{CommandTraceSource, TraceSource};
pub use store::MetricsStore;
