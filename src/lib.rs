//! CPU-scheduling trace replay and metrics.
//!
//! Replays the state-transition traces emitted by scheduler simulations
//! and derives throughput, average wait, turnaround, and response times,
//! plus per-process RUNNING timelines and cross-scheduler comparisons.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Transition`, `State`, `ProcessRegistry`,
//!   `AggregateMetrics`, `MetricName`, `RunningInterval`
//! - **`parsing`**: Trace table parser and test-case loader
//! - **`analysis`**: Metrics calculator, timeline extractor, comparison table
//! - **`validation`**: Non-fatal consistency checks on run inputs
//! - **`runner`**: Scheduler invocation, result persistence, batch driver
//! - **`config`**: Batch configuration
//!
//! # Example
//!
//! ```
//! use sched_metrics::models::{AggregateMetrics, ProcessRegistry};
//! use sched_metrics::parsing::parse_transitions;
//!
//! let trace = "\
//! | 0 | 1 | NEW | READY |
//! | 0 | 1 | READY | RUNNING |
//! | 4 | 1 | RUNNING | TERMINATED |
//! ";
//! let registry = ProcessRegistry::new().with_process(1, 0);
//! let metrics = AggregateMetrics::calculate(&parse_transitions(trace), &registry);
//! assert_eq!(metrics.avg_turnaround_time, 4.0);
//! assert_eq!(metrics.throughput, 0.25);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod runner;
pub mod validation;

pub use error::{Error, Result};
