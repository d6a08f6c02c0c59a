//! Trace analysis: metrics, timelines, and cross-run comparison.
//!
//! The metrics calculator and the timeline extractor each walk the same
//! transition sequence independently. They close intervals on different
//! triggers, so their traversals are kept separate.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

mod comparison;
mod metrics;
mod timeline;

pub use comparison::{CaseComparison, ComparisonTable, MetricSeries, SchedulerValue};
pub use metrics::{ProcessTimingFacts, RunTimings};
pub use timeline::extract_timeline;
