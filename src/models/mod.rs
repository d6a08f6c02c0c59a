//! Trace and metric domain models.
//!
//! Provides the data types that flow through the pipeline: transitions
//! parsed from a scheduler trace, process definitions from a test case,
//! and the derived metric and timeline records.
//!
//! # Flow
//!
//! | Input | Derived |
//! |-------|---------|
//! | `Transition` sequence | `RunningInterval` list |
//! | `Transition` sequence + `ProcessRegistry` | `AggregateMetrics` |

mod metrics;
mod process;
mod timeline;
mod transition;

pub use metrics::{AggregateMetrics, MetricName};
pub use process::{ProcessDefinition, ProcessRegistry};
pub use timeline::RunningInterval;
pub use transition::{Pid, State, Transition};
