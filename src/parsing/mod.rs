//! Text boundary parsers.
//!
//! - **Trace parser**: scheduler execution table → ordered `Transition`s.
//!   Permissive; unrecognized lines are skipped.
//! - **Registry loader**: test-case definitions → `ProcessRegistry`.
//!   Strict; a malformed line fails the load.

mod registry;
mod trace;

pub use registry::{load_process_registry, load_process_registry_file};
pub use trace::{parse_row, parse_trace, parse_transitions};
