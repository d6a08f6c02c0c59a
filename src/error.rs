//! Error taxonomy for the trace-to-metrics pipeline.
//!
//! Malformed individual trace lines are not errors; they are skipped by
//! the parser. Everything that is fatal to a single run lands here.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// No trace text was available at all.
    #[error("trace text is absent")]
    Parse,

    /// A process-definition line is structurally invalid.
    #[error("malformed process definition at line {line}: {reason}")]
    MalformedDefinition {
        /// 1-based line number in the definition text.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The external scheduler exited abnormally or could not be spawned.
    #[error("scheduler '{scheduler}' failed on case '{case}': {reason}")]
    ScheduledRunFailure {
        /// Scheduler identifier.
        scheduler: String,
        /// Test-case identifier.
        case: String,
        /// Exit status or spawn error.
        reason: String,
    },

    /// A metric name outside the fixed set was requested.
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    /// Filesystem access failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A persisted JSON record could not be read or written.
    #[error("JSON error on {}: {source}", .path.display())]
    Json {
        /// Path of the record.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDefinition {
            line,
            reason: reason.into(),
        }
    }
}
