//! Scheduler invocation boundary.
//!
//! The pipeline only needs trace text for a (scheduler, case) pair.
//! [`TraceSource`] hides where that text comes from, so batch logic can
//! be driven by canned traces in tests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::config::SchedulerSpec;
use crate::error::{Error, Result};

/// Produces trace text for a scheduler run over one test case.
pub trait TraceSource {
    /// Runs `scheduler` on the case file at `case_path`.
    ///
    /// Returns `Ok(None)` when the run completed but left no trace text.
    /// A failed run is an [`Error::ScheduledRunFailure`].
    fn run(&self, scheduler: &SchedulerSpec, case_path: &Path) -> Result<Option<String>>;
}

/// Spawns the scheduler executable and reads back its trace file.
///
/// The executable gets exactly one argument, the case path, and is
/// expected to write its trace to `trace_path`. The call blocks until
/// the child exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct CommandTraceSource {
    trace_path: PathBuf,
}

impl CommandTraceSource {
    /// Creates a source reading traces from `trace_path`.
    pub fn new(trace_path: impl Into<PathBuf>) -> Self {
        Self {
            trace_path: trace_path.into(),
        }
    }

    /// Location the scheduler writes its trace to.
    pub fn trace_path(&self) -> &Path {
        &self.trace_path
    }

    fn failure(scheduler: &SchedulerSpec, case_path: &Path, reason: String) -> Error {
        Error::ScheduledRunFailure {
            scheduler: scheduler.name.clone(),
            case: case_path.display().to_string(),
            reason,
        }
    }
}

impl TraceSource for CommandTraceSource {
    fn run(&self, scheduler: &SchedulerSpec, case_path: &Path) -> Result<Option<String>> {
        // A trace left over from an earlier run must not be read back as this one.
        match fs::remove_file(&self.trace_path) {
            Ok(()) => debug!("removed stale trace {}", self.trace_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.trace_path, e)),
        }

        debug!(
            "spawning {} {}",
            scheduler.executable.display(),
            case_path.display()
        );
        let status = Command::new(&scheduler.executable)
            .arg(case_path)
            .status()
            .map_err(|e| Self::failure(scheduler, case_path, format!("spawn failed: {e}")))?;
        if !status.success() {
            return Err(Self::failure(scheduler, case_path, status.to_string()));
        }

        match fs::read_to_string(&self.trace_path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&self.trace_path, e)),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_command_source_reads_trace() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("execution.txt");
        let exe = script(
            dir.path(),
            "sched.sh",
            &format!("echo \"| 0 | 1 | NEW | READY |\" > {}", trace.display()),
        );
        let source = CommandTraceSource::new(&trace);
        let text = source
            .run(&SchedulerSpec::new("FAKE", exe), Path::new("case.txt"))
            .unwrap()
            .unwrap();
        assert!(text.contains("READY"));
    }

    #[test]
    fn test_command_source_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let exe = script(dir.path(), "fail.sh", "exit 3");
        let source = CommandTraceSource::new(dir.path().join("execution.txt"));
        let err = source
            .run(&SchedulerSpec::new("BROKEN", exe), Path::new("case.txt"))
            .unwrap_err();
        match err {
            Error::ScheduledRunFailure {
                scheduler, case, ..
            } => {
                assert_eq!(scheduler, "BROKEN");
                assert_eq!(case, "case.txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_command_source_missing_trace_and_stale_removed() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("execution.txt");
        fs::write(&trace, "| 9 | 9 | NEW | READY |").unwrap();
        let exe = script(dir.path(), "quiet.sh", "exit 0");
        let source = CommandTraceSource::new(&trace);
        let text = source
            .run(&SchedulerSpec::new("QUIET", exe), Path::new("case.txt"))
            .unwrap();
        assert!(text.is_none());
    }

    #[test]
    fn test_command_source_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let source = CommandTraceSource::new(dir.path().join("execution.txt"));
        let result = source.run(
            &SchedulerSpec::new("GONE", dir.path().join("nope")),
            Path::new("case.txt"),
        );
        assert!(matches!(result, Err(Error::ScheduledRunFailure { .. })));
    }
}
