//! Consistency checks over a run's inputs.
//!
//! Findings are informational: they never change metric results and
//! never fail a run. Detects:
//! - Trace pids missing from the process registry
//! - Time going backwards between consecutive transitions
//! - READY entered while a READY interval is already open
//!
//! Conformance of a trace to any particular scheduling policy is not
//! checked.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Pid, ProcessRegistry, State, Transition};

/// A consistency finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Finding category.
    pub kind: ValidationWarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of consistency findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarningKind {
    /// A pid in the trace has no process definition.
    UnregisteredPid,
    /// A transition is earlier than the one before it.
    TimeRegression,
    /// READY entered while the pid was already waiting in READY.
    ReopenedReady,
}

impl ValidationWarning {
    fn new(kind: ValidationWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks a trace against its registry.
///
/// # Returns
/// All findings, in trace order; unregistered pids are reported once each,
/// after the ordering findings.
pub fn validate_run(
    transitions: &[Transition],
    registry: &ProcessRegistry,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut unregistered: BTreeSet<Pid> = BTreeSet::new();
    let mut in_ready: HashMap<Pid, bool> = HashMap::new();
    let mut prev_time: Option<i64> = None;

    for (idx, t) in transitions.iter().enumerate() {
        if let Some(prev) = prev_time {
            if t.time < prev {
                warnings.push(ValidationWarning::new(
                    ValidationWarningKind::TimeRegression,
                    format!(
                        "Transition {} at time {} precedes previous time {}",
                        idx, t.time, prev
                    ),
                ));
            }
        }
        prev_time = Some(t.time);

        if !registry.contains(t.pid) {
            unregistered.insert(t.pid);
        }

        let ready = in_ready.entry(t.pid).or_insert(false);
        match t.new_state {
            State::Ready => {
                if *ready {
                    warnings.push(ValidationWarning::new(
                        ValidationWarningKind::ReopenedReady,
                        format!("PID {} re-entered READY at time {}", t.pid, t.time),
                    ));
                }
                *ready = true;
            }
            _ => *ready = false,
        }
    }

    for pid in unregistered {
        warnings.push(ValidationWarning::new(
            ValidationWarningKind::UnregisteredPid,
            format!("PID {pid} appears in the trace but not in the process definitions"),
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::State::*;

    fn t(time: i64, pid: Pid, old: State, new: State) -> Transition {
        Transition::new(time, pid, old, new)
    }

    #[test]
    fn test_valid_run() {
        let reg = ProcessRegistry::new().with_process(1, 0);
        let ts = vec![
            t(0, 1, New, Ready),
            t(1, 1, Ready, Running),
            t(3, 1, Running, Waiting),
            t(5, 1, Waiting, Ready),
            t(6, 1, Ready, Running),
            t(8, 1, Running, Terminated),
        ];
        assert!(validate_run(&ts, &reg).is_empty());
    }

    #[test]
    fn test_unregistered_pid_reported_once() {
        let reg = ProcessRegistry::new().with_process(1, 0);
        let ts = vec![t(0, 4, New, Ready), t(2, 4, Ready, Running)];
        let warnings = validate_run(&ts, &reg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ValidationWarningKind::UnregisteredPid);
        assert!(warnings[0].message.contains("PID 4"));
    }

    #[test]
    fn test_time_regression() {
        let reg = ProcessRegistry::new().with_process(1, 0).with_process(2, 0);
        let ts = vec![t(5, 1, New, Ready), t(3, 2, New, Ready)];
        let warnings = validate_run(&ts, &reg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ValidationWarningKind::TimeRegression);
    }

    #[test]
    fn test_reopened_ready() {
        let reg = ProcessRegistry::new().with_process(1, 0);
        let ts = vec![t(0, 1, New, Ready), t(2, 1, Ready, Ready)];
        let warnings = validate_run(&ts, &reg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ValidationWarningKind::ReopenedReady);
    }
}
