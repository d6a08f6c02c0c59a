//! Timeline extractor.
//!
//! Derives per-process RUNNING intervals for Gantt rendering. Opens an
//! interval on entry to RUNNING and closes it on entry to READY, WAITING
//! or TERMINATED. An interval still open at the end of the trace has no
//! observed end and is dropped.

use std::collections::HashMap;

use crate::models::{Pid, RunningInterval, State, Transition};

/// Extracts RUNNING intervals in the order they close.
pub fn extract_timeline(transitions: &[Transition]) -> Vec<RunningInterval> {
    let mut open: HashMap<Pid, i64> = HashMap::new();
    let mut intervals = Vec::new();

    for t in transitions {
        match t.new_state {
            State::Running => {
                open.insert(t.pid, t.time);
            }
            State::Ready | State::Waiting | State::Terminated => {
                if let Some(start) = open.remove(&t.pid) {
                    intervals.push(RunningInterval::new(t.pid, start, t.time));
                }
            }
            State::New => {}
        }
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::State::*;

    fn t(time: i64, pid: Pid, old: State, new: State) -> Transition {
        Transition::new(time, pid, old, new)
    }

    #[test]
    fn test_timeline_basic() {
        let ts = vec![
            t(0, 1, Ready, Running),
            t(3, 1, Running, Waiting),
            t(3, 2, Ready, Running),
            t(5, 2, Running, Ready),
            t(5, 1, Ready, Running),
            t(9, 1, Running, Terminated),
        ];
        assert_eq!(
            extract_timeline(&ts),
            vec![
                RunningInterval::new(1, 0, 3),
                RunningInterval::new(2, 3, 5),
                RunningInterval::new(1, 5, 9),
            ]
        );
    }

    #[test]
    fn test_timeline_truncates_open_interval() {
        assert!(extract_timeline(&[t(0, 1, Ready, Running)]).is_empty());
    }

    #[test]
    fn test_timeline_close_without_open() {
        let ts = vec![t(0, 1, New, Ready), t(2, 1, Ready, Waiting)];
        assert!(extract_timeline(&ts).is_empty());
    }

    #[test]
    fn test_timeline_rerun_overwrites_open() {
        let ts = vec![
            t(0, 1, Ready, Running),
            t(2, 1, Running, Running),
            t(6, 1, Running, Terminated),
        ];
        assert_eq!(extract_timeline(&ts), vec![RunningInterval::new(1, 2, 6)]);
    }

    #[test]
    fn test_timeline_empty() {
        assert!(extract_timeline(&[]).is_empty());
    }
}
