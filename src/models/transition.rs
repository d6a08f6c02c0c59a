//! Process state-transition records.
//!
//! A trace is an ordered sequence of transitions emitted by an external
//! scheduler. Order is significant and times are assumed non-decreasing;
//! nothing here re-sorts them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Process identifier as written by the scheduler.
pub type Pid = i64;

/// Process lifecycle state.
///
/// `New` is a process's conceptual starting state; it only ever shows up
/// as the old state of a first transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    /// Created, not yet admitted.
    New,
    /// Waiting in the ready queue.
    Ready,
    /// On the CPU.
    Running,
    /// Blocked on I/O.
    Waiting,
    /// Finished.
    Terminated,
}

impl State {
    /// Upper-case label used in trace text.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::New => "NEW",
            State::Ready => "READY",
            State::Running => "RUNNING",
            State::Waiting => "WAITING",
            State::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(State::New),
            "READY" => Ok(State::Ready),
            "RUNNING" => Ok(State::Running),
            "WAITING" => Ok(State::Waiting),
            "TERMINATED" => Ok(State::Terminated),
            other => Err(format!("unrecognized state '{other}'")),
        }
    }
}

/// A single state transition of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Time of the transition.
    pub time: i64,
    /// Process that changed state.
    pub pid: Pid,
    /// State before the transition; `None` if the trace named a state
    /// this crate does not know.
    pub old_state: Option<State>,
    /// State after the transition.
    pub new_state: State,
}

impl Transition {
    /// Creates a transition.
    pub fn new(time: i64, pid: Pid, old_state: State, new_state: State) -> Self {
        Self {
            time,
            pid,
            old_state: Some(old_state),
            new_state,
        }
    }

    /// Creates a transition whose previous state is unknown.
    pub fn entering(time: i64, pid: Pid, new_state: State) -> Self {
        Self {
            time,
            pid,
            old_state: None,
            new_state,
        }
    }

    /// Whether this transition moves the process into `state`.
    #[inline]
    pub fn enters(&self, state: State) -> bool {
        self.new_state == state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_labels() {
        for state in [
            State::New,
            State::Ready,
            State::Running,
            State::Waiting,
            State::Terminated,
        ] {
            assert_eq!(state.as_str().parse::<State>(), Ok(state));
            assert_eq!(state.to_string(), state.as_str());
        }
        assert!("BLOCKED".parse::<State>().is_err());
        assert!("ready".parse::<State>().is_err());
    }

    #[test]
    fn test_transition_enters() {
        let t = Transition::new(5, 1, State::Ready, State::Running);
        assert!(t.enters(State::Running));
        assert!(!t.enters(State::Ready));
    }
}
