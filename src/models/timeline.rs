//! RUNNING intervals for Gantt-style timelines.

use serde::{Deserialize, Serialize};

use super::Pid;

/// One contiguous stretch of a process on the CPU, `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningInterval {
    /// Process that ran.
    pub pid: Pid,
    /// Dispatch time.
    pub start_time: i64,
    /// Time the process left RUNNING.
    pub end_time: i64,
}

impl RunningInterval {
    /// Creates an interval.
    pub fn new(pid: Pid, start_time: i64, end_time: i64) -> Self {
        Self {
            pid,
            start_time,
            end_time,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        let iv = RunningInterval::new(3, 10, 14);
        assert_eq!(iv.duration(), 4);
        assert_eq!(RunningInterval::new(3, 10, 10).duration(), 0);
    }
}
