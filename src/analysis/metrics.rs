//! Metrics calculator.
//!
//! Replays a transition sequence once, left to right, tracking per-pid
//! timing facts, then averages them over the processes of the test case.
//!
//! # Per-pid state machine
//!
//! | Transition into | Effect |
//! |-----------------|--------|
//! | RUNNING | record first dispatch; close open READY interval into wait |
//! | READY | open READY interval at current time |
//! | TERMINATED | record termination time |
//! | anything else | none |
//!
//! Wait only accrues on READY → RUNNING. A READY interval that is never
//! followed by a dispatch contributes nothing, and entering WAITING or
//! TERMINATED does not close it.
//!
//! Per-pid differences and sums are taken in `i128`, so times anywhere in
//! the `i64` range cannot overflow.

use std::collections::BTreeMap;

use log::debug;

use crate::models::{AggregateMetrics, Pid, ProcessRegistry, State, Transition};

/// Timing facts derived for one pid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessTimingFacts {
    /// Time of the first transition into RUNNING.
    pub first_running_time: Option<i64>,
    /// Time of the (last) transition into TERMINATED.
    pub terminate_time: Option<i64>,
    /// Sum of READY time closed by a dispatch.
    pub total_ready_wait: i128,
}

impl ProcessTimingFacts {
    /// First dispatch minus arrival; a pid that never ran counts as dispatched at 0.
    pub fn response_time(&self, arrival_time: i64) -> i128 {
        i128::from(self.first_running_time.unwrap_or(0)) - i128::from(arrival_time)
    }

    /// Termination minus arrival; a pid that never terminated counts as terminated at 0.
    pub fn turnaround_time(&self, arrival_time: i64) -> i128 {
        i128::from(self.terminate_time.unwrap_or(0)) - i128::from(arrival_time)
    }

    /// Accumulated READY wait.
    pub fn wait_time(&self) -> i128 {
        self.total_ready_wait
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PidTracker {
    facts: ProcessTimingFacts,
    ready_since: Option<i64>,
}

/// Per-run traversal context: timing facts for every pid seen in a trace.
///
/// Built fresh for each run and never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct RunTimings {
    pids: BTreeMap<Pid, PidTracker>,
}

impl RunTimings {
    /// Replays `transitions` in order.
    pub fn from_transitions(transitions: &[Transition]) -> Self {
        let mut pids: BTreeMap<Pid, PidTracker> = BTreeMap::new();

        for t in transitions {
            let tracker = pids.entry(t.pid).or_default();
            match t.new_state {
                State::Running => {
                    if tracker.facts.first_running_time.is_none() {
                        tracker.facts.first_running_time = Some(t.time);
                    }
                    if let Some(since) = tracker.ready_since.take() {
                        tracker.facts.total_ready_wait += i128::from(t.time) - i128::from(since);
                    }
                }
                State::Ready => tracker.ready_since = Some(t.time),
                State::Terminated => tracker.facts.terminate_time = Some(t.time),
                State::New | State::Waiting => {}
            }
        }

        Self { pids }
    }

    /// Timing facts of a pid, or `None` if it never appears in the trace.
    pub fn facts(&self, pid: Pid) -> Option<&ProcessTimingFacts> {
        self.pids.get(&pid).map(|t| &t.facts)
    }

    /// Timing facts of every pid in the trace, ordered by pid.
    pub fn iter(&self) -> impl Iterator<Item = (Pid, &ProcessTimingFacts)> + '_ {
        self.pids.iter().map(|(&pid, t)| (pid, &t.facts))
    }

    /// Latest termination time across all pids in the trace.
    pub fn max_terminate_time(&self) -> Option<i64> {
        self.pids.values().filter_map(|t| t.facts.terminate_time).max()
    }

    /// Number of distinct pids in the trace.
    pub fn pid_count(&self) -> usize {
        self.pids.len()
    }
}

impl AggregateMetrics {
    /// Computes metrics from a trace and the case's process registry.
    ///
    /// # Arguments
    /// * `transitions` - The run's transition sequence, in trace order.
    /// * `registry` - Arrival times; averages are taken over these pids only.
    pub fn calculate(transitions: &[Transition], registry: &ProcessRegistry) -> Self {
        Self::from_timings(&RunTimings::from_transitions(transitions), registry)
    }

    /// Aggregates already-derived timing facts.
    ///
    /// Returns all zeros for an empty registry.
    pub fn from_timings(timings: &RunTimings, registry: &ProcessRegistry) -> Self {
        let n = registry.len();
        if n == 0 {
            return Self::default();
        }

        let absent = ProcessTimingFacts::default();
        let mut total_wait: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut total_response: i128 = 0;

        for def in registry.iter() {
            let facts = timings.facts(def.pid).unwrap_or(&absent);
            debug!(
                "pid {}: arrival={} first_run={:?} terminate={:?} wait={}",
                def.pid,
                def.arrival_time,
                facts.first_running_time,
                facts.terminate_time,
                facts.total_ready_wait
            );
            total_wait += facts.wait_time();
            total_turnaround += facts.turnaround_time(def.arrival_time);
            total_response += facts.response_time(def.arrival_time);
        }

        let throughput = match timings.max_terminate_time() {
            Some(end) if end != 0 => n as f64 / end as f64,
            _ => 0.0,
        };

        Self {
            throughput,
            avg_wait_time: total_wait as f64 / n as f64,
            avg_turnaround_time: total_turnaround as f64 / n as f64,
            avg_response_time: total_response as f64 / n as f64,
        }
    }
}
