//! Process definitions loaded from a test case.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Pid;

/// A process as described by a test case.
///
/// Only the pid and arrival time matter for metrics; the remaining
/// columns of a case file (memory size, CPU burst, I/O pattern) are
/// consumed by the scheduler, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Unique process identifier within a case.
    pub pid: Pid,
    /// Arrival time.
    pub arrival_time: i64,
}

impl ProcessDefinition {
    /// Creates a process definition.
    pub fn new(pid: Pid, arrival_time: i64) -> Self {
        Self { pid, arrival_time }
    }
}

/// Mapping from pid to arrival time for one test case.
///
/// Iteration is in ascending pid order. Inserting an existing pid
/// replaces its arrival time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRegistry {
    arrivals: BTreeMap<Pid, i64>,
}

impl ProcessRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a definition, replacing any earlier entry for the same pid.
    pub fn insert(&mut self, def: ProcessDefinition) {
        self.arrivals.insert(def.pid, def.arrival_time);
    }

    /// Builder-style insert.
    pub fn with_process(mut self, pid: Pid, arrival_time: i64) -> Self {
        self.insert(ProcessDefinition::new(pid, arrival_time));
        self
    }

    /// Arrival time of a pid.
    pub fn arrival_time(&self, pid: Pid) -> Option<i64> {
        self.arrivals.get(&pid).copied()
    }

    /// Whether the pid is registered.
    pub fn contains(&self, pid: Pid) -> bool {
        self.arrivals.contains_key(&pid)
    }

    /// All definitions, ordered by pid.
    pub fn iter(&self) -> impl Iterator<Item = ProcessDefinition> + '_ {
        self.arrivals
            .iter()
            .map(|(&pid, &arrival_time)| ProcessDefinition { pid, arrival_time })
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

impl FromIterator<ProcessDefinition> for ProcessRegistry {
    fn from_iter<I: IntoIterator<Item = ProcessDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for def in iter {
            registry.insert(def);
        }
        registry
    }
}
