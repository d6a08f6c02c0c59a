//! Transition parser for scheduler execution traces.
//!
//! A trace is a text table. Recognized rows look like
//!
//! ```text
//! |    12 |   3 | READY   | RUNNING    |
//! ```
//!
//! with `time`, `pid`, `old_state`, `new_state` in the first four cells.
//! Only the new state has to be recognized; an unknown old state is kept
//! as `None`. Headers, separator rules and the memory-state dumps that schedulers
//! interleave with the table are skipped.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::models::{State, Transition};

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\w+)\s*\|\s*(\w+)\s*\|")
        .expect("trace row pattern is valid")
});

/// Parses trace text that may be absent.
///
/// Absent text is a [`Error::Parse`]; present text with no recognizable
/// rows yields an empty sequence.
pub fn parse_trace(text: Option<&str>) -> Result<Vec<Transition>> {
    text.map(parse_transitions).ok_or(Error::Parse)
}

/// Parses every recognizable row of `text`, preserving input order.
pub fn parse_transitions(text: &str) -> Vec<Transition> {
    let transitions: Vec<Transition> = text.lines().filter_map(parse_row).collect();
    debug!("parsed {} transitions from trace", transitions.len());
    transitions
}

/// Parses one table row, or `None` if the line is not a transition row.
pub fn parse_row(line: &str) -> Option<Transition> {
    let caps = ROW.captures(line)?;
    let time = caps[1].parse().ok()?;
    let pid = caps[2].parse().ok()?;
    let new_state = match caps[4].parse::<State>() {
        Ok(state) => state,
        Err(e) => {
            debug!("skipping trace row: {e}");
            return None;
        }
    };
    match caps[3].parse::<State>() {
        Ok(old_state) => Some(Transition::new(time, pid, old_state, new_state)),
        Err(e) => {
            debug!("keeping trace row with {e} as old state");
            Some(Transition::entering(time, pid, new_state))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::IndexedRandom;
    use rand::Rng;

    const SAMPLE: &str = "\
+------------------------------------------------+
|Time of Transition |PID | Old State | New State |
+------------------------------------------------+
|                 0 |  1 |       NEW |     READY |

Memory State at time 0
Partition 1: USED by PID 1 (size 40)
|                 0 |  1 |     READY |   RUNNING |
|                 4 |  1 |   RUNNING |TERMINATED |
+------------------------------------------------+
";

    #[test]
    fn test_parse_sample_table() {
        let ts = parse_transitions(SAMPLE);
        assert_eq!(
            ts,
            vec![
                Transition::new(0, 1, State::New, State::Ready),
                Transition::new(0, 1, State::Ready, State::Running),
                Transition::new(4, 1, State::Running, State::Terminated),
            ]
        );
    }

    #[test]
    fn test_parse_idempotent() {
        assert_eq!(parse_transitions(SAMPLE), parse_transitions(SAMPLE));
    }

    #[test]
    fn test_skip_invalid_lines() {
        let text = "garbage line\n| 3 | 2 | READY | RUNNING |\n|| not a row ||\n";
        let ts = parse_transitions(text);
        assert_eq!(ts, vec![Transition::new(3, 2, State::Ready, State::Running)]);
    }

    #[test]
    fn test_skip_unknown_new_state() {
        let text = "| 3 | 2 | READY | BLOCKED |\n| 4 | 2 | READY | RUNNING |";
        assert_eq!(parse_transitions(text).len(), 1);
    }

    #[test]
    fn test_unknown_old_state_kept() {
        let t = parse_row("| 3 | 2 | FOO | RUNNING |").unwrap();
        assert_eq!(t, Transition::entering(3, 2, State::Running));
        assert_eq!(t.old_state, None);
    }

    #[test]
    fn test_row_requires_leading_bar() {
        assert!(parse_row("  | 1 | 1 | NEW | READY |").is_none());
        assert!(parse_row("|1|1|NEW|READY|").is_some());
        assert!(parse_row("| 1 | 1 | NEW | READY").is_none());
    }

    #[test]
    fn test_row_extra_cells_ignored() {
        let t = parse_row("| 7 | 9 | RUNNING | WAITING | extra |").unwrap();
        assert_eq!(t, Transition::new(7, 9, State::Running, State::Waiting));
    }

    #[test]
    fn test_absent_vs_empty() {
        assert!(matches!(parse_trace(None), Err(Error::Parse)));
        assert!(parse_trace(Some("")).unwrap().is_empty());
        assert!(parse_trace(Some("header only\n")).unwrap().is_empty());
    }

    #[test]
    fn test_random_interleaving_keeps_rows_in_order() {
        let mut rng = rand::rng();
        let states = ["READY", "RUNNING", "WAITING", "TERMINATED"];
        let noise = ["", "+-----+", "Memory State at time 4", "| x | y |", "Total free memory: 10"];

        for _ in 0..20 {
            let mut expected = Vec::new();
            let mut lines = Vec::new();
            let mut time = 0i64;
            for _ in 0..rng.random_range(0..30) {
                time += rng.random_range(0..5);
                let pid = rng.random_range(1..6);
                let old = *states.choose(&mut rng).unwrap();
                let new = *states.choose(&mut rng).unwrap();
                lines.push(format!("| {time:>5} | {pid:>3} | {old:>10} | {new:>10} |"));
                expected.push(Transition::new(
                    time,
                    pid,
                    old.parse().unwrap(),
                    new.parse().unwrap(),
                ));
                if rng.random_bool(0.5) {
                    lines.push(noise.choose(&mut rng).unwrap().to_string());
                }
            }
            let text = lines.join("\n");
            assert_eq!(parse_transitions(&text), expected);
        }
    }
}
