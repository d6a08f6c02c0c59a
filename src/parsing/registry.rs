//! Process registry loader for test-case files.
//!
//! Each non-blank line is one process, comma-separated:
//! `pid, <size>, arrival, <cpu time>, <io freq>, <io duration>`.
//! Only columns 0 and 2 are read here.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{ProcessDefinition, ProcessRegistry};

/// Parses one definition line (1-based `line_no` for error reporting).
fn parse_definition(line: &str, line_no: usize) -> Result<ProcessDefinition> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(Error::malformed(
            line_no,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    }
    let pid = fields[0]
        .parse()
        .map_err(|_| Error::malformed(line_no, format!("invalid pid '{}'", fields[0])))?;
    let arrival_time = fields[2]
        .parse()
        .map_err(|_| Error::malformed(line_no, format!("invalid arrival time '{}'", fields[2])))?;
    Ok(ProcessDefinition { pid, arrival_time })
}

/// Builds the pid → arrival mapping from definition text.
///
/// Blank lines are skipped. A repeated pid replaces the earlier entry.
pub fn load_process_registry(text: &str) -> Result<ProcessRegistry> {
    let mut registry = ProcessRegistry::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        registry.insert(parse_definition(line, idx + 1)?);
    }
    Ok(registry)
}

/// Reads and parses a test-case file.
pub fn load_process_registry_file(path: &Path) -> Result<ProcessRegistry> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    load_process_registry(&text)
}
