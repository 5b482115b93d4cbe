//! Header-row column resolution.
//!
//! The FMECA sheet is column-order agnostic: the generator locates each of
//! the eleven required columns by its header label. An exact match on the
//! trimmed header text always wins; substring matching is kept only as a
//! fallback for legacy sheets whose headers carry extra annotation text
//! (e.g. `Heartbeat Timeout (sec)`). Within each class the last matching
//! cell wins, which is the documented tie-break inherited from the legacy
//! sheets.
//!
//! Resolution is all-or-nothing: if any column is missing the whole run
//! fails before a single data row is looked at, reporting every missing
//! column at once.

use crate::error::{SchemaError, SchemaResult};

/// The required column labels, in reporting order.
const REQUIRED_COLUMNS: [&str; 11] = [
    "Fault ID",
    "Subsystem Name",
    "Failure Mechanism",
    "Warning",
    "Blocking",
    "Node Name",
    "Response Command",
    "Command Arguments",
    "Key",
    "Timeout",
    "Misses",
];

/// Zero-based cell index of each required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: usize,
    pub subsystem: usize,
    pub description: usize,
    pub warning: usize,
    pub blocking: usize,
    pub node: usize,
    pub response: usize,
    pub args: usize,
    pub key: usize,
    pub timeout: usize,
    pub misses: usize,
}

impl ColumnMap {
    /// Resolve all required columns from the header row's cells.
    pub fn resolve(headers: &[String]) -> SchemaResult<Self> {
        let mut indexes = [None; 11];
        for (slot, label) in indexes.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find_column(headers, label);
        }

        let missing: Vec<&'static str> = indexes
            .iter()
            .zip(REQUIRED_COLUMNS)
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, label)| label)
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns { missing });
        }

        let at = |i: usize| indexes[i].unwrap();
        Ok(Self {
            id: at(0),
            subsystem: at(1),
            description: at(2),
            warning: at(3),
            blocking: at(4),
            node: at(5),
            response: at(6),
            args: at(7),
            key: at(8),
            timeout: at(9),
            misses: at(10),
        })
    }
}

/// Find the cell index for one column label.
///
/// Exact (trimmed) matches beat substring matches; within each class the
/// last matching cell wins.
fn find_column(headers: &[String], label: &str) -> Option<usize> {
    let mut exact = None;
    let mut partial = None;
    for (i, cell) in headers.iter().enumerate() {
        if cell.trim() == label {
            exact = Some(i);
        } else if cell.contains(label) {
            partial = Some(i);
        }
    }
    exact.or(partial)
}
