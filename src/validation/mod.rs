//! Per-row semantic validation.
//!
//! Each data row either becomes a [`FaultRecord`] or a [`RejectedRow`],
//! never both and never neither. Validation short-circuits at the first
//! invalid field; nothing about a rejected row is written anywhere except
//! the rejection log.
//!
//! The FMECA sheet is maintained by hand, so ambiguity is a first-class
//! outcome: a `?` anywhere in a decision cell means the engineers have not
//! settled that fault yet, and the row is skipped rather than guessed at.

use crate::models::{FaultRecord, RejectedField, RejectedRow};
use crate::schema::ColumnMap;

// =============================================================================
// Field Converters
// =============================================================================

/// Outcome of parsing a yes/no decision cell.
///
/// Distinct from a boolean because "we don't know yet" is a legal cell
/// value that must reject the row, not default to either answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Yes,
    No,
    Ambiguous,
}

impl TriState {
    /// Parse a yes/no cell, case-insensitively.
    ///
    /// A `?` anywhere makes the cell ambiguous regardless of other content
    /// (cells like `yes?` mean the answer is still under discussion). The
    /// `no` check runs before `yes` so that free-text like `not yet` cannot
    /// read as an accept.
    pub fn parse(cell: &str) -> Self {
        let value = cell.to_lowercase();
        if value.contains('?') {
            TriState::Ambiguous
        } else if value.contains("no") {
            TriState::No
        } else if value.contains("yes") {
            TriState::Yes
        } else {
            TriState::Ambiguous
        }
    }

    /// The literal boolean used verbatim in generated code, if unambiguous.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Ambiguous => None,
        }
    }
}

/// Parse a timing cell (heartbeat timeout or miss count).
///
/// `N/A` yields the -1 sentinel, since not every fault is a heartbeat.
/// Otherwise the cell must parse as a number no smaller than -1; anything
/// else is invalid.
pub fn parse_timing(cell: &str) -> Option<f64> {
    if cell.contains("N/A") {
        return Some(-1.0);
    }
    cell.trim().parse::<f64>().ok().filter(|v| *v >= -1.0)
}

// =============================================================================
// Row Validation
// =============================================================================

/// Validate one data row into a [`FaultRecord`], or reject it.
///
/// Cells beyond the end of a short row read as empty, which lets the
/// per-field checks produce the right rejection instead of a panic.
pub fn validate_row(cells: &[String], cols: &ColumnMap) -> Result<FaultRecord, RejectedRow> {
    let cell = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");
    let id = cell(cols.id).to_string();
    let reject = |field: RejectedField| RejectedRow {
        id: id.clone(),
        field,
    };

    // Skip the fault if we aren't sure what subsystem it belongs to.
    let subsystem = cell(cols.subsystem);
    if subsystem.contains('?') {
        return Err(reject(RejectedField::Subsystem));
    }
    // The FSW- prefix is only meaningful inside the FMECA itself.
    let subsystem = subsystem.replace("FSW-", "").to_lowercase();

    let node = cell(cols.node);
    if node.is_empty() || node.contains('?') {
        return Err(reject(RejectedField::Node));
    }

    let warning = TriState::parse(cell(cols.warning))
        .as_bool()
        .ok_or_else(|| reject(RejectedField::Warning))?;
    let blocking = TriState::parse(cell(cols.blocking))
        .as_bool()
        .ok_or_else(|| reject(RejectedField::Blocking))?;

    let response = cell(cols.response);
    if response.is_empty() || response.contains('?') {
        return Err(reject(RejectedField::Response));
    }

    // An empty args cell is valid: most responses take no arguments.
    let args_cell = cell(cols.args);
    let args: Vec<String> = if args_cell.is_empty() {
        Vec::new()
    } else {
        args_cell.split(',').map(str::to_string).collect()
    };

    let key = cell(cols.key);
    if key.is_empty() || key.contains('?') {
        return Err(reject(RejectedField::Key));
    }

    let timeout_sec =
        parse_timing(cell(cols.timeout)).ok_or_else(|| reject(RejectedField::Timeout))?;
    let misses = parse_timing(cell(cols.misses)).ok_or_else(|| reject(RejectedField::Misses))?;

    Ok(FaultRecord {
        id,
        subsystem,
        node: node.to_string(),
        description: cell(cols.description).to_string(),
        warning,
        blocking,
        response: response.to_string(),
        args,
        key: key.to_string(),
        timeout_sec,
        misses,
    })
}
