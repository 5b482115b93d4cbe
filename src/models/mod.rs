//! Domain models for the fault-table generation pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`FaultRecord`] - one fully validated FMECA row
//! - [`RejectedRow`] - a row that failed validation, with the failing field
//! - [`RejectedField`] - which validation step rejected the row

use serde::Serialize;

// =============================================================================
// Fault Record
// =============================================================================

/// One validated row of the FMECA spreadsheet.
///
/// Constructed field-by-field by the validator; immutable afterwards. All
/// normalization (subsystem prefix stripping and lower-casing, args
/// splitting) has already happened by the time a record exists.
#[derive(Debug, Clone, Serialize)]
pub struct FaultRecord {
    /// Spreadsheet-supplied identifier, treated as opaque text.
    pub id: String,
    /// Subsystem name, lower-cased with the `FSW-` prefix stripped.
    pub subsystem: String,
    /// Node that raises the fault.
    pub node: String,
    /// Free-text failure mechanism description.
    pub description: String,
    /// Whether the fault is a warning.
    pub warning: bool,
    /// Whether the fault response blocks normal operation.
    pub blocking: bool,
    /// Response command name.
    pub response: String,
    /// Ordered response command arguments, possibly empty.
    pub args: Vec<String>,
    /// Symbolic fault key; becomes an enumerator in the generated header.
    pub key: String,
    /// Heartbeat timeout in seconds; -1 when not applicable.
    pub timeout_sec: f64,
    /// Allowed consecutive heartbeat misses; -1 when not applicable.
    pub misses: f64,
}

impl FaultRecord {
    /// Whether this record is a heartbeat fault.
    pub fn is_heartbeat(&self) -> bool {
        self.key.contains("HEARTBEAT")
    }

    /// Whether this record is an initialization fault.
    pub fn is_initialization(&self) -> bool {
        self.key.contains("INITIALIZATION")
    }
}

// =============================================================================
// Rejected Rows
// =============================================================================

/// The validation step that rejected a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectedField {
    Subsystem,
    Node,
    Warning,
    Blocking,
    Response,
    Key,
    Timeout,
    Misses,
}

impl RejectedField {
    /// Human-readable field name for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Subsystem => "subsystem",
            Self::Node => "node",
            Self::Warning => "warning",
            Self::Blocking => "blocking",
            Self::Response => "response command",
            Self::Key => "key",
            Self::Timeout => "heartbeat timeout",
            Self::Misses => "heartbeat misses",
        }
    }
}

/// A row that failed validation.
///
/// Rows are recorded in input order; the final report lists every rejected
/// id in a single line at the end of the run.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    /// The row's `Fault ID` cell, verbatim.
    pub id: String,
    /// The first field that failed validation.
    pub field: RejectedField,
}
