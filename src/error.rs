//! Error types for the fault-table generation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - spreadsheet reading and row-splitting errors
//! - [`SchemaError`] - header-row column resolution errors
//! - [`EmitError`] - artifact rendering errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Per-row rejections are deliberately NOT errors: a bad row is skipped and
//! logged, and the run continues. Only structural problems (unreadable file,
//! missing columns, unbalanced quotes) and emission-time invariant failures
//! abort the run.

use thiserror::Error;

// =============================================================================
// Spreadsheet Reading Errors
// =============================================================================

/// Errors while reading and tokenizing the FMECA spreadsheet.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Input file has no content.
    #[error("Spreadsheet is empty")]
    EmptyFile,

    /// No line containing the `Fault ID` header was found.
    #[error("Could not find row with column headers")]
    NoHeaderRow,

    /// A line opened a quoted cell that was never closed.
    #[error("Line {line}: unbalanced quote in cell starting '{cell}'")]
    UnbalancedQuote { line: usize, cell: String },
}

// =============================================================================
// Schema Resolution Errors
// =============================================================================

/// Errors while resolving required columns from the header row.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// One or more required columns were not found in the header row.
    ///
    /// Carries every missing column label so the CLI can print one
    /// diagnostic per column.
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
}

// =============================================================================
// Artifact Emission Errors
// =============================================================================

/// Errors while rendering output artifacts.
///
/// These are emission-time invariant failures and abort the run; since all
/// artifacts are rendered before any file is opened, no partial output is
/// ever left behind.
#[derive(Debug, Error)]
pub enum EmitError {
    /// No fault keys were collected, so the enum header cannot be generated.
    #[error("No fault keys to emit; the enum header would be empty")]
    EmptyKeySet,

    /// A fault key is not a valid C identifier.
    #[error("Fault key '{0}' is not a valid identifier for the enum header")]
    InvalidKeyIdentifier(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::pipeline::generate`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Spreadsheet reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Column resolution error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Artifact rendering error.
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),

    /// Failed to write an output file.
    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for spreadsheet reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for schema resolution.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for artifact rendering.
pub type EmitResult<T> = Result<T, EmitError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
