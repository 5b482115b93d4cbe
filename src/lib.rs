//! # Faultgen - FMECA spreadsheet to fault-management artifact compiler
//!
//! Faultgen turns the hand-maintained FMECA spreadsheet (CSV export) into the
//! runtime artifacts the onboard fault-management system consumes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  FMECA CSV  │────▶│   Parser    │────▶│  Validator  │────▶│   Emitters   │
//! │ (Excel dump)│     │ (auto-enc)  │     │ (per row)   │     │ (4 artifacts)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! One run produces four mutually consistent artifacts: the minimal fault
//! config, the full fault-response table, the system-monitor fault
//! variables, and the C++ fault-key enumeration header. Rows the sheet's
//! maintainers have not settled yet (a `?` in a decision cell, an invalid
//! timing number) are skipped and reported in one batch at the end; they
//! are never guessed at.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let report = faultgen::generate(
//!     Path::new("fmeca.csv"),
//!     Path::new("out/config"),
//!     Path::new("out/shared"),
//! )?;
//! eprintln!("{}", report.summary_line());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (FaultRecord, RejectedRow)
//! - [`parser`] - Spreadsheet reading and row splitting
//! - [`schema`] - Header column resolution
//! - [`validation`] - Field converters and the per-row validator
//! - [`table`] - Ordered two-level grouping and key set
//! - [`emit`] - Artifact renderers
//! - [`pipeline`] - End-to-end orchestration

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod schema;

// Validation
pub mod validation;

// Aggregation
pub mod table;

// Emission
pub mod emit;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, EmitError, PipelineError, SchemaError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{FaultRecord, RejectedField, RejectedRow};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{detect_encoding, split_row, Spreadsheet};
pub use schema::ColumnMap;

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{parse_timing, validate_row, TriState};

// =============================================================================
// Re-exports - Table
// =============================================================================

pub use table::{FaultTableBuilder, NodeFaults};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{check, compile, generate, render_artifacts, Artifacts, RunReport};
