//! Two-level fault grouping plus key-set and rejection bookkeeping.
//!
//! The builder owns the three structures the emitters render from:
//!
//! - the fault table: subsystem → node → ordered records;
//! - the key set: every distinct fault key, deduplicated;
//! - the rejection log: the id of every row that failed validation.
//!
//! First-seen insertion order at both grouping levels and in the key set is
//! a hard invariant, not an implementation detail: the emitted artifacts
//! are diffed across builds, so iteration order must equal input order.
//! Both levels use `IndexMap` to make that explicit.
//!
//! No re-validation happens here; the builder trusts the validator's
//! ACCEPT/REJECT decision. A key enters the key set only when its row was
//! fully accepted, which keeps the generated enumeration exactly equal to
//! the set of keys reachable through the fault table.

use crate::models::{FaultRecord, RejectedRow};
use indexmap::{IndexMap, IndexSet};

/// Faults of one subsystem, grouped by node in first-seen order.
pub type NodeFaults = IndexMap<String, Vec<FaultRecord>>;

/// Accumulates validated records and rejections for one run.
#[derive(Debug, Default)]
pub struct FaultTableBuilder {
    table: IndexMap<String, NodeFaults>,
    keys: IndexSet<String>,
    rejected: Vec<RejectedRow>,
}

impl FaultTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one validated record, registering its key.
    pub fn ingest_record(&mut self, record: FaultRecord) {
        self.keys.insert(record.key.clone());
        self.table
            .entry(record.subsystem.clone())
            .or_default()
            .entry(record.node.clone())
            .or_default()
            .push(record);
    }

    /// Ingest one rejected row.
    pub fn ingest_rejection(&mut self, rejection: RejectedRow) {
        self.rejected.push(rejection);
    }

    /// The fault table, subsystem → node → records, in first-seen order.
    pub fn subsystems(&self) -> &IndexMap<String, NodeFaults> {
        &self.table
    }

    /// Distinct fault keys across all accepted records, in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Rejected rows, in input order.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    /// All accepted records, in table iteration order.
    pub fn records(&self) -> impl Iterator<Item = &FaultRecord> {
        self.table
            .values()
            .flat_map(|nodes| nodes.values())
            .flatten()
    }

    /// Total number of accepted records across all nodes.
    pub fn accepted_count(&self) -> usize {
        self.table
            .values()
            .flat_map(|nodes| nodes.values())
            .map(Vec::len)
            .sum()
    }
}
