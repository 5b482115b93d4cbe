//! High-level pipeline API: spreadsheet in, four artifacts out.
//!
//! The run is one pass over the input:
//!
//! 1. Read and decode the spreadsheet (encoding auto-detection).
//! 2. Find the header line (the first line containing `Fault ID`) and
//!    resolve the column schema; a missing column aborts here, before any
//!    output file exists.
//! 3. Validate each data row into the fault table or the rejection log.
//! 4. Render all four artifacts in memory.
//! 5. Only then create the output directories and write the files.
//!
//! Rendering before writing is what makes output all-or-nothing: a schema
//! failure, an empty key set, or a bad key identifier can never leave a
//! half-written config behind.

use serde::Serialize;
use std::path::Path;

use crate::emit;
use crate::error::{CsvError, PipelineError, PipelineResult};
use crate::models::RejectedRow;
use crate::parser::{split_row, Spreadsheet};
use crate::schema::ColumnMap;
use crate::table::FaultTableBuilder;
use crate::validation::validate_row;

/// Relative output paths under the config directory.
pub const FAULTS_CONFIG: &str = "faults.config";
pub const FAULT_TABLE_CONFIG: &str = "management/fault_table.config";
pub const SYS_MONITOR_CONFIG: &str = "management/sys_monitor_fault_info.config";
/// Relative output path under the source-tree root.
pub const FAULT_KEYS_HEADER: &str = "ff_util/include/ff_util/ff_faults.h";

/// The substring that marks the header line.
const HEADER_MARKER: &str = "Fault ID";

/// Summary of one compilation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Detected input encoding.
    pub encoding: String,
    /// Number of rows accepted into the fault table.
    pub accepted: usize,
    /// Number of distinct fault keys.
    pub key_count: usize,
    /// Number of subsystems in the table.
    pub subsystem_count: usize,
    /// Rows that failed validation, in input order.
    pub rejected: Vec<RejectedRow>,
}

impl RunReport {
    /// One summary line listing every rejected row id, for the end of the
    /// run. Rejections are reported in this single batch, never interleaved
    /// with progress output.
    pub fn summary_line(&self) -> String {
        if self.rejected.is_empty() {
            format!("All {} faults added", self.accepted)
        } else {
            let ids: Vec<&str> = self.rejected.iter().map(|r| r.id.as_str()).collect();
            format!(
                "The following faults weren't added: {}",
                ids.join(", ")
            )
        }
    }
}

/// All four rendered artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub faults_config: String,
    pub fault_table: String,
    pub sys_monitor: String,
    pub fault_keys: String,
}

/// Validate a decoded spreadsheet into a finalized [`FaultTableBuilder`].
pub fn compile(sheet: &Spreadsheet) -> PipelineResult<FaultTableBuilder> {
    // Header discovery: everything before the marker line is preamble.
    let header_idx = sheet
        .lines
        .iter()
        .position(|line| line.contains(HEADER_MARKER))
        .ok_or(CsvError::NoHeaderRow)?;
    let headers = split_row(&sheet.lines[header_idx], header_idx + 1)?;
    let cols = ColumnMap::resolve(&headers)?;

    let mut builder = FaultTableBuilder::new();
    for (idx, line) in sheet.lines.iter().enumerate().skip(header_idx + 1) {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_row(line, idx + 1)?;
        match validate_row(&cells, &cols) {
            Ok(record) => builder.ingest_record(record),
            Err(rejection) => builder.ingest_rejection(rejection),
        }
    }
    Ok(builder)
}

/// Render all four artifacts from a finalized builder.
pub fn render_artifacts(builder: &FaultTableBuilder) -> PipelineResult<Artifacts> {
    Ok(Artifacts {
        faults_config: emit::faults_config::render(builder),
        fault_table: emit::fault_table::render(builder),
        sys_monitor: emit::sys_monitor::render(builder),
        fault_keys: emit::fault_keys::render(builder)?,
    })
}

/// Compile a spreadsheet and write the four artifacts.
///
/// `config_dir` receives the three Lua configs; `source_root` receives the
/// fault-key header. Directories are created as needed, but only after
/// every artifact has rendered successfully.
pub fn generate(input: &Path, config_dir: &Path, source_root: &Path) -> PipelineResult<RunReport> {
    let sheet = Spreadsheet::load(input).map_err(PipelineError::Csv)?;
    let builder = compile(&sheet)?;
    let artifacts = render_artifacts(&builder)?;

    write_artifact(&config_dir.join(FAULTS_CONFIG), &artifacts.faults_config)?;
    write_artifact(&config_dir.join(FAULT_TABLE_CONFIG), &artifacts.fault_table)?;
    write_artifact(&config_dir.join(SYS_MONITOR_CONFIG), &artifacts.sys_monitor)?;
    write_artifact(&source_root.join(FAULT_KEYS_HEADER), &artifacts.fault_keys)?;

    Ok(report(&sheet, &builder))
}

/// Compile a spreadsheet without writing anything.
pub fn check(input: &Path) -> PipelineResult<(FaultTableBuilder, RunReport)> {
    let sheet = Spreadsheet::load(input).map_err(PipelineError::Csv)?;
    let builder = compile(&sheet)?;
    let report = report(&sheet, &builder);
    Ok((builder, report))
}

fn report(sheet: &Spreadsheet, builder: &FaultTableBuilder) -> RunReport {
    RunReport {
        encoding: sheet.encoding.clone(),
        accepted: builder.accepted_count(),
        key_count: builder.key_count(),
        subsystem_count: builder.subsystems().len(),
        rejected: builder.rejected().to_vec(),
    }
}

fn write_artifact(path: &Path, content: &str) -> PipelineResult<()> {
    let to_write_err = |source: std::io::Error| PipelineError::WriteError {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_write_err)?;
    }
    std::fs::write(path, content).map_err(to_write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmitError, SchemaError};

    const HEADER: &str = "Fault ID,Subsystem Name,Failure Mechanism,Warning,Blocking,\
Node Name,Response Command,Command Arguments,Key,Timeout,Misses";

    fn sheet(lines: &[&str]) -> Spreadsheet {
        Spreadsheet {
            encoding: "utf-8".into(),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn full_sheet() -> Spreadsheet {
        sheet(&[
            "FMECA export - some preamble line",
            HEADER,
            "1,FSW-GNC,ekf diverged,yes,no,ekf,reset_ekf,,GNC_EKF_DIVERGED,N/A,N/A",
            "2,FSW-EPS,battery low,no,no,eps,restart,\"arg1,arg2\",EPS_BATTERY_LOW,N/A,N/A",
            "3,FSW-EPS,heartbeat lost,no,yes,eps,restart,,EPS_HEARTBEAT_MISSING,5,3",
            "4,FSW-GNC?,unknown owner,yes,no,ekf,reset_ekf,,GNC_MYSTERY,N/A,N/A",
            "5,MGT,monitor heartbeat,no,no,sys_monitor,restart,,SYS_HEARTBEAT_MISSING,5,2",
            "6,MGT,monitor init,no,yes,sys_monitor,reboot,,SYS_INITIALIZATION_FAILED,N/A,N/A",
            "",
            "7,MGT,disk full,yes,no,sys_monitor,purge,,SYS_DISK_FULL,N/A,N/A",
        ])
    }

    #[test]
    fn test_every_row_in_exactly_one_bucket() {
        let builder = compile(&full_sheet()).unwrap();
        // 7 data rows: 6 accepted, 1 rejected
        assert_eq!(builder.accepted_count(), 6);
        assert_eq!(builder.rejected().len(), 1);
        assert_eq!(builder.rejected()[0].id, "4");
    }

    #[test]
    fn test_subsystem_normalization() {
        let builder = compile(&full_sheet()).unwrap();
        let subsystems: Vec<&str> = builder.subsystems().keys().map(String::as_str).collect();
        assert_eq!(subsystems, vec!["gnc", "eps", "mgt"]);
    }

    #[test]
    fn test_key_count_matches_accepted_distinct_keys() {
        let builder = compile(&full_sheet()).unwrap();
        assert_eq!(builder.key_count(), 6);
        // The rejected row's key never leaks into the enumeration.
        assert!(!builder.keys().any(|k| k == "GNC_MYSTERY"));
    }

    #[test]
    fn test_quoted_args_cell_survives_split() {
        let builder = compile(&full_sheet()).unwrap();
        let eps = &builder.subsystems()["eps"]["eps"];
        assert_eq!(eps[0].args, vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_sys_monitor_carve_out_end_to_end() {
        let builder = compile(&full_sheet()).unwrap();
        let artifacts = render_artifacts(&builder).unwrap();

        // Heartbeat/init diverted to the sys_monitor artifact...
        assert!(artifacts
            .sys_monitor
            .contains("sys_monitor_heartbeat_timeout = 5"));
        assert!(artifacts
            .sys_monitor
            .contains("sys_monitor_heartbeat_fault_response = command(\"restart\")"));
        assert!(artifacts
            .sys_monitor
            .contains("sys_monitor_heartbeat_fault_blocking = false"));
        assert!(artifacts
            .sys_monitor
            .contains("sys_monitor_init_fault_response = command(\"reboot\")"));

        // ...and absent from the fault table, while the ordinary
        // sys_monitor fault stays.
        assert!(!artifacts.fault_table.contains("SYS_HEARTBEAT_MISSING"));
        assert!(!artifacts.fault_table.contains("SYS_INITIALIZATION_FAILED"));
        assert!(artifacts.fault_table.contains("SYS_DISK_FULL"));
    }

    #[test]
    fn test_args_rendered_as_quoted_list() {
        let builder = compile(&full_sheet()).unwrap();
        let artifacts = render_artifacts(&builder).unwrap();
        assert!(artifacts
            .fault_table
            .contains("response=command(\"restart\", \"arg1\", \"arg2\")"));
    }

    #[test]
    fn test_determinism() {
        let a = render_artifacts(&compile(&full_sheet()).unwrap()).unwrap();
        let b = render_artifacts(&compile(&full_sheet()).unwrap()).unwrap();
        assert_eq!(a.faults_config, b.faults_config);
        assert_eq!(a.fault_table, b.fault_table);
        assert_eq!(a.sys_monitor, b.sys_monitor);
        assert_eq!(a.fault_keys, b.fault_keys);
    }

    #[test]
    fn test_missing_header_row() {
        let err = compile(&sheet(&["just,some,cells", "1,2,3"])).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Csv(CsvError::NoHeaderRow)
        ));
    }

    #[test]
    fn test_missing_columns_reported_before_rows_processed() {
        let err = compile(&sheet(&[
            "Fault ID,Node Name,Key",
            "1,eps,EPS_BATTERY_LOW",
        ]))
        .unwrap_err();
        match err {
            PipelineError::Schema(SchemaError::MissingColumns { missing }) => {
                assert!(missing.contains(&"Subsystem Name"));
                assert!(missing.contains(&"Timeout"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_with_no_data_rows_fails_at_emission() {
        let builder = compile(&sheet(&[HEADER])).unwrap();
        let err = render_artifacts(&builder).unwrap_err();
        assert!(matches!(err, PipelineError::Emit(EmitError::EmptyKeySet)));
    }

    #[test]
    fn test_summary_line() {
        let builder = compile(&full_sheet()).unwrap();
        let report = RunReport {
            encoding: "utf-8".into(),
            accepted: builder.accepted_count(),
            key_count: builder.key_count(),
            subsystem_count: builder.subsystems().len(),
            rejected: builder.rejected().to_vec(),
        };
        assert_eq!(
            report.summary_line(),
            "The following faults weren't added: 4"
        );
    }

    #[test]
    fn test_rejections_in_input_order() {
        let mut lines = vec![HEADER.to_string()];
        lines.push("1,?,x,yes,no,eps,restart,,K1,N/A,N/A".into());
        lines.push("2,EPS,x,yes,no,eps,restart,,K2,N/A,N/A".into());
        lines.push("3,EPS,x,maybe,no,eps,restart,,K3,N/A,N/A".into());
        lines.push("4,EPS,x,yes,no,eps,restart,,K4,bad,N/A".into());
        let sheet = Spreadsheet {
            encoding: "utf-8".into(),
            lines,
        };
        let builder = compile(&sheet).unwrap();
        let ids: Vec<&str> = builder.rejected().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        assert_eq!(builder.accepted_count(), 1);
    }
}
