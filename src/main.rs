//! Faultgen CLI - compile the FMECA spreadsheet into fault-management
//! artifacts.
//!
//! # Main Command
//!
//! ```bash
//! faultgen generate fmeca.csv out/config out/shared
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! faultgen check fmeca.csv          # Validate only, report rejected rows
//! faultgen parse fmeca.csv          # Dump accepted records as JSON
//! ```

use clap::{Parser, Subcommand};
use faultgen::{FaultRecord, PipelineError, RunReport, SchemaError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "faultgen")]
#[command(about = "Compile FMECA spreadsheets into fault management configs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate all four artifacts from the FMECA spreadsheet
    Generate {
        /// Input FMECA CSV file
        input: PathBuf,

        /// Output directory for the Lua configs
        config_dir: PathBuf,

        /// Source-tree root for the fault-key header
        source_root: PathBuf,
    },

    /// Validate the spreadsheet without writing anything
    Check {
        /// Input FMECA CSV file
        input: PathBuf,
    },

    /// Parse and validate, then dump the accepted records as JSON
    Parse {
        /// Input FMECA CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            config_dir,
            source_root,
        } => cmd_generate(&input, &config_dir, &source_root),

        Commands::Check { input } => cmd_check(&input),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
    };

    if let Err(e) = result {
        report_error(e.as_ref());
        std::process::exit(1);
    }
}

fn cmd_generate(
    input: &Path,
    config_dir: &Path,
    source_root: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Compiling FMECA: {}", input.display());

    let report = faultgen::generate(input, config_dir, source_root)?;

    print_report(&report);
    eprintln!("💾 Configs written under: {}", config_dir.display());
    eprintln!("💾 Fault-key header written under: {}", source_root.display());
    eprintln!("{}", report.summary_line());

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking FMECA: {}", input.display());

    let (builder, report) = faultgen::check(input)?;
    print_report(&report);

    for rejected in builder.rejected() {
        eprintln!(
            "   ❌ Fault {} skipped: invalid {}",
            rejected.id,
            rejected.field.label()
        );
    }
    eprintln!("{}", report.summary_line());

    if !report.rejected.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing FMECA: {}", input.display());

    let (builder, report) = faultgen::check(input)?;
    print_report(&report);

    let records: Vec<&FaultRecord> = builder.records().collect();
    let json = serde_json::to_string_pretty(&records)?;
    match output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("💾 Output written to: {}", path.display());
        }
        None => println!("{}", json),
    }
    eprintln!("{}", report.summary_line());

    Ok(())
}

fn print_report(report: &RunReport) {
    eprintln!("   Encoding: {}", report.encoding);
    eprintln!(
        "   Accepted {} faults across {} subsystems, {} distinct keys",
        report.accepted, report.subsystem_count, report.key_count
    );
}

/// Print one diagnostic per missing column; everything else is one line.
fn report_error(err: &(dyn std::error::Error + 'static)) {
    if let Some(PipelineError::Schema(SchemaError::MissingColumns { missing })) =
        err.downcast_ref::<PipelineError>()
    {
        for column in missing {
            eprintln!("❌ Could not find {} column!", column);
        }
    } else {
        eprintln!("❌ Error: {}", err);
    }
}
