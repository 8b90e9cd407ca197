#![deny(missing_docs)]
//! Surveyor command-line interface.
//!
//! Recursively scans a directory for shapefiles, extracts per-field schema
//! metadata, and writes a formatted spreadsheet report.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use surveyor_core::{
    REPORT_HEADERS, ReportTable, ScanOutcome, ScanProgress, ScanSummary, ShapefileInspector,
    StdFileSystem, render_json, render_workbook,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "surveyor", version, about = "Shapefile structure auditor")]
struct Cli {
    /// Root directory to scan for shapefiles.
    root: PathBuf,
    /// Path of the spreadsheet report.
    #[arg(short, long, default_value = "Reporte_Shapefiles.xlsx")]
    output: PathBuf,
    /// Output format for the record preview.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Skip writing the spreadsheet report.
    #[arg(long)]
    no_report: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(not(test))]
fn main() -> CliResult<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}

#[cfg(test)]
fn main() {}

fn run(cli: Cli) -> CliResult<()> {
    if !cli.root.is_dir() {
        return Err(format!("not a directory: {}", cli.root.display()).into());
    }

    let inspector = ShapefileInspector::new(StdFileSystem::new());
    let ScanOutcome { records, warnings } =
        inspector.inspect_with_progress(&cli.root, &mut print_progress)?;

    if records.is_empty() {
        println!("No shapefiles found under {}", cli.root.display());
        print_warnings(&warnings);
        return Ok(());
    }

    let table = ReportTable::new(records);
    print!("{}", render_summary(&table.summary()));

    if !cli.no_report {
        let buffer = render_workbook(&table)?;
        fs::write(&cli.output, buffer)?;
        println!("Report written to {}", cli.output.display());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render_preview_text(&table)),
        OutputFormat::Json => println!("{}", render_json(table.records())?),
    }

    print_warnings(&warnings);
    Ok(())
}

fn print_progress(progress: ScanProgress<'_>) {
    if let Some(name) = progress.current_shapefile {
        eprintln!("[{}/{}] processing {name}", progress.processed, progress.total);
    } else if progress.processed % 10 == 0 || progress.processed == progress.total {
        eprintln!("[{}/{}] scanning", progress.processed, progress.total);
    }
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings ({}):", warnings.len());
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn render_summary(summary: &ScanSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Field records: {}", summary.field_records);
    let _ = writeln!(output, "Shapefiles: {}", summary.shapefiles);
    let _ = writeln!(output, "Base folders: {}", summary.base_folders);
    output
}

fn render_preview_text(table: &ReportTable) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", REPORT_HEADERS.join(" | "));
    for record in table.records() {
        let _ = writeln!(
            output,
            "{} | {} | {} | {} | {} | {}",
            record.base_folder,
            record.shapefile_name,
            record.geometry_type,
            record.field_name,
            record.data_type,
            record.length
        );
    }
    output
}
