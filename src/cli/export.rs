//! CLI commands for data export
//!
//! Provides commands for writing the monthly statement and full data dumps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::{parse_month, require_roster};
use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::export::{
    export_full_json, export_full_yaml, export_statement_json, export_statement_yaml, FullExport,
};
use crate::reports::MonthlyReport;
use crate::storage::Storage;

/// Statement format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatementFormat {
    /// CSV format (spreadsheet-friendly)
    Csv,
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Full export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DumpFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export one month's statement
    Statement {
        /// Month (YYYY-MM)
        month: String,

        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: StatementFormat,
    },

    /// Export all participants and expenses
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: DumpFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> MessbookResult<()> {
    match cmd {
        ExportCommands::Statement {
            month,
            output,
            format,
        } => handle_export_statement(storage, settings, &month, output, format),
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, settings, output, format, pretty),
        ExportCommands::Info => handle_export_info(storage, settings),
    }
}

fn create_writer(output: &Path) -> MessbookResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        MessbookError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> MessbookResult<()> {
    writer
        .flush()
        .map_err(|e| MessbookError::Export(e.to_string()))
}

/// Handle statement export
fn handle_export_statement(
    storage: &Storage,
    settings: &Settings,
    month: &str,
    output: PathBuf,
    format: StatementFormat,
) -> MessbookResult<()> {
    require_roster(settings)?;

    let month = parse_month(month)?;
    let report = MonthlyReport::generate(storage, settings, month)?;
    let mut writer = create_writer(&output)?;

    match format {
        StatementFormat::Csv => report.export_csv(&mut writer)?,
        StatementFormat::Json => export_statement_json(&report, &mut writer)?,
        StatementFormat::Yaml => export_statement_yaml(&report, &mut writer)?,
    }
    finish(writer)?;

    println!(
        "Statement for {} ({} expense(s)) exported to: {}",
        report.month_title(),
        report.expenses.len(),
        output.display()
    );

    Ok(())
}

/// Handle full export
fn handle_export_all(
    storage: &Storage,
    settings: &Settings,
    output: PathBuf,
    format: DumpFormat,
    pretty: bool,
) -> MessbookResult<()> {
    let mut writer = create_writer(&output)?;

    match format {
        DumpFormat::Json => export_full_json(storage, settings, &mut writer, pretty)?,
        DumpFormat::Yaml => export_full_yaml(storage, settings, &mut writer)?,
    }
    finish(writer)?;

    println!("Full data exported to: {}", output.display());
    Ok(())
}

/// Show export information
fn handle_export_info(storage: &Storage, settings: &Settings) -> MessbookResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Participants: {}", export.metadata.participant_count);
    println!("  Expenses:     {}", export.metadata.expense_count);
    println!(
        "  Total spent:  {}",
        settings.format_money(export.metadata.total_amount)
    );
    println!();

    if let Some(earliest) = &export.metadata.earliest_expense {
        println!("Expense Date Range:");
        println!("  Earliest: {}", earliest);
    }
    if let Some(latest) = &export.metadata.latest_expense {
        println!("  Latest:   {}", latest);
    }

    println!("\nAvailable Export Formats:");
    println!("  statement - csv, json or yaml (one month)");
    println!("  all       - json or yaml (every participant and expense)");

    println!("\nExamples:");
    println!("  messbook export statement 2025-01 january.csv");
    println!("  messbook export all backup.json --pretty");

    Ok(())
}
