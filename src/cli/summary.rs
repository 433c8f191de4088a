//! Monthly summary command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use super::{parse_month_or_current, require_roster};
use crate::config::Settings;
use crate::error::{MessbookError, MessbookResult};
use crate::reports::MonthlyReport;
use crate::storage::Storage;

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Month to summarize (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,

    /// Write the statement as CSV to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> MessbookResult<()> {
    require_roster(settings)?;

    let month = parse_month_or_current(args.month.as_deref())?;
    let report = MonthlyReport::generate(storage, settings, month)?;

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                MessbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.export_csv(BufWriter::new(file))?;
            println!(
                "Statement for {} written to: {}",
                report.month_title(),
                path.display()
            );
        }
        None => print!("{}", report.format_terminal()),
    }

    Ok(())
}
