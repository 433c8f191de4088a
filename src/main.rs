use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use messbook::cli::{
    handle_expense_command, handle_export_command, handle_history_command,
    handle_participant_command, handle_summary_command, ExpenseCommands, ExportCommands,
    ParticipantCommands, SummaryArgs,
};
use messbook::config::{MessbookPaths, Settings};
use messbook::error::MessbookError;
use messbook::models::Roster;
use messbook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "messbook",
    version,
    about = "Shared household expense tracker with monthly settlement",
    long_about = "Messbook records what each member of a shared household pays for \
                  and, at the end of the month, splits the total equally and tells \
                  everyone who pays whom."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Participant to put on the roster (repeatable)
        #[arg(short, long = "participant")]
        participants: Vec<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Participant roster commands
    #[command(subcommand)]
    Participant(ParticipantCommands),

    /// Show the monthly summary and settlement
    Summary(SummaryArgs),

    /// Export statements and data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    messbook::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = MessbookPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { participants }) => {
            let already = paths.is_initialized();
            let roster = Roster::new(participants)
                .map_err(|e| MessbookError::Validation(e.to_string()))?;

            println!("Initializing Messbook at: {}", paths.base_dir().display());
            let settings = initialize_storage(&paths, roster)?;

            if already {
                println!("Already initialized; existing data left untouched.");
            } else {
                println!("Initialization complete!");
            }
            println!();
            if settings.roster().is_empty() {
                println!("No participants yet. Add one with 'messbook participant add <name>'.");
            } else {
                println!("Participants: {}", settings.roster());
            }
        }
        Some(Commands::Config) => {
            println!("Messbook Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            if settings.roster().is_empty() {
                println!("  Participants:    (none)");
            } else {
                println!("  Participants:    {}", settings.roster());
            }
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Participant(cmd)) => {
            handle_participant_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Summary(args)) => {
            handle_summary_command(&storage, &settings, args)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        None => {
            println!("Messbook - shared household expenses");
            println!();
            println!("Run 'messbook --help' for usage information.");
            println!("Run 'messbook init -p <name> -p <name>' to get started.");
        }
    }

    Ok(())
}
