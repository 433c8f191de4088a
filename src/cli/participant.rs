//! Participant CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::MessbookResult;
use crate::services::ParticipantService;
use crate::storage::Storage;

/// Participant subcommands
#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// List participants in roster order
    List,
    /// Add a participant to the roster
    Add {
        /// Participant name
        name: String,
    },
    /// Remove a participant from the roster
    Remove {
        /// Participant name
        name: String,
    },
}

/// Handle a participant command
pub fn handle_participant_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ParticipantCommands,
) -> MessbookResult<()> {
    let mut service = ParticipantService::new(storage, settings);

    match cmd {
        ParticipantCommands::List => {
            let roster = service.list();
            if roster.is_empty() {
                println!("No participants yet. Add one with 'messbook participant add <name>'.");
                return Ok(());
            }

            println!("Participants ({}):", roster.len());
            for name in roster.iter() {
                let count = storage.expenses.get_by_participant(name)?.len();
                println!("  {:<20} {} expense(s)", name, count);
            }
        }

        ParticipantCommands::Add { name } => {
            let added = service.add(&name)?;
            println!("Added participant: {}", added);
        }

        ParticipantCommands::Remove { name } => {
            let removed = service.remove(&name)?;
            println!("Removed participant: {}", removed);
        }
    }

    Ok(())
}
