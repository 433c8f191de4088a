//! Expense CLI commands
//!
//! Implements CLI commands for recording and managing expenses.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_month, require_roster};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::MessbookResult;
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense paid by a participant
    Add {
        /// Participant who paid
        participant: String,
        /// Amount paid (e.g., "450" or "450.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What was bought
        item: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List expenses
    List {
        /// Only expenses in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only expenses paid by this participant
        #[arg(short, long)]
        participant: Option<String>,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID (or a prefix of it)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (or a prefix of it)
        id: String,
        /// New paying participant
        #[arg(short, long)]
        participant: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New item description
        #[arg(short, long)]
        item: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (or a prefix of it)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> MessbookResult<()> {
    let service = ExpenseService::new(storage, settings.roster());

    match cmd {
        ExpenseCommands::Add {
            participant,
            amount,
            item,
            date,
            notes,
        } => {
            require_roster(settings)?;

            let amount = parse_amount(&amount)?;
            let date = date.as_deref().map(parse_date).transpose()?;

            let expense = service.create(CreateExpenseInput {
                participant,
                item,
                amount,
                date,
                notes,
            })?;

            println!(
                "Recorded {} paid by {} for {} on {}",
                settings.format_money(expense.amount),
                expense.participant,
                expense.item,
                expense.date.format(&settings.date_format)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            month,
            participant,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(month) = month {
                filter = filter.month(parse_month(&month)?);
            }
            if let Some(participant) = participant {
                filter = filter.participant(participant);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list(filter)?;
            println!("{}", format_expense_list(&expenses, settings));
            if !expenses.is_empty() {
                let total = expenses.iter().map(|e| e.amount).sum();
                println!("{} expense(s), {}", expenses.len(), settings.format_money(total));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.require(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            participant,
            amount,
            item,
            date,
            notes,
        } => {
            let expense = service.require(&id)?;

            let changes = UpdateExpenseInput {
                participant,
                item,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                notes,
            };

            if changes.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(expense.id, changes)?;
            println!("Updated expense: {}", updated.id.short());
            print!("{}", format_expense_details(&updated, settings));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.require(&id)?;
            let deleted = service.delete(expense.id)?;
            println!(
                "Deleted expense: {} ({} {} {})",
                deleted.id.short(),
                deleted.date,
                deleted.participant,
                settings.format_money(deleted.amount)
            );
        }
    }

    Ok(())
}
