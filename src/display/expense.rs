//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Expense;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Paid by")]
    participant: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short(),
        date: e.date.format(&settings.date_format).to_string(),
        participant: e.participant.clone(),
        item: truncate(&e.item, 32),
        amount: settings.format_money(e.amount),
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::new(4..5)).with(Alignment::right()))
        .to_string()
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!(
        "Date:    {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!("Paid by: {}\n", expense.participant));
    output.push_str(&format!("Item:    {}\n", expense.item));
    output.push_str(&format!("Amount:  {}\n", settings.format_money(expense.amount)));

    if !expense.notes.is_empty() {
        output.push_str(&format!("Notes:   {}\n", expense.notes));
    }

    output.push_str(&format!(
        "Recorded: {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if expense.updated_at != expense.created_at {
        output.push_str(&format!(
            "Updated:  {}\n",
            expense.updated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    output.push_str(&format!("Full ID:  {}\n", expense.id.as_uuid()));

    output
}
