//! Settlement summary display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::settlement::Summary;

/// Printed when no transfers are needed
pub const SETTLED_MESSAGE: &str = "Everyone is settled up.";

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Spent")]
    total: String,
    #[tabled(rename = "Deviation")]
    deviation: String,
    #[tabled(rename = "")]
    position: &'static str,
}

/// Signed amount, `+` for money owed to the participant
pub fn format_deviation(amount: Money, symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_symbol(symbol))
    } else {
        amount.format_with_symbol(symbol)
    }
}

/// Per-participant totals and deviations as a table
pub fn format_balances(summary: &Summary, symbol: &str) -> String {
    let rows = summary.balances.iter().map(|b| BalanceRow {
        participant: b.participant.clone(),
        total: b.total.format_with_symbol(symbol),
        deviation: format_deviation(b.deviation, symbol),
        position: if b.deviation.is_positive() {
            "gets back"
        } else if b.deviation.is_negative() {
            "owes"
        } else {
            ""
        },
    });

    Table::new(rows)
        .with(Style::sharp())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string()
}

/// Settlement sentences, one per line
pub fn format_settlement(summary: &Summary, symbol: &str) -> String {
    if summary.is_settled() {
        return SETTLED_MESSAGE.to_string();
    }

    summary
        .settlement_lines(symbol)
        .into_iter()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Labels that are not on the roster, if any
pub fn format_unlisted(summary: &Summary, symbol: &str) -> Option<String> {
    if summary.unlisted.is_empty() {
        return None;
    }

    let entries: Vec<_> = summary
        .unlisted
        .iter()
        .map(|(label, amount)| format!("{} {}", label, amount.format_with_symbol(symbol)))
        .collect();
    Some(format!(
        "Paid by people not on the roster (in the total, not in the share): {}",
        entries.join(", ")
    ))
}
