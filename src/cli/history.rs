//! Audit history command

use crate::error::MessbookResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(storage: &Storage, limit: usize) -> MessbookResult<()> {
    let mut entries = storage.audit().entries()?;
    let total = entries.len();

    if total == 0 {
        println!("No history recorded yet.");
        return Ok(());
    }

    let shown = entries.split_off(total.saturating_sub(limit));
    for entry in &shown {
        println!("{}", entry.format_line());
    }

    if total > shown.len() {
        println!();
        println!("Showing {} of {} entries.", shown.len(), total);
    }

    Ok(())
}
