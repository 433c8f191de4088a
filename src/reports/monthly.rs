//! Monthly Report
//!
//! The month's expenses together with its settlement summary. Rendered to
//! the terminal by `summary` and written out as the monthly statement.

use std::io::Write;

use crate::config::Settings;
use crate::display::report::{double_separator, format_header, separator};
use crate::display::{format_balances, format_expense_list, format_settlement, format_unlisted};
use crate::error::{MessbookError, MessbookResult};
use crate::models::{Expense, Month};
use crate::services::SummaryService;
use crate::settlement::Summary;
use crate::storage::Storage;

const WIDTH: usize = 60;

/// Monthly Report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month: Month,
    /// Expenses dated in the month, oldest first
    pub expenses: Vec<Expense>,
    pub summary: Summary,
    pub settings: Settings,
}

impl MonthlyReport {
    /// Generate the report for `month`
    pub fn generate(storage: &Storage, settings: &Settings, month: Month) -> MessbookResult<Self> {
        let service = SummaryService::new(storage, settings.roster());
        let (mut expenses, summary) = service.for_month(month)?;
        expenses.reverse();

        Ok(Self {
            month,
            expenses,
            summary,
            settings: settings.clone(),
        })
    }

    fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format_header(
            &format!("Mess Expenses: {}", self.month_title()),
            WIDTH,
        ));
        output.push('\n');
        output.push_str(&double_separator(WIDTH));
        output.push_str("\n\n");

        output.push_str(&format_expense_list(&self.expenses, &self.settings));
        output.push_str("\n\n");

        output.push_str(&format_balances(&self.summary, self.symbol()));
        output.push('\n');
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<24}{:>12}\n",
            "Total:",
            self.settings.format_money(self.summary.grand_total)
        ));
        output.push_str(&format!(
            "{:<24}{:>12}\n",
            "Average per person:",
            self.settings.format_money(self.summary.average)
        ));

        if let Some(note) = format_unlisted(&self.summary, self.symbol()) {
            output.push('\n');
            output.push_str(&note);
            output.push('\n');
        }

        output.push_str("\nSettlement:\n");
        output.push_str(&format_settlement(&self.summary, self.symbol()));
        output.push('\n');

        output
    }

    /// "January 2025"
    pub fn month_title(&self) -> String {
        self.month.start_date().format("%B %Y").to_string()
    }

    /// Export the statement as CSV
    ///
    /// Sections are separated by an empty record: the expense table, the
    /// per-participant balances, the totals and the settlement sentences.
    pub fn export_csv<W: Write>(&self, writer: W) -> MessbookResult<()> {
        let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        let export_err = |e: csv::Error| MessbookError::Export(e.to_string());

        out.write_record(["Date", "Participant", "Item", "Amount", "Notes"])
            .map_err(export_err)?;
        for expense in &self.expenses {
            out.write_record([
                expense.date.format("%Y-%m-%d").to_string(),
                expense.participant.clone(),
                expense.item.clone(),
                expense.amount.to_string(),
                expense.notes.clone(),
            ])
            .map_err(export_err)?;
        }

        out.write_record([""]).map_err(export_err)?;
        out.write_record(["Participant", "Total", "Deviation"])
            .map_err(export_err)?;
        for balance in &self.summary.balances {
            out.write_record([
                balance.participant.clone(),
                balance.total.to_string(),
                balance.deviation.to_string(),
            ])
            .map_err(export_err)?;
        }

        out.write_record([""]).map_err(export_err)?;
        out.write_record(["Grand Total", self.summary.grand_total.to_string().as_str()])
            .map_err(export_err)?;
        out.write_record(["Average", self.summary.average.to_string().as_str()])
            .map_err(export_err)?;

        out.write_record([""]).map_err(export_err)?;
        out.write_record(["Settlement"]).map_err(export_err)?;
        if self.summary.is_settled() {
            out.write_record([crate::display::SETTLED_MESSAGE])
                .map_err(export_err)?;
        }
        for line in self.summary.settlement_lines(self.symbol()) {
            out.write_record([line]).map_err(export_err)?;
        }

        out.flush()
            .map_err(|e| MessbookError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MessbookPaths;
    use crate::models::{Money, Roster};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MessbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn settings() -> Settings {
        Settings {
            currency_symbol: "$".into(),
            participants: Roster::new(["A", "B", "C", "D"]).unwrap(),
            ..Settings::default()
        }
    }

    fn add(storage: &Storage, participant: &str, item: &str, cents: i64, day: u32) {
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        storage
            .expenses
            .upsert(Expense::new(participant, item, Money::from_cents(cents), date))
            .unwrap();
    }

    #[test]
    fn test_generate_monthly_report() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "B", "Gas cylinder", 30000, 20);
        add(&storage, "A", "Rice", 10000, 5);

        let report =
            MonthlyReport::generate(&storage, &settings(), Month::new(2025, 1).unwrap()).unwrap();

        let items: Vec<_> = report.expenses.iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["Rice", "Gas cylinder"]);
        assert_eq!(report.month_title(), "January 2025");

        let text = report.format_terminal();
        assert!(text.contains("Mess Expenses: January 2025"));
        assert!(text.contains("$400.00"));
        assert!(text.contains("C pays $100.00 to B"));
        assert!(text.contains("D pays $100.00 to B"));
    }

    #[test]
    fn test_empty_month() {
        let (_temp_dir, storage) = create_test_storage();

        let report =
            MonthlyReport::generate(&storage, &settings(), Month::new(2025, 1).unwrap()).unwrap();

        let text = report.format_terminal();
        assert!(text.contains("No expenses found."));
        assert!(text.contains("Everyone is settled up."));
    }

    #[test]
    fn test_export_csv() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "A", "Rice, 5kg", 10000, 5);
        add(&storage, "B", "Oil", 30000, 6);

        let report =
            MonthlyReport::generate(&storage, &settings(), Month::new(2025, 1).unwrap()).unwrap();

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Date,Participant,Item,Amount,Notes\n"));
        assert!(csv.contains("2025-01-05,A,\"Rice, 5kg\",100.00,\n"));
        assert!(csv.contains("B,300.00,200.00\n"));
        assert!(csv.contains("Grand Total,400.00\n"));
        assert!(csv.contains("Average,100.00\n"));
        assert!(csv.contains("C pays $100.00 to B\n"));
    }
}
