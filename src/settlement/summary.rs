//! Settlement inputs and outputs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::Money;

/// A single (participant, amount) fact fed to the calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub participant: String,
    pub amount: Money,
}

impl ExpenseRecord {
    pub fn new(participant: impl Into<String>, amount: Money) -> Self {
        Self {
            participant: participant.into(),
            amount,
        }
    }
}

/// One roster member's position for the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant: String,
    /// Sum of everything this participant paid
    pub total: Money,
    /// `total - average`, rounded to the cent. Positive means owed money.
    pub deviation: Money,
}

/// A single payer -> payee transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub payer: String,
    pub payee: String,
    pub amount: Money,
}

impl SettlementInstruction {
    /// Human-readable sentence, e.g. `"Rohit pays ₹100.00 to Suman"`
    pub fn describe(&self, currency_symbol: &str) -> String {
        format!(
            "{} pays {} to {}",
            self.payer,
            self.amount.format_with_symbol(currency_symbol),
            self.payee
        )
    }
}

/// Result of a settlement calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// One entry per roster member, in roster order
    pub balances: Vec<ParticipantBalance>,
    /// Sum of the roster members' totals
    pub grand_total: Money,
    /// Equal share per participant, rounded to the cent
    pub average: Money,
    /// Transfers that bring every deviation to zero
    pub settlement: Vec<SettlementInstruction>,
    /// Totals recorded under labels that are not on the roster; included
    /// in `grand_total` but absent from `balances`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unlisted: BTreeMap<String, Money>,
}

impl Summary {
    /// Total paid by a roster member
    pub fn total_of(&self, participant: &str) -> Option<Money> {
        self.balance_of(participant).map(|b| b.total)
    }

    /// Deviation of a roster member from the equal share
    pub fn deviation_of(&self, participant: &str) -> Option<Money> {
        self.balance_of(participant).map(|b| b.deviation)
    }

    /// Full balance line of a roster member, if on the roster
    pub fn balance_of(&self, participant: &str) -> Option<&ParticipantBalance> {
        self.balances.iter().find(|b| b.participant == participant)
    }

    /// Totals keyed by label, off-roster labels included
    pub fn totals(&self) -> HashMap<&str, Money> {
        self.balances
            .iter()
            .map(|b| (b.participant.as_str(), b.total))
            .chain(self.unlisted.iter().map(|(label, total)| (label.as_str(), *total)))
            .collect()
    }

    /// Deviations keyed by participant
    pub fn deviations(&self) -> HashMap<&str, Money> {
        self.balances
            .iter()
            .map(|b| (b.participant.as_str(), b.deviation))
            .collect()
    }

    /// Sum of all deviations
    ///
    /// Zero up to per-participant rounding, minus whatever was recorded under
    /// off-roster labels.
    pub fn deviation_sum(&self) -> Money {
        self.balances.iter().map(|b| b.deviation).sum()
    }

    /// True when no transfers are needed
    pub fn is_settled(&self) -> bool {
        self.settlement.is_empty()
    }

    /// Settlement instructions as sentences
    pub fn settlement_lines(&self, currency_symbol: &str) -> Vec<String> {
        self.settlement
            .iter()
            .map(|s| s.describe(currency_symbol))
            .collect()
    }
}
