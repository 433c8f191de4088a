//! Equal-share settlement calculator
//!
//! Pure function over a period's expense records and the roster: aggregates
//! totals, derives each participant's deviation from the equal share and
//! sweeps debtors against creditors to produce the transfer list.

use std::collections::{BTreeMap, HashMap};

use crate::models::money::round_div;
use crate::models::{Money, Roster};

use super::summary::{ExpenseRecord, ParticipantBalance, SettlementInstruction, Summary};
use super::SettlementError;

/// Compute totals, equal share, deviations and settlement for a period
///
/// Every roster member appears in the result even without records. Records
/// whose participant is not on the roster are reported under
/// [`Summary::unlisted`]; they count towards the grand total but get no
/// balance, so the deviations then no longer sum to zero.
///
/// # Errors
///
/// Returns [`SettlementError::EmptyRoster`] when there is nobody to divide by.
pub fn compute(expenses: &[ExpenseRecord], roster: &Roster) -> Result<Summary, SettlementError> {
    if roster.is_empty() {
        return Err(SettlementError::EmptyRoster);
    }

    let mut totals: HashMap<&str, Money> = roster.iter().map(|p| (p, Money::zero())).collect();
    let mut unlisted: BTreeMap<String, Money> = BTreeMap::new();

    for record in expenses {
        match totals.get_mut(record.participant.as_str()) {
            Some(total) => *total += record.amount,
            None => *unlisted.entry(record.participant.clone()).or_default() += record.amount,
        }
    }

    let count = roster.len() as i64;
    let grand_total: Money = totals.values().chain(unlisted.values()).sum();
    let average = grand_total
        .div_rounded(count)
        .ok_or(SettlementError::EmptyRoster)?;

    let balances: Vec<ParticipantBalance> = roster
        .iter()
        .map(|participant| {
            let total = totals.get(participant).copied().unwrap_or_default();
            // round(total - grand_total / n) without losing the fraction first
            let scaled = total.cents() as i128 * count as i128 - grand_total.cents() as i128;
            ParticipantBalance {
                participant: participant.to_string(),
                total,
                deviation: Money::from_cents(round_div(scaled, count as i128) as i64),
            }
        })
        .collect();

    tracing::debug!(
        participants = roster.len(),
        records = expenses.len(),
        grand_total = %grand_total,
        average = %average,
        unlisted = unlisted.len(),
        "aggregated expense totals"
    );

    let settlement = settle(&balances);

    Ok(Summary {
        balances,
        grand_total,
        average,
        settlement,
        unlisted,
    })
}

/// Pair debtors with creditors until one side is exhausted
///
/// Debtors are taken smallest debt first, creditors largest credit first.
/// Both sorts are stable, so equal amounts keep roster order.
pub fn settle(balances: &[ParticipantBalance]) -> Vec<SettlementInstruction> {
    let mut debtors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.deviation.is_negative())
        .map(|b| (b.participant.as_str(), b.deviation.abs()))
        .collect();
    let mut creditors: Vec<(&str, Money)> = balances
        .iter()
        .filter(|b| b.deviation.is_positive())
        .map(|b| (b.participant.as_str(), b.deviation))
        .collect();

    debtors.sort_by(|a, b| a.1.cmp(&b.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut owed: Vec<Money> = debtors.iter().map(|(_, amount)| *amount).collect();
    let mut due: Vec<Money> = creditors.iter().map(|(_, amount)| *amount).collect();

    let mut instructions = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = owed[i].min(due[j]);
        debug_assert!(amount.is_positive());

        tracing::debug!(
            payer = debtors[i].0,
            payee = creditors[j].0,
            amount = %amount,
            "settlement transfer"
        );
        instructions.push(SettlementInstruction {
            payer: debtors[i].0.to_string(),
            payee: creditors[j].0.to_string(),
            amount,
        });

        owed[i] -= amount;
        due[j] -= amount;

        if owed[i].is_zero() {
            i += 1;
        }
        if due[j].is_zero() {
            j += 1;
        }
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(labels: &[&str]) -> Roster {
        Roster::new(labels.iter().copied()).unwrap()
    }

    fn rec(participant: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord::new(participant, Money::from_cents(cents))
    }

    fn apply(summary: &Summary) -> HashMap<String, Money> {
        let mut remaining: HashMap<String, Money> = summary
            .balances
            .iter()
            .map(|b| (b.participant.clone(), b.deviation))
            .collect();
        for s in &summary.settlement {
            *remaining.get_mut(&s.payer).unwrap() += s.amount;
            *remaining.get_mut(&s.payee).unwrap() -= s.amount;
        }
        remaining
    }

    #[test]
    fn test_two_debtors_one_creditor() {
        let roster = roster(&["A", "B", "C", "D"]);
        let expenses = vec![rec("A", 10000), rec("B", 30000)];

        let summary = compute(&expenses, &roster).unwrap();

        assert_eq!(summary.total_of("A"), Some(Money::from_cents(10000)));
        assert_eq!(summary.total_of("B"), Some(Money::from_cents(30000)));
        assert_eq!(summary.total_of("C"), Some(Money::zero()));
        assert_eq!(summary.total_of("D"), Some(Money::zero()));
        assert_eq!(summary.grand_total, Money::from_cents(40000));
        assert_eq!(summary.average, Money::from_cents(10000));

        assert_eq!(summary.deviation_of("A"), Some(Money::zero()));
        assert_eq!(summary.deviation_of("B"), Some(Money::from_cents(20000)));
        assert_eq!(summary.deviation_of("C"), Some(Money::from_cents(-10000)));
        assert_eq!(summary.deviation_of("D"), Some(Money::from_cents(-10000)));

        assert_eq!(
            summary.settlement,
            vec![
                SettlementInstruction {
                    payer: "C".into(),
                    payee: "B".into(),
                    amount: Money::from_cents(10000),
                },
                SettlementInstruction {
                    payer: "D".into(),
                    payee: "B".into(),
                    amount: Money::from_cents(10000),
                },
            ]
        );
        assert_eq!(
            summary.settlement_lines("₹"),
            vec!["C pays ₹100.00 to B", "D pays ₹100.00 to B"]
        );
    }

    #[test]
    fn test_equal_totals_need_no_transfers() {
        let roster = roster(&["A", "B", "C", "D"]);
        let expenses: Vec<_> = ["A", "B", "C", "D"].iter().map(|p| rec(p, 2500)).collect();

        let summary = compute(&expenses, &roster).unwrap();

        assert!(summary.deviations().values().all(|d| d.is_zero()));
        assert!(summary.is_settled());
    }

    #[test]
    fn test_single_debtor_splits_across_creditors() {
        let roster = roster(&["A", "B", "C"]);
        // average 200: A +50, B +150, C -200
        let expenses = vec![rec("A", 25000), rec("B", 35000)];
        let summary = compute(&expenses, &roster).unwrap();

        assert_eq!(summary.deviation_of("C"), Some(Money::from_cents(-20000)));
        assert_eq!(summary.settlement.len(), 2);
        assert_eq!(summary.settlement[0].payer, "C");
        assert_eq!(summary.settlement[0].payee, "B");
        assert_eq!(summary.settlement[0].amount, Money::from_cents(15000));
        assert_eq!(summary.settlement[1].payee, "A");
        assert_eq!(summary.settlement[1].amount, Money::from_cents(5000));
    }

    #[test]
    fn test_smallest_debtor_meets_largest_creditor_first() {
        let roster = roster(&["A", "B", "C", "D"]);
        // average 250: A +450, B +50, C -250, D -250
        let expenses = vec![rec("A", 70000), rec("B", 30000)];
        let summary = compute(&expenses, &roster).unwrap();

        assert_eq!(summary.deviation_of("A"), Some(Money::from_cents(45000)));
        assert_eq!(summary.deviation_of("B"), Some(Money::from_cents(5000)));
        assert_eq!(summary.deviation_of("C"), Some(Money::from_cents(-25000)));
        assert_eq!(summary.deviation_of("D"), Some(Money::from_cents(-25000)));

        // C and D tie, so roster order decides
        let pairs: Vec<_> = summary
            .settlement
            .iter()
            .map(|s| (s.payer.as_str(), s.payee.as_str(), s.amount.cents()))
            .collect();
        assert_eq!(pairs, vec![("C", "A", 25000), ("D", "A", 20000), ("D", "B", 5000)]);
    }

    #[test]
    fn test_empty_roster_fails() {
        let empty = Roster::default();
        assert_eq!(
            compute(&[rec("A", 100)], &empty),
            Err(SettlementError::EmptyRoster)
        );
    }

    #[test]
    fn test_no_expenses() {
        let roster = roster(&["A", "B"]);
        let summary = compute(&[], &roster).unwrap();
        assert_eq!(summary.grand_total, Money::zero());
        assert_eq!(summary.average, Money::zero());
        assert_eq!(summary.balances.len(), 2);
        assert!(summary.is_settled());
    }

    #[test]
    fn test_unlisted_participant_counts_towards_grand_total() {
        let roster = roster(&["A", "B"]);
        let expenses = vec![rec("A", 1000), rec("Z", 2000), rec("Z", 1000)];

        let summary = compute(&expenses, &roster).unwrap();

        let labels: Vec<_> = summary.balances.iter().map(|b| b.participant.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(summary.unlisted.get("Z"), Some(&Money::from_cents(3000)));
        assert_eq!(summary.totals().get("Z"), Some(&Money::from_cents(3000)));

        assert_eq!(summary.grand_total, Money::from_cents(4000));
        assert_eq!(summary.average, Money::from_cents(2000));
        assert_eq!(summary.deviation_of("A"), Some(Money::from_cents(-1000)));
        assert_eq!(summary.deviation_of("B"), Some(Money::from_cents(-2000)));
        assert_eq!(summary.deviation_sum(), Money::from_cents(-3000));

        // nobody on the roster is owed anything
        assert!(summary.is_settled());
    }

    #[test]
    fn test_rounding_keeps_deviations_balanced() {
        let roster = roster(&["A", "B", "C"]);
        // 100.00 split three ways
        let summary = compute(&[rec("A", 10000)], &roster).unwrap();

        assert_eq!(summary.average, Money::from_cents(3333));
        assert_eq!(summary.deviation_of("A"), Some(Money::from_cents(6667)));
        assert_eq!(summary.deviation_of("B"), Some(Money::from_cents(-3333)));
        assert_eq!(summary.deviation_of("C"), Some(Money::from_cents(-3333)));
        assert!(summary.deviation_sum().abs().cents() <= 1);

        let remaining = apply(&summary);
        assert!(remaining.values().all(|m| m.abs().cents() <= 1));
        assert!(summary.settlement.iter().all(|s| s.amount.is_positive()));
    }

    #[test]
    fn test_settlement_zeroes_every_deviation() {
        let roster = roster(&["Akash", "Suman", "Rohit", "Palash"]);
        let expenses = vec![
            rec("Akash", 123456),
            rec("Suman", 7890),
            rec("Akash", 4500),
            rec("Palash", 99999),
        ];

        let summary = compute(&expenses, &roster).unwrap();
        let remaining = apply(&summary);

        assert!(remaining.values().all(|m| m.abs().cents() <= 2));
        assert!(summary.settlement.iter().all(|s| s.payer != s.payee));
        assert!(summary.settlement.len() <= 3);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let roster = roster(&["A", "B", "C"]);
        let expenses = vec![rec("A", 1000), rec("B", 2000), rec("C", 3100)];
        assert_eq!(
            compute(&expenses, &roster).unwrap(),
            compute(&expenses, &roster).unwrap()
        );
    }
}
