//! Monthly map ("Mapa Mensal") computation.
//!
//! Turns one period's transactions of one conference plus the manually
//! supplied opening balance into the 30 values of the statutory report.
//! The computation is pure: it does no I/O and either yields every line or
//! fails on the first invalid input.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::{
    MapError, MoneyCents, Period, Transaction,
    categories::{self, LINE_COUNT, LineId, LineRole},
};

/// Tithe owed to the particular council, in percent of line 6.
pub const TITHE_PERCENT: i64 = 10;

/// Everything the computation needs for one conference and one month.
#[derive(Clone, Debug, PartialEq)]
pub struct MapInputs {
    pub conference_id: String,
    pub period: Period,
    pub transactions: Vec<Transaction>,
    /// Line 14. May be negative when a deficit is carried forward.
    pub opening_balance: f64,
}

/// The 30 computed lines, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapResult {
    lines: [MoneyCents; LINE_COUNT],
}

impl MapResult {
    pub fn get(&self, id: LineId) -> MoneyCents {
        self.lines[id.index()]
    }

    /// Value of line `id`; `None` outside `1..=30`.
    pub fn line(&self, id: u8) -> Option<MoneyCents> {
        LineId::new(i32::from(id)).map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineId, MoneyCents)> + '_ {
        categories::all_ids().map(|id| (id, self.get(id)))
    }

    /// Line 30 must equal line 15. A mismatch means the arithmetic went wrong.
    pub fn is_reconciled(&self) -> bool {
        self.get(line::TOTAL_PAYMENTS_AND_CLOSING) == self.get(line::TOTAL_INFLOW)
    }

    fn sum(&self, ids: impl IntoIterator<Item = u8>) -> Option<MoneyCents> {
        ids.into_iter()
            .try_fold(MoneyCents::ZERO, |acc, id| acc.checked_add(self.lines[usize::from(id - 1)]))
    }

    fn set(&mut self, id: LineId, value: MoneyCents) {
        self.lines[id.index()] = value;
    }
}

impl Serialize for MapResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let lines: BTreeMap<u8, i64> = self.iter().map(|(id, v)| (id.get(), v.cents())).collect();
        lines.serialize(serializer)
    }
}

/// Ids the derivation steps refer to.
mod line {
    use crate::categories::LineId;

    pub const TITHE_BASE: LineId = LineId::of(6);
    pub const TOTAL_RECEIPTS: LineId = LineId::of(13);
    pub const OPENING_BALANCE: LineId = LineId::of(14);
    pub const TOTAL_INFLOW: LineId = LineId::of(15);
    pub const TITHE: LineId = LineId::of(24);
    pub const TOTAL_PAYMENTS: LineId = LineId::of(28);
    pub const CLOSING_BALANCE: LineId = LineId::of(29);
    pub const TOTAL_PAYMENTS_AND_CLOSING: LineId = LineId::of(30);
}

/// A derived total left the representable range; no single entry is at fault.
fn overflow() -> MapError {
    MapError::InvalidAmount {
        transaction_id: None,
        reason: "derived total too large".to_string(),
    }
}

/// Checks one transaction against the catalog and the requested period and
/// returns the line and amount it contributes.
fn validate(inputs: &MapInputs, tx: &Transaction) -> Result<(LineId, MoneyCents), MapError> {
    let invalid_category = || MapError::InvalidCategory {
        transaction_id: tx.id,
        category_id: tx.category_id,
    };

    if tx.conference_id != inputs.conference_id.trim() || !inputs.period.contains(tx.occurred_on) {
        return Err(MapError::OutsidePeriod {
            transaction_id: tx.id,
        });
    }

    let id = LineId::new(tx.category_id).ok_or_else(invalid_category)?;
    let line = categories::get(id);
    let LineRole::Summable(kind) = line.role else {
        return Err(invalid_category());
    };
    if kind != tx.kind {
        return Err(MapError::KindMismatch {
            transaction_id: tx.id,
            category_id: tx.category_id,
            declared: tx.kind,
            expected: line.kind(),
        });
    }

    let amount = amount_of(tx.id, tx.value)?;
    Ok((id, amount))
}

fn amount_of(transaction_id: Uuid, value: f64) -> Result<MoneyCents, MapError> {
    let reject = |reason: String| MapError::InvalidAmount {
        transaction_id: Some(transaction_id),
        reason,
    };
    if !value.is_finite() {
        return Err(reject(format!("value is not a finite number: {value}")));
    }
    if value <= 0.0 {
        return Err(reject(format!("value must be positive, got {value}")));
    }
    match MoneyCents::try_from_f64(value) {
        Some(amount) if amount.is_positive() => Ok(amount),
        Some(_) => Err(reject(format!("value rounds to zero cents: {value}"))),
        None => Err(reject(format!("value too large: {value}"))),
    }
}

/// Computes the monthly map.
///
/// Derived lines are filled in dependency order: 6, 13, 14, 15, 24, 28, 29,
/// 30. Line 30 is computed as 28 + 29 rather than copied from 15, so
/// [`MapResult::is_reconciled`] actually checks something.
pub fn compute_monthly_map(inputs: &MapInputs) -> Result<MapResult, MapError> {
    tracing::debug!(
        conference_id = %inputs.conference_id,
        month = inputs.period.month(),
        year = inputs.period.year(),
        transactions = inputs.transactions.len(),
        "computing monthly map"
    );

    let opening_balance =
        MoneyCents::try_from_f64(inputs.opening_balance).ok_or_else(|| MapError::InvalidAmount {
            transaction_id: None,
            reason: format!("opening balance is not a valid amount: {}", inputs.opening_balance),
        })?;

    let mut result = MapResult {
        lines: [MoneyCents::ZERO; LINE_COUNT],
    };

    for tx in &inputs.transactions {
        let (id, amount) = validate(inputs, tx).inspect_err(|err| {
            tracing::warn!(transaction_id = %tx.id, "monthly map rejected: {err}");
        })?;
        let total = result
            .get(id)
            .checked_add(amount)
            .ok_or_else(|| MapError::InvalidAmount {
                transaction_id: Some(tx.id),
                reason: format!("line {id} total too large"),
            })?;
        result.set(id, total);
    }

    let tithe_base = result.sum(1..=5).ok_or_else(overflow)?;
    result.set(line::TITHE_BASE, tithe_base);

    let total_receipts = result.sum(6..=12).ok_or_else(overflow)?;
    result.set(line::TOTAL_RECEIPTS, total_receipts);

    result.set(line::OPENING_BALANCE, opening_balance);

    let total_inflow = total_receipts
        .checked_add(opening_balance)
        .ok_or_else(overflow)?;
    result.set(line::TOTAL_INFLOW, total_inflow);

    let tithe = tithe_base
        .percent_rounded(TITHE_PERCENT)
        .ok_or_else(overflow)?;
    result.set(line::TITHE, tithe);

    let total_payments = result.sum(16..=27).ok_or_else(overflow)?;
    result.set(line::TOTAL_PAYMENTS, total_payments);

    let closing_balance = total_inflow
        .checked_sub(total_payments)
        .ok_or_else(overflow)?;
    result.set(line::CLOSING_BALANCE, closing_balance);

    let reconciliation = total_payments
        .checked_add(closing_balance)
        .ok_or_else(overflow)?;
    result.set(line::TOTAL_PAYMENTS_AND_CLOSING, reconciliation);

    debug_assert!(result.is_reconciled());
    tracing::debug!(
        conference_id = %inputs.conference_id,
        closing_balance = closing_balance.cents(),
        "monthly map computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::TransactionKind;

    fn march() -> Period {
        Period::new(3, 2026).unwrap()
    }

    fn tx(category_id: i32, value: f64) -> Transaction {
        let kind = match category_id {
            16..=30 => TransactionKind::Expense,
            _ => TransactionKind::Income,
        };
        Transaction {
            id: Uuid::new_v4(),
            conference_id: "c1".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            kind,
            category_id,
            description: "entry".to_string(),
            value,
        }
    }

    fn inputs(transactions: Vec<Transaction>, opening_balance: f64) -> MapInputs {
        MapInputs {
            conference_id: "c1".to_string(),
            period: march(),
            transactions,
            opening_balance,
        }
    }

    #[test]
    fn tithe_is_overwritten_never_summed() {
        // Entries cannot reach line 24, so the tithe is always the derived value.
        let result =
            compute_monthly_map(&inputs(vec![tx(1, 123.45), tx(2, 0.05)], 0.0)).unwrap();
        assert_eq!(result.get(line::TITHE_BASE), MoneyCents::new(12_350));
        assert_eq!(result.get(line::TITHE), MoneyCents::new(1_235));
    }

    #[test]
    fn tithe_rounds_half_away_from_zero() {
        let result = compute_monthly_map(&inputs(vec![tx(3, 0.05)], 0.0)).unwrap();
        assert_eq!(result.get(line::TITHE), MoneyCents::new(1));
    }

    #[test]
    fn lines_outside_tithe_base_do_not_affect_tithe() {
        let result = compute_monthly_map(&inputs(vec![tx(7, 1000.0), tx(12, 10.0)], 0.0)).unwrap();
        assert_eq!(result.get(line::TITHE_BASE), MoneyCents::ZERO);
        assert_eq!(result.get(line::TITHE), MoneyCents::ZERO);
        assert_eq!(result.get(line::TOTAL_RECEIPTS), MoneyCents::new(101_000));
    }

    #[test]
    fn foreign_transactions_are_rejected() {
        let mut other_conference = tx(1, 10.0);
        other_conference.conference_id = "c2".to_string();
        let err = compute_monthly_map(&inputs(vec![other_conference.clone()], 0.0)).unwrap_err();
        assert_eq!(
            err,
            MapError::OutsidePeriod {
                transaction_id: other_conference.id
            }
        );

        let mut april = tx(1, 10.0);
        april.occurred_on = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let err = compute_monthly_map(&inputs(vec![april], 0.0)).unwrap_err();
        assert!(matches!(err, MapError::OutsidePeriod { .. }));
    }

    #[test]
    fn line_overflow_names_the_transaction_that_tipped_it() {
        let first = tx(1, 9.0e16);
        let second = tx(1, 9.0e16);
        let err = compute_monthly_map(&inputs(vec![first, second.clone()], 0.0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidAmount { .. }));
        assert_eq!(err.transaction_id(), Some(second.id));
        assert!(err.to_string().contains(&second.id.to_string()));
    }

    #[test]
    fn derived_total_overflow_blames_no_entry() {
        let err = compute_monthly_map(&inputs(vec![tx(1, 9.0e16), tx(2, 9.0e16)], 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidAmount {
                transaction_id: None,
                reason: "derived total too large".to_string(),
            }
        );
        assert!(!err.to_string().contains("opening balance"));
    }

    #[test]
    fn conference_id_is_compared_trimmed() {
        let mut inputs = inputs(vec![tx(1, 10.0)], 0.0);
        inputs.conference_id = " c1 ".to_string();
        let result = compute_monthly_map(&inputs).unwrap();
        assert_eq!(result.get(line::TITHE_BASE), MoneyCents::new(1_000));
    }

    #[test]
    fn serializes_as_id_to_cents() {
        let result = compute_monthly_map(&inputs(vec![tx(1, 500.0)], 0.0)).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["1"], 50_000);
        assert_eq!(json["24"], 5_000);
        assert_eq!(json.as_object().unwrap().len(), 30);
    }
}
