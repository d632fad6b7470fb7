//! Input table for the fixed-layout monthly report.
//!
//! The renderer itself lives outside the engine. It receives a
//! [`MonthlyReport`]: the computed lines plus the header and footer data that
//! are entered by hand for each report and never derived from the ledger.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, MapResult, MoneyCents, Period, ResultEngine,
    categories::{self, LineId},
};

/// Rows of the two-column layout; row `i` shows line `i` beside line `i + 15`.
pub const ROWS: u8 = 15;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub conference_name: String,
    pub conference_code: Option<String>,
    pub particular_council: Option<String>,
    pub central_council: Option<String>,
    pub metropolitan_council: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headcounts {
    pub active_members: u32,
    pub confrades: u32,
    pub consocias: u32,
    pub aspirantes: u32,
    pub auxiliares: u32,
    pub families_assisted: u32,
    pub people_assisted: u32,
}

/// Footer statistics of the report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSupplement {
    pub food_kg: f64,
    pub special_works_count: u32,
    pub people_attended_special_works: u32,
    pub special_works_expenses: MoneyCents,
    pub construction_reform: String,
    pub headcounts: Headcounts,
}

impl ReportSupplement {
    pub fn validate(&self) -> ResultEngine<()> {
        if !self.food_kg.is_finite() || self.food_kg < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "food donated must be a non-negative number of kg, got {}",
                self.food_kg
            )));
        }
        if self.special_works_expenses.is_negative() {
            return Err(EngineError::InvalidInput(
                "special works expenses must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReportCell {
    pub id: LineId,
    pub label: &'static str,
    pub value: MoneyCents,
    pub emphasized: bool,
    /// Plain lines are left blank when zero; totals are always printed.
    pub show_value: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub receipts: ReportCell,
    pub payments: ReportCell,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub header: ReportHeader,
    pub period: Period,
    pub lines: MapResult,
    pub supplement: ReportSupplement,
}

impl MonthlyReport {
    pub fn new(
        header: ReportHeader,
        period: Period,
        lines: MapResult,
        supplement: ReportSupplement,
    ) -> ResultEngine<Self> {
        if header.conference_name.trim().is_empty() {
            return Err(EngineError::InvalidInput(
                "conference name must not be empty".to_string(),
            ));
        }
        supplement.validate()?;
        Ok(Self {
            header,
            period,
            lines,
            supplement,
        })
    }

    fn cell(&self, id: LineId) -> ReportCell {
        let line = categories::get(id);
        let value = self.lines.get(id);
        let emphasized = categories::emphasized(id);
        ReportCell {
            id,
            label: line.label,
            value,
            emphasized,
            show_value: emphasized || !value.is_zero(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = ReportRow> + '_ {
        (1..=ROWS).map(|i| ReportRow {
            receipts: self.cell(LineId::of(i)),
            payments: self.cell(LineId::of(i + ROWS)),
        })
    }

    /// File name without extension, e.g. `Mapa_Sao_Vicente_3_2026`.
    pub fn file_stem(&self) -> String {
        let name = self
            .header
            .conference_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("Mapa_{name}_{}_{}", self.period.month(), self.period.year())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::{MapInputs, Transaction, TransactionKind, compute_monthly_map};

    fn report(opening_balance: f64) -> MonthlyReport {
        let period = Period::new(3, 2026).unwrap();
        let lines = compute_monthly_map(&MapInputs {
            conference_id: "c1".to_string(),
            period,
            transactions: vec![Transaction {
                id: Uuid::new_v4(),
                conference_id: "c1".to_string(),
                occurred_on: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
                kind: TransactionKind::Expense,
                category_id: 16,
                description: "Cestas".to_string(),
                value: 120.0,
            }],
            opening_balance,
        })
        .unwrap();
        let header = ReportHeader {
            conference_name: "São  Vicente de Paulo".to_string(),
            ..Default::default()
        };
        MonthlyReport::new(header, period, lines, ReportSupplement::default()).unwrap()
    }

    #[test]
    fn rows_pair_receipts_with_payments() {
        let report = report(1000.0);
        let rows: Vec<ReportRow> = report.rows().collect();
        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].receipts.id.get(), 1);
        assert_eq!(rows[0].payments.id.get(), 16);
        assert_eq!(rows[14].receipts.id.get(), 15);
        assert_eq!(rows[14].payments.id.get(), 30);
    }

    #[test]
    fn zero_totals_are_shown_but_zero_entries_are_blank() {
        let report = report(1000.0);
        let rows: Vec<ReportRow> = report.rows().collect();
        // Line 1 is zero and plain, line 6 is zero but a subtotal.
        assert!(!rows[0].receipts.show_value);
        assert!(rows[5].receipts.show_value);
        assert!(rows[5].receipts.emphasized);
        // Line 16 carries a value.
        assert!(rows[0].payments.show_value);
        assert_eq!(rows[0].payments.value, MoneyCents::new(12_000));
    }

    #[test]
    fn file_stem_joins_name_words() {
        assert_eq!(report(0.0).file_stem(), "Mapa_São_Vicente_de_Paulo_3_2026");
    }

    #[test]
    fn supplement_is_validated() {
        let period = Period::new(3, 2026).unwrap();
        let lines = report(0.0).lines;
        let header = ReportHeader {
            conference_name: "Conferência".to_string(),
            ..Default::default()
        };
        let supplement = ReportSupplement {
            food_kg: -1.0,
            ..Default::default()
        };
        assert!(MonthlyReport::new(header.clone(), period, lines, supplement).is_err());
        assert!(
            MonthlyReport::new(ReportHeader::default(), period, lines, ReportSupplement::default())
                .is_err()
        );
        assert!(MonthlyReport::new(header, period, lines, ReportSupplement::default()).is_ok());
    }
}
