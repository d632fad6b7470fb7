//! The fixed catalog of the 30 lines of the monthly map.
//!
//! Lines 1..=15 are the receipts column, 16..=30 the payments column. Each
//! line either accepts entries of one [`EntryKind`], is computed from other
//! lines, or (line 14 only) is injected from outside as the opening balance.
//!
//! The aggregation formulas in [`crate::monthly_map`] refer to the ids below
//! by position, so the two must always change together.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TransactionKind;

/// Number of lines in the report.
pub const LINE_COUNT: usize = 30;

/// Kind of entry a summable line accepts.
pub type EntryKind = TransactionKind;

/// A valid report line id, `1..=30`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct LineId(u8);

impl LineId {
    pub fn new(id: i32) -> Option<Self> {
        u8::try_from(id)
            .ok()
            .filter(|id| (1..=LINE_COUNT as u8).contains(id))
            .map(Self)
    }

    /// Callers inside the crate only use literal ids from the catalog.
    pub(crate) const fn of(id: u8) -> Self {
        Self(id)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in the canonical ordering.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<i32> for LineId {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("line id out of range: {value}"))
    }
}

impl From<LineId> for i32 {
    fn from(value: LineId) -> Self {
        i32::from(value.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// How the value of a line comes to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRole {
    /// Sum of the transactions of the given kind filed under the line.
    Summable(EntryKind),
    /// Derived from other lines by the aggregator.
    Computed,
    /// Supplied from outside the ledger (the opening balance).
    ExternalInput,
}

impl LineRole {
    pub fn is_derived(self) -> bool {
        !matches!(self, Self::Summable(_))
    }
}

/// Coarse classification returned by [`line_kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Income,
    Expense,
    Derived,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Income => "income line",
            Self::Expense => "expense line",
            Self::Derived => "derived line",
        })
    }
}

/// Column of the report a line is printed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Receipts,
    Payments,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryLine {
    pub id: LineId,
    pub role: LineRole,
    pub label: &'static str,
}

impl CategoryLine {
    pub fn kind(&self) -> LineKind {
        match self.role {
            LineRole::Summable(TransactionKind::Income) => LineKind::Income,
            LineRole::Summable(TransactionKind::Expense) => LineKind::Expense,
            LineRole::Computed | LineRole::ExternalInput => LineKind::Derived,
        }
    }

    pub fn side(&self) -> Side {
        if self.id.get() <= 15 {
            Side::Receipts
        } else {
            Side::Payments
        }
    }
}

const fn line(id: u8, role: LineRole, label: &'static str) -> CategoryLine {
    CategoryLine {
        id: LineId::of(id),
        role,
        label,
    }
}

const INCOME: LineRole = LineRole::Summable(TransactionKind::Income);
const EXPENSE: LineRole = LineRole::Summable(TransactionKind::Expense);
const COMPUTED: LineRole = LineRole::Computed;

/// The catalog, in canonical order (`CATALOG[i].id == i + 1`).
pub static CATALOG: [CategoryLine; LINE_COUNT] = [
    line(1, INCOME, "Coleta nas reuniões durante o mês"),
    line(2, INCOME, "Subscritores e Benfeitores"),
    line(3, INCOME, "Doações Recebidas"),
    line(4, INCOME, "Receitas Líquidas com Eventos (Rifa, Bazar, almoços etc.)"),
    line(5, INCOME, "Outras Receitas Sujeitas a Décimas"),
    line(6, COMPUTED, "Subtotal (Valor base para cálculo da Décima do mês)"),
    line(7, INCOME, "Subvenções Oficiais"),
    line(8, INCOME, "Contribuição da Solidariedade e Coleta de Ozanam"),
    line(9, INCOME, "União Fraternal (Contribuições Recebidas)"),
    line(10, INCOME, "Outras Receitas não sujeitas a décima"),
    line(11, INCOME, "Receitas Diversas"),
    line(12, INCOME, "Recebimento de Contribuições para Repasses"),
    line(13, COMPUTED, "Total dos Recebimentos (Somar da linha 06 a linha 12)"),
    line(
        14,
        LineRole::ExternalInput,
        "Saldo no início do mês (Igual ao Saldo final do mês anterior)",
    ),
    line(15, COMPUTED, "Total Recebimentos + Saldo início do mês"),
    line(16, EXPENSE, "Despesas com Cestas Básicas (alimentos, higiene, etc.)"),
    line(17, EXPENSE, "Despesas com Moradias dos Assistidos (Construção, Aluguel)"),
    line(18, EXPENSE, "Pagamentos de contas Assistidos (água, luz, gás, etc.)"),
    line(19, EXPENSE, "Despesas com Obras Especiais"),
    line(20, EXPENSE, "União Fraternal (Contribuições a Unidades Vicentinas)"),
    line(21, EXPENSE, "Outras despesas"),
    line(22, EXPENSE, "Despesas com Subvenções"),
    line(23, EXPENSE, "Despesas Administrativas e de Consumo da Conferência"),
    line(24, COMPUTED, "Décima paga ao Conselho Particular (10% da linha 6)"),
    line(25, EXPENSE, "Outras saídas"),
    line(26, EXPENSE, "Repasses da Contribuição da Solidariedade e Ozanam"),
    line(27, EXPENSE, "Repasses de contribuições Recebidas"),
    line(28, COMPUTED, "Total dos Pagamentos (Somar da linha 16 a linha 27)"),
    line(29, COMPUTED, "Saldo no final do mês (linha 15 - linha 28)"),
    line(30, COMPUTED, "Total Pagamentos + Saldo Final"),
];

/// Looks a line up by raw id. `None` outside `1..=30`.
pub fn line_by_id(id: i32) -> Option<&'static CategoryLine> {
    LineId::new(id).map(get)
}

pub fn get(id: LineId) -> &'static CategoryLine {
    &CATALOG[id.index()]
}

pub fn line_kind(id: LineId) -> LineKind {
    get(id).kind()
}

/// `true` iff the line accepts raw transaction sums.
pub fn is_summable(id: LineId) -> bool {
    !get(id).role.is_derived()
}

/// All ids in canonical order.
pub fn all_ids() -> impl Iterator<Item = LineId> {
    CATALOG.iter().map(|line| line.id)
}

/// Lines an entry form may offer for a transaction of `kind`.
pub fn entry_categories(kind: EntryKind) -> impl Iterator<Item = &'static CategoryLine> {
    CATALOG
        .iter()
        .filter(move |line| line.role == LineRole::Summable(kind))
}

/// Derived lines are printed emphasized, and shown even when zero.
pub fn emphasized(id: LineId) -> bool {
    get(id).role.is_derived()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DERIVED: [u8; 8] = [6, 13, 14, 15, 24, 28, 29, 30];

    #[test]
    fn catalog_is_contiguous_and_ordered() {
        let ids: Vec<u8> = all_ids().map(LineId::get).collect();
        assert_eq!(ids, (1..=30).collect::<Vec<u8>>());
    }

    #[test]
    fn derived_lines_are_not_summable() {
        for id in all_ids() {
            assert_eq!(
                is_summable(id),
                !DERIVED.contains(&id.get()),
                "line {id} summability"
            );
        }
    }

    #[test]
    fn opening_balance_is_external_input() {
        let line = line_by_id(14).unwrap();
        assert_eq!(line.role, LineRole::ExternalInput);
        assert_eq!(line.kind(), LineKind::Derived);
        assert_eq!(line_by_id(24).unwrap().role, LineRole::Computed);
    }

    #[test]
    fn kinds_partition_the_columns() {
        for line in &CATALOG {
            match (line.side(), line.kind()) {
                (_, LineKind::Derived) => {}
                (Side::Receipts, kind) => assert_eq!(kind, LineKind::Income),
                (Side::Payments, kind) => assert_eq!(kind, LineKind::Expense),
            }
        }
    }

    #[test]
    fn ids_outside_catalog_are_rejected() {
        assert!(LineId::new(0).is_none());
        assert!(LineId::new(31).is_none());
        assert!(LineId::new(-1).is_none());
        assert!(LineId::new(1_000).is_none());
        assert!(line_by_id(30).is_some());
    }

    #[test]
    fn entry_categories_follow_kind() {
        let income: Vec<u8> = entry_categories(TransactionKind::Income)
            .map(|l| l.id.get())
            .collect();
        assert_eq!(income, vec![1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12]);

        let expense: Vec<u8> = entry_categories(TransactionKind::Expense)
            .map(|l| l.id.get())
            .collect();
        assert_eq!(expense, vec![16, 17, 18, 19, 20, 21, 22, 23, 25, 26, 27]);
    }
}
