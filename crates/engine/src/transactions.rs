//! Cash transactions of a conference.
//!
//! A `Transaction` is a single dated entry filed under one line of the
//! monthly map. The engine only ever reads them for aggregation; writing
//! goes through [`NewTransaction`], which applies the same category rules
//! an entry form does.

use std::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MapError, MoneyCents, ResultEngine, categories};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidInput(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// A transaction as held by the transaction store.
///
/// `category_id` and `value` are kept raw: the store may contain rows that
/// the aggregator has to reject (unknown or derived categories, non-positive
/// amounts), and it must see them to do so.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub conference_id: String,
    pub occurred_on: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: i32,
    pub description: String,
    pub value: f64,
}

/// Input of the entry path. The kind is implied by the category.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub conference_id: String,
    pub occurred_on: NaiveDate,
    pub category_id: i32,
    pub description: String,
    pub value: f64,
}

impl NewTransaction {
    /// Validates the entry and turns it into a storable transaction with a
    /// fresh id.
    pub fn into_transaction(self) -> ResultEngine<Transaction> {
        let id = Uuid::new_v4();

        let conference_id = self.conference_id.trim();
        if conference_id.is_empty() {
            return Err(EngineError::InvalidInput(
                "conference id must not be empty".to_string(),
            ));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(EngineError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }

        let kind = match categories::line_by_id(self.category_id).map(|line| line.role) {
            Some(categories::LineRole::Summable(kind)) => kind,
            _ => {
                return Err(MapError::InvalidCategory {
                    transaction_id: id,
                    category_id: self.category_id,
                }
                .into());
            }
        };

        if !MoneyCents::try_from_f64(self.value).is_some_and(MoneyCents::is_positive) {
            return Err(MapError::InvalidAmount {
                transaction_id: Some(id),
                reason: format!("value must be a positive amount, got {}", self.value),
            }
            .into());
        }

        Ok(Transaction {
            id,
            conference_id: conference_id.to_string(),
            occurred_on: self.occurred_on,
            kind,
            category_id: self.category_id,
            description: description.to_string(),
            value: self.value,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "financial_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub conference_id: String,
    pub occurred_on: Date,
    pub kind: String,
    pub category_id: i32,
    pub description: String,
    pub value: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            conference_id: ActiveValue::Set(tx.conference_id.clone()),
            occurred_on: ActiveValue::Set(tx.occurred_on),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category_id: ActiveValue::Set(tx.category_id),
            description: ActiveValue::Set(tx.description.clone()),
            value: ActiveValue::Set(tx.value),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| {
                EngineError::InvalidInput(format!("invalid transaction id: {}", model.id))
            })?,
            conference_id: model.conference_id,
            occurred_on: model.occurred_on,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category_id: model.category_id,
            description: model.description,
            value: model.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category_id: i32, value: f64) -> NewTransaction {
        NewTransaction {
            conference_id: "sao-vicente".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            category_id,
            description: "Coleta da reunião".to_string(),
            value,
        }
    }

    #[test]
    fn kind_is_taken_from_category() {
        let income = entry(1, 500.0).into_transaction().unwrap();
        assert_eq!(income.kind, TransactionKind::Income);
        let expense = entry(16, 120.0).into_transaction().unwrap();
        assert_eq!(expense.kind, TransactionKind::Expense);
    }

    #[test]
    fn derived_and_unknown_categories_are_refused() {
        for category_id in [0, 6, 13, 14, 15, 24, 28, 29, 30, 31] {
            let err = entry(category_id, 10.0).into_transaction().unwrap_err();
            assert!(
                matches!(err, EngineError::Map(MapError::InvalidCategory { .. })),
                "category {category_id}: {err}"
            );
        }
    }

    #[test]
    fn amounts_must_be_positive_and_finite() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.001] {
            let err = entry(1, value).into_transaction().unwrap_err();
            assert!(matches!(err, EngineError::Map(MapError::InvalidAmount { .. })));
        }
    }

    #[test]
    fn blank_description_is_refused() {
        let mut new = entry(1, 10.0);
        new.description = "   ".to_string();
        assert_eq!(
            new.into_transaction().unwrap_err(),
            EngineError::InvalidInput("description must not be empty".to_string())
        );
    }

    #[test]
    fn kind_round_trips_through_storage_text() {
        assert_eq!(TransactionKind::try_from("expense").unwrap(), TransactionKind::Expense);
        assert!(TransactionKind::try_from("transfer").is_err());
    }
}
