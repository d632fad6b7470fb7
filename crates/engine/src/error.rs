//! The module contains the errors the engine can throw.
//!
//! Two layers:
//!
//! - [`MapError`] is raised by the pure monthly map computation and by the
//!   category/period validation it relies on. It never touches storage.
//! - [`EngineError`] is raised by the storage-facing [`Engine`] and wraps
//!   [`MapError`] so callers can still tell a validation failure apart from a
//!   database failure.
//!
//!  [`Engine`]: crate::Engine
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::categories::LineKind;
use crate::transactions::TransactionKind;

/// Errors of the monthly map computation.
///
/// Every variant that is caused by a transaction carries its id, so the
/// caller can point the user at the offending row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("transaction {transaction_id}: category {category_id} does not accept entries")]
    InvalidCategory {
        transaction_id: Uuid,
        category_id: i32,
    },
    #[error(
        "transaction {transaction_id}: {declared} entry on category {category_id} ({expected})"
    )]
    KindMismatch {
        transaction_id: Uuid,
        category_id: i32,
        declared: TransactionKind,
        expected: LineKind,
    },
    /// `transaction_id` is `None` when no entry is at fault: the opening
    /// balance itself, or a derived total out of range.
    #[error("invalid amount{}: {reason}", fmt_subject(.transaction_id))]
    InvalidAmount {
        transaction_id: Option<Uuid>,
        reason: String,
    },
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    #[error("transaction {transaction_id} does not belong to the requested conference/period")]
    OutsidePeriod { transaction_id: Uuid },
}

fn fmt_subject(transaction_id: &Option<Uuid>) -> String {
    match transaction_id {
        Some(id) => format!(" in transaction {id}"),
        None => String::new(),
    }
}

impl MapError {
    /// Id of the transaction that caused the failure, if any.
    pub fn transaction_id(&self) -> Option<Uuid> {
        match self {
            Self::InvalidCategory { transaction_id, .. }
            | Self::KindMismatch { transaction_id, .. }
            | Self::OutsidePeriod { transaction_id } => Some(*transaction_id),
            Self::InvalidAmount { transaction_id, .. } => *transaction_id,
            Self::InvalidPeriod(_) => None,
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
