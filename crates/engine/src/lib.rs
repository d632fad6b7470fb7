//! Monthly financial map engine for the conferences of a charitable society.
//!
//! The engine turns a conference's dated, categorized cash transactions for
//! one month into the 30 lines of the statutory monthly report ("Mapa
//! Mensal"):
//!
//! - [`categories`] holds the fixed catalog of report lines;
//! - [`compute_monthly_map`] sums entries into their lines and derives the
//!   subtotals, the tithe, the closing balance and the reconciliation total;
//! - [`Engine`] stores transactions in SQLite through sea-orm and serves them
//!   per period via [`TransactionStore`];
//! - [`MonthlyReport`] packages the lines with the hand-entered header and
//!   footer data for a report renderer.

pub use error::{EngineError, MapError};
pub use money::MoneyCents;
pub use monthly_map::{MapInputs, MapResult, TITHE_PERCENT, compute_monthly_map};
pub use ops::{Engine, EngineBuilder};
pub use period::Period;
pub use report::{Headcounts, MonthlyReport, ReportCell, ReportHeader, ReportRow, ReportSupplement};
pub use store::{MemoryStore, TransactionStore, load_monthly_map};
pub use transactions::{NewTransaction, Transaction, TransactionKind};

pub mod categories;
mod error;
mod money;
mod monthly_map;
mod ops;
mod period;
mod report;
mod store;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
