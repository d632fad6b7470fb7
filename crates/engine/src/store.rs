//! Read access to stored transactions, and the glue that feeds them to the
//! monthly map computation.

use std::future::Future;

use crate::{
    MapInputs, MapResult, Period, ResultEngine, Transaction, monthly_map::compute_monthly_map,
};

/// Source of a conference's transactions.
///
/// Implementations only read; the computation works on whatever snapshot
/// they return. `conference_id` is matched trimmed, the way entries are
/// stored, and results are ordered by date, then id.
pub trait TransactionStore {
    fn list_transactions(
        &self,
        conference_id: &str,
        period: Period,
    ) -> impl Future<Output = ResultEngine<Vec<Transaction>>> + Send;
}

/// Transactions already held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn push(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }
}

impl TransactionStore for MemoryStore {
    async fn list_transactions(
        &self,
        conference_id: &str,
        period: Period,
    ) -> ResultEngine<Vec<Transaction>> {
        let conference_id = conference_id.trim();
        let mut selected: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.conference_id == conference_id && period.contains(tx.occurred_on))
            .cloned()
            .collect();
        selected.sort_by(|a, b| (a.occurred_on, a.id).cmp(&(b.occurred_on, b.id)));
        Ok(selected)
    }
}

/// Fetches the period's transactions from `store` and computes the map.
///
/// A period without transactions is not an error: it yields a map whose only
/// non-zero lines come from the opening balance.
pub async fn load_monthly_map<S>(
    store: &S,
    conference_id: &str,
    period: Period,
    opening_balance: f64,
) -> ResultEngine<MapResult>
where
    S: TransactionStore + Sync,
{
    let conference_id = conference_id.trim();
    let transactions = store.list_transactions(conference_id, period).await?;
    if transactions.is_empty() {
        tracing::info!(
            conference_id,
            month = period.month(),
            year = period.year(),
            "no transactions in period"
        );
    }

    let inputs = MapInputs {
        conference_id: conference_id.to_string(),
        period,
        transactions,
        opening_balance,
    };
    Ok(compute_monthly_map(&inputs)?)
}
