use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, NewTransaction, Period, ResultEngine, Transaction, TransactionStore, transactions,
};

use super::Engine;

impl Engine {
    /// Validates and stores a new transaction, returning its id.
    pub async fn record_transaction(&self, new: NewTransaction) -> ResultEngine<Uuid> {
        let tx = new.into_transaction()?;
        transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        tracing::info!(
            transaction_id = %tx.id,
            conference_id = %tx.conference_id,
            category_id = tx.category_id,
            "transaction recorded"
        );
        Ok(tx.id)
    }

    /// Returns a single transaction by id.
    pub async fn transaction(&self, id: Uuid) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        Transaction::try_from(model)
    }

    /// Removes a transaction. Maps computed afterwards no longer include it.
    pub async fn delete_transaction(&self, id: Uuid) -> ResultEngine<()> {
        let res = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        tracing::info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }
}

impl TransactionStore for Engine {
    /// Transactions of `conference_id` dated within `period`, oldest first.
    async fn list_transactions(
        &self,
        conference_id: &str,
        period: Period,
    ) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::ConferenceId.eq(conference_id.trim()))
            .filter(transactions::Column::OccurredOn.gte(period.first_day()))
            .filter(transactions::Column::OccurredOn.lt(period.next_first_day()))
            .order_by_asc(transactions::Column::OccurredOn)
            .order_by_asc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }
}
