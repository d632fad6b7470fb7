//! Ledger schema: one row per cash transaction of a conference.
//!
//! Amounts are stored as plain numbers, the way the data-entry side records
//! them; conversion to cents happens when a monthly map is computed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum FinancialTransactions {
    Table,
    Id,
    ConferenceId,
    OccurredOn,
    Kind,
    CategoryId,
    Description,
    Value,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinancialTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinancialTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::ConferenceId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::OccurredOn)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialTransactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(FinancialTransactions::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialTransactions::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialTransactions::Value).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Monthly maps read one conference and one month at a time.
        manager
            .create_index(
                Index::create()
                    .name("idx-financial_transactions-conference_id-occurred_on")
                    .table(FinancialTransactions::Table)
                    .col(FinancialTransactions::ConferenceId)
                    .col(FinancialTransactions::OccurredOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinancialTransactions::Table).to_owned())
            .await
    }
}
