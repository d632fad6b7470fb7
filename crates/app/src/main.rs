use std::error::Error;

use clap::Parser;
use engine::{
    Engine, MonthlyReport, NewTransaction, Period, ReportHeader, TransactionKind, TransactionStore,
    categories, load_monthly_map,
};
use migration::{Migrator, MigratorTrait};
use settings::Database;

use crate::cli::{Cli, Command};

mod cli;
mod render;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "mapa={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let db = parse_database(&settings.database).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Add(args) => {
            let id = engine
                .record_transaction(NewTransaction {
                    conference_id: args.conference,
                    occurred_on: args.date,
                    category_id: args.category,
                    description: args.description,
                    value: args.value.to_f64(),
                })
                .await?;
            println!("{id}");
        }
        Command::List(args) => {
            let period = Period::new(args.month, args.year)?;
            let transactions = engine.list_transactions(&args.conference, period).await?;
            if transactions.is_empty() {
                println!("No transactions for this period.");
            } else {
                print!("{}", render::transactions(&transactions)?);
            }
        }
        Command::Remove { id } => {
            engine.delete_transaction(id).await?;
        }
        Command::Map(args) => {
            let period = Period::new(args.period.month, args.period.year)?;
            let lines = match load_monthly_map(
                &engine,
                &args.period.conference,
                period,
                args.opening_balance.to_f64(),
            )
            .await
            {
                Ok(lines) => lines,
                Err(err) => {
                    tracing::error!("monthly map not generated: {err}");
                    return Err(err.into());
                }
            };

            let header = ReportHeader {
                conference_name: args.name.unwrap_or_else(|| args.period.conference.clone()),
                conference_code: settings.report.conference_code,
                particular_council: settings.report.particular_council,
                central_council: settings.report.central_council,
                metropolitan_council: settings.report.metropolitan_council,
            };
            let report = MonthlyReport::new(header, period, lines, args.supplement.into())?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                tracing::info!(file = %report.file_stem(), "rendering monthly map");
                print!("{}", render::report(&report)?);
            }
        }
        Command::Categories { kind } => {
            let kinds = match kind {
                Some(kind) => vec![TransactionKind::from(kind)],
                None => vec![TransactionKind::Income, TransactionKind::Expense],
            };
            for kind in kinds {
                for line in categories::entry_categories(kind) {
                    println!("{}  {:<7}  {}", line.id, kind, line.label);
                }
            }
        }
    }

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
