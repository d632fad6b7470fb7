use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Headcounts, MoneyCents, ReportSupplement, TransactionKind};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "mapa")]
#[command(about = "Conference ledger and monthly financial map (Mapa Mensal)")]
pub struct Cli {
    /// Settings file, without extension (also read from `MAPA_CONFIG`).
    #[arg(long, env = "MAPA_CONFIG", default_value = "settings")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a transaction. Its kind follows from the category.
    Add(AddArgs),
    /// List the transactions of a conference for one month.
    List(PeriodArgs),
    /// Delete a transaction by id.
    Remove { id: Uuid },
    /// Compute and print the monthly map.
    Map(MapArgs),
    /// Show the categories that accept entries.
    Categories {
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Income => TransactionKind::Income,
            Kind::Expense => TransactionKind::Expense,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub conference: String,
    /// Date of the transaction (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// Report line the transaction is filed under.
    #[arg(long)]
    pub category: i32,
    /// Amount, `.` or `,` as decimal separator.
    #[arg(long, value_parser = parse_money)]
    pub value: MoneyCents,
    #[arg(long)]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct PeriodArgs {
    #[arg(long)]
    pub conference: String,
    #[arg(long)]
    pub month: u32,
    #[arg(long)]
    pub year: i32,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Balance at the start of the month (line 14); may be negative.
    #[arg(long, value_parser = parse_money, allow_hyphen_values = true, default_value = "0")]
    pub opening_balance: MoneyCents,

    /// Conference name for the report header (defaults to the conference id).
    #[arg(long)]
    pub name: Option<String>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub supplement: SupplementArgs,
}

/// Footer data of the report, entered by hand.
#[derive(Args, Debug)]
pub struct SupplementArgs {
    #[arg(long, default_value_t = 0.0)]
    pub food_kg: f64,
    #[arg(long, default_value_t = 0)]
    pub special_works: u32,
    #[arg(long, default_value_t = 0)]
    pub people_special_works: u32,
    #[arg(long, value_parser = parse_money, default_value = "0")]
    pub special_works_expenses: MoneyCents,
    #[arg(long, default_value = "")]
    pub construction_reform: String,
    #[arg(long, default_value_t = 0)]
    pub active_members: u32,
    #[arg(long, default_value_t = 0)]
    pub confrades: u32,
    #[arg(long, default_value_t = 0)]
    pub consocias: u32,
    #[arg(long, default_value_t = 0)]
    pub aspirantes: u32,
    #[arg(long, default_value_t = 0)]
    pub auxiliares: u32,
    #[arg(long, default_value_t = 0)]
    pub families_assisted: u32,
    #[arg(long, default_value_t = 0)]
    pub people_assisted: u32,
}

impl From<SupplementArgs> for ReportSupplement {
    fn from(args: SupplementArgs) -> Self {
        Self {
            food_kg: args.food_kg,
            special_works_count: args.special_works,
            people_attended_special_works: args.people_special_works,
            special_works_expenses: args.special_works_expenses,
            construction_reform: args.construction_reform,
            headcounts: Headcounts {
                active_members: args.active_members,
                confrades: args.confrades,
                consocias: args.consocias,
                aspirantes: args.aspirantes,
                auxiliares: args.auxiliares,
                families_assisted: args.families_assisted,
                people_assisted: args.people_assisted,
            },
        }
    }
}

fn parse_money(raw: &str) -> Result<MoneyCents, String> {
    raw.parse::<MoneyCents>().map_err(|err| err.to_string())
}
