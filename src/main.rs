use anyhow::{Context, Result};
use budget_ledger::{
    parse_date, report, Category, ChartRenderer, DailySeries, LedgerStore, Prompter, QueryEngine,
    Session, StoreConfig, Transaction, DEFAULT_LEDGER_FILE, VERSION,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "budget-ledger")]
#[command(version = VERSION)]
#[command(about = "Track income and expenses in a CSV ledger", long_about = None)]
struct Args {
    /// Ledger file
    #[arg(short, long, default_value = DEFAULT_LEDGER_FILE, global = true)]
    file: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Budget for the interactive session (skips the budget question)
    #[arg(short, long)]
    budget: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record one transaction
    Add {
        #[arg(short, long)]
        amount: f64,

        /// I, E, Income or Expense
        #[arg(short, long)]
        category: Category,

        /// dd-mm-yyyy, defaults to today
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Transactions between two dates, inclusive
    Query {
        /// dd-mm-yyyy
        start: String,
        /// dd-mm-yyyy
        end: String,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        chart: bool,
    },
    /// Whole-ledger summary
    Summary {
        #[arg(short, long)]
        budget: Option<f64>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        chart: bool,
    },
    /// Delete every transaction, keeping the header
    Reset,
}

/// Command-line dates use the same format as the ledger file
fn parse_date_arg(store: &LedgerStore, value: &str) -> Result<NaiveDate> {
    parse_date(value, &store.config().date_format)
        .with_context(|| format!("Bad date argument '{}'", value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let store = LedgerStore::open(StoreConfig::new(&args.file))
        .with_context(|| format!("Failed to open ledger {}", args.file.display()))?;
    let date_format = store.config().date_format.as_str();

    match args.command {
        None => run_interactive(&store, args.budget)?,
        Some(Command::Add {
            amount,
            category,
            date,
            description,
        }) => {
            let date = match date {
                Some(value) => parse_date_arg(&store, &value)?,
                None => Local::now().date_naive(),
            };
            let transaction = Transaction::new(date, amount, category, description)?;
            store
                .append(&transaction)
                .context("Failed to append transaction")?;
            println!("Entry added successfully");
        }
        Some(Command::Query {
            start,
            end,
            json,
            chart,
        }) => {
            let start = parse_date_arg(&store, &start)?;
            let end = parse_date_arg(&store, &end)?;
            let result = QueryEngine::new(&store).query(start, end)?;
            if json {
                println!("{}", report::to_json(&result)?);
            } else {
                print!("{}", report::render_query(&result, date_format));
            }
            if chart {
                draw_chart(&store, &DailySeries::from_transactions(&result.transactions))?;
            }
        }
        Some(Command::Summary {
            budget,
            json,
            chart,
        }) => {
            let overview = QueryEngine::new(&store).overview(budget.or(args.budget))?;
            if json {
                println!("{}", report::to_json(&overview)?);
            } else {
                print!("{}", report::render_overview(&overview, date_format));
            }
            if chart {
                draw_chart(&store, &DailySeries::from_transactions(&overview.transactions))?;
            }
        }
        Some(Command::Reset) => {
            store.reset().context("Failed to reset ledger")?;
            println!("Ledger cleared");
        }
    }

    Ok(())
}

fn run_interactive(store: &LedgerStore, budget: Option<f64>) -> Result<()> {
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());

    let mut session = Session::new(store, prompter, chart_renderer(store)).with_budget(budget);
    session.run(budget.is_none())?;
    Ok(())
}

fn draw_chart(store: &LedgerStore, series: &DailySeries) -> Result<()> {
    chart_renderer(store).render(series)?;
    Ok(())
}

#[cfg(feature = "tui")]
fn chart_renderer(store: &LedgerStore) -> budget_ledger::TerminalChart {
    budget_ledger::TerminalChart::new(store.config().date_format.as_str())
}

#[cfg(not(feature = "tui"))]
fn chart_renderer(store: &LedgerStore) -> budget_ledger::TextChart<io::Stdout> {
    budget_ledger::TextChart::new(io::stdout()).with_date_format(store.config().date_format.as_str())
}
