// Budget Ledger - Core Library
// Exposes all modules for use in the CLI and tests

pub mod chart;
pub mod error;
pub mod input;
pub mod menu;
pub mod query;
pub mod report;
pub mod store;
pub mod transaction;

// Only compile the terminal chart when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use chart::{ChartRenderer, DailySeries, TextChart};
pub use error::{LedgerError, Result};
pub use input::Prompter;
pub use menu::{MenuChoice, Session};
pub use query::{BudgetStatus, Overview, QueryEngine, QueryResult, Summary};
pub use store::{LedgerStore, StoreConfig, DEFAULT_LEDGER_FILE};
pub use transaction::{
    format_date, parse_date, Category, LedgerRow, Transaction, DATE_FORMAT, LEDGER_COLUMNS,
};

#[cfg(feature = "tui")]
pub use ui::TerminalChart;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
