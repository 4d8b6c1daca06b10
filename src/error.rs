use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid date '{value}': expected dd-mm-yyyy")]
    InvalidDate { value: String },

    #[error("Invalid date '{value}' on line {line} of the ledger")]
    CorruptDate { value: String, line: u64 },

    #[error("Unknown category '{0}': expected Income or Expense")]
    UnknownCategory(String),

    #[error("Invalid amount {0}: must be greater than zero")]
    InvalidAmount(f64),

    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
