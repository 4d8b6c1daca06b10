// 📒 Transaction Model
// The single entity of the ledger plus its on-disk row shape

use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date pattern used on disk and at every prompt (`dd-mm-yyyy`)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Column order of the ledger file
pub const LEDGER_COLUMNS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

// ============================================================================
// CATEGORY
// ============================================================================

/// Category - closed enumeration of transaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Full label, as written to the ledger file
    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }

    /// Resolve the single-letter entry shorthand (`I` / `E`, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "I" => Some(Category::Income),
            "E" => Some(Category::Expense),
            _ => None,
        }
    }

    /// Resolve a stored label. Matching is exact, like the file format.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Income" => Some(Category::Income),
            "Expense" => Some(Category::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    /// Accepts either the shorthand code or the full label
    fn from_str(s: &str) -> Result<Self> {
        Category::from_code(s)
            .or_else(|| Category::from_label(s.trim()))
            .ok_or_else(|| LedgerError::UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// DATES
// ============================================================================

pub fn parse_date(value: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| LedgerError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// A dated income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
    pub description: String,
}

impl Transaction {
    /// Build a transaction, enforcing `amount > 0`
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        Ok(Self {
            date,
            amount,
            category,
            description: description.into(),
        })
    }

    /// Convert to the textual row written to disk
    pub fn to_row(&self, date_format: &str) -> LedgerRow {
        LedgerRow {
            date: format_date(self.date, date_format),
            amount: self.amount,
            category: self.category.label().to_string(),
            description: self.description.clone(),
        }
    }
}

/// LedgerRow - one line of the ledger file, exactly as stored
///
/// Date and category stay textual: the store never re-validates what it
/// reads back. Conversion into a [`Transaction`] happens at query time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LedgerRow {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Amount")]
    pub amount: f64,

    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Description", default)]
    pub description: String,
}

impl LedgerRow {
    /// Parse the textual fields into a [`Transaction`].
    ///
    /// No amount check here: rows are trusted as written.
    pub fn to_transaction(&self, date_format: &str) -> Result<Transaction> {
        let date = parse_date(&self.date, date_format)?;
        let category = Category::from_label(&self.category)
            .ok_or_else(|| LedgerError::UnknownCategory(self.category.clone()))?;

        Ok(Transaction {
            date,
            amount: self.amount,
            category,
            description: self.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_are_case_insensitive() {
        assert_eq!(Category::from_code("I"), Some(Category::Income));
        assert_eq!(Category::from_code("i"), Some(Category::Income));
        assert_eq!(Category::from_code("E"), Some(Category::Expense));
        assert_eq!(Category::from_code("e"), Some(Category::Expense));
        assert_eq!(Category::from_code("X"), None);
        assert_eq!(Category::from_code(""), None);
        assert_eq!(Category::from_code("Income"), None);
    }

    #[test]
    fn test_category_from_str_accepts_code_or_label() {
        assert_eq!("e".parse::<Category>().unwrap(), Category::Expense);
        assert_eq!("Income".parse::<Category>().unwrap(), Category::Income);
        assert!("Salary".parse::<Category>().is_err());
    }

    #[test]
    fn test_date_round_trip() {
        let date = parse_date("02-10-2024", DATE_FORMAT).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        assert_eq!(format_date(date, DATE_FORMAT), "02-10-2024");
    }

    #[test]
    fn test_invalid_dates_rejected() {
        assert!(parse_date("2024-10-02", DATE_FORMAT).is_err());
        assert!(parse_date("31-02-2024", DATE_FORMAT).is_err());
        assert!(parse_date("", DATE_FORMAT).is_err());
    }

    #[test]
    fn test_new_rejects_non_positive_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 2).unwrap();
        assert!(Transaction::new(date, 0.0, Category::Expense, "").is_err());
        assert!(Transaction::new(date, -5.0, Category::Expense, "").is_err());
        assert!(Transaction::new(date, f64::NAN, Category::Expense, "").is_err());
        assert!(Transaction::new(date, 5.0, Category::Expense, "coffee").is_ok());
    }

    #[test]
    fn test_row_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 28).unwrap();
        let tx = Transaction::new(date, 57.79, Category::Expense, "amazon").unwrap();

        let row = tx.to_row(DATE_FORMAT);
        assert_eq!(row.date, "28-09-2024");
        assert_eq!(row.category, "Expense");

        assert_eq!(row.to_transaction(DATE_FORMAT).unwrap(), tx);
    }

    #[test]
    fn test_row_with_unknown_category() {
        let row = LedgerRow {
            date: "28-09-2024".to_string(),
            amount: 10.0,
            category: "Transfer".to_string(),
            description: String::new(),
        };

        match row.to_transaction(DATE_FORMAT) {
            Err(LedgerError::UnknownCategory(label)) => assert_eq!(label, "Transfer"),
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }
}
