// 🔍 Query & Aggregation Engine
// Range filtering and category totals over the ledger store

use crate::error::{LedgerError, Result};
use crate::store::LedgerStore;
use crate::transaction::{parse_date, Category, Transaction};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Summary - income / expense / net totals for a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Summary::default();

        for tx in transactions {
            match tx.category {
                Category::Income => summary.total_income += tx.amount,
                Category::Expense => summary.total_expense += tx.amount,
            }
        }

        summary.net_savings = summary.total_income - summary.total_expense;
        summary
    }
}

/// BudgetStatus - how much of a budget the whole-ledger expenses leave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget: f64,
    pub remaining: f64,
}

impl BudgetStatus {
    /// `None` unless the budget is positive
    pub fn new(budget: f64, total_expense: f64) -> Option<Self> {
        if budget > 0.0 {
            Some(Self {
                budget,
                remaining: budget - total_expense,
            })
        } else {
            None
        }
    }
}

/// QueryResult - transactions inside an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    /// In-range rows left out because their category is not Income/Expense
    #[serde(default)]
    pub skipped: usize,
}

impl QueryResult {
    /// "No transactions found" is a normal outcome, not an error
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Overview - the whole ledger, unfiltered, in on-disk order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetStatus>,
    #[serde(default)]
    pub skipped: usize,
}

/// Parsed ledger contents. `skipped` holds the dates of rows whose
/// category label is unrecognised.
struct Loaded {
    transactions: Vec<Transaction>,
    skipped: Vec<NaiveDate>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// QueryEngine - reads the store and answers range / whole-ledger questions
pub struct QueryEngine<'a> {
    store: &'a LedgerStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a LedgerStore) -> Self {
        Self { store }
    }

    /// Transactions with `start <= date <= end`, oldest first.
    ///
    /// A reversed range simply matches nothing.
    pub fn query(&self, start: NaiveDate, end: NaiveDate) -> Result<QueryResult> {
        let Loaded {
            mut transactions,
            skipped,
        } = self.load()?;

        // sort_by_key is stable: same-day rows keep their insertion order
        transactions.sort_by_key(|tx| tx.date);
        transactions.retain(|tx| tx.date >= start && tx.date <= end);

        log::debug!(
            "Query {}..={} matched {} transactions",
            start,
            end,
            transactions.len()
        );

        let skipped = skipped
            .iter()
            .filter(|date| **date >= start && **date <= end)
            .count();

        let summary = Summary::from_transactions(&transactions);
        Ok(QueryResult {
            start,
            end,
            transactions,
            summary,
            skipped,
        })
    }

    /// Every transaction with totals, plus remaining budget when one is set
    pub fn overview(&self, budget: Option<f64>) -> Result<Overview> {
        let Loaded {
            transactions,
            skipped,
        } = self.load()?;
        let summary = Summary::from_transactions(&transactions);
        let budget = budget.and_then(|b| BudgetStatus::new(b, summary.total_expense));

        Ok(Overview {
            transactions,
            summary,
            budget,
            skipped: skipped.len(),
        })
    }

    /// Parse every stored row.
    ///
    /// Rows with an unrecognised category are counted, never totalled;
    /// an unparseable date is fatal.
    fn load(&self) -> Result<Loaded> {
        let date_format = &self.store.config().date_format;
        let rows = self.store.read_all()?;

        let mut transactions = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            // header is line 1
            let line = index as u64 + 2;
            match row.to_transaction(date_format) {
                Ok(tx) => transactions.push(tx),
                Err(LedgerError::UnknownCategory(label)) => {
                    log::warn!("Skipping line {}: unknown category '{}'", line, label);
                    // the date was already parsed successfully before the category
                    if let Ok(date) = parse_date(&row.date, date_format) {
                        skipped.push(date);
                    }
                }
                Err(LedgerError::InvalidDate { value }) => {
                    return Err(LedgerError::CorruptDate { value, line });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Loaded {
            transactions,
            skipped,
        })
    }
}
