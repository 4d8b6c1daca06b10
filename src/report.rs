// 🧾 Text Reports
// Aligned transaction tables and the summary block

use crate::error::Result;
use crate::query::{BudgetStatus, Overview, QueryResult, Summary};
use crate::transaction::Transaction;
use serde::Serialize;
use std::fmt::Write;

pub const NO_TRANSACTIONS: &str = "No transactions found";

/// Currency amount with two decimals, e.g. `$57.79` or `$-12.00`
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Aligned table of transactions. Column widths follow the widest cell.
pub fn render_table(transactions: &[Transaction], date_format: &str) -> String {
    let rows: Vec<[String; 4]> = transactions
        .iter()
        .map(|tx| {
            [
                tx.date.format(date_format).to_string(),
                format!("{:.2}", tx.amount),
                tx.category.label().to_string(),
                tx.description.clone(),
            ]
        })
        .collect();

    let headers = ["Date", "Amount", "Category", "Description"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>w0$}  {:>w1$}  {:<w2$}  {}",
        headers[0],
        headers[1],
        headers[2],
        headers[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    for row in &rows {
        let _ = writeln!(
            out,
            "{:>w0$}  {:>w1$}  {:<w2$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
    }
    out
}

pub fn render_summary(summary: &Summary, budget: Option<&BudgetStatus>) -> String {
    let mut out = String::from("\n--Summary--\n");

    if let Some(b) = budget {
        let _ = writeln!(out, "Budget: {}", money(b.budget));
    }
    let _ = writeln!(out, "Total Income: {}", money(summary.total_income));
    let _ = writeln!(out, "Total Expense: {}", money(summary.total_expense));
    let _ = writeln!(out, "Net Savings: {}", money(summary.net_savings));
    if let Some(b) = budget {
        let _ = writeln!(out, "Budget remaining: {}", money(b.remaining));
    }

    out
}

/// Note for rows whose category is neither Income nor Expense, if any
pub fn render_skipped(skipped: usize) -> String {
    match skipped {
        0 => String::new(),
        1 => "1 row with an unknown category was left out\n".to_string(),
        n => format!("{} rows with an unknown category were left out\n", n),
    }
}

/// Heading, table and summary for a range query
pub fn render_query(result: &QueryResult, date_format: &str) -> String {
    if result.is_empty() {
        return format!("{}\n{}", NO_TRANSACTIONS, render_skipped(result.skipped));
    }

    format!(
        "Transactions from {} to {}\n{}{}{}",
        result.start.format(date_format),
        result.end.format(date_format),
        render_table(&result.transactions, date_format),
        render_skipped(result.skipped),
        render_summary(&result.summary, None)
    )
}

pub fn render_overview(overview: &Overview, date_format: &str) -> String {
    let table = if overview.transactions.is_empty() {
        format!("{}\n", NO_TRANSACTIONS)
    } else {
        render_table(&overview.transactions, date_format)
    };

    format!(
        "{}{}{}",
        table,
        render_skipped(overview.skipped),
        render_summary(&overview.summary, overview.budget.as_ref())
    )
}

/// Pretty JSON for `--json` output
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
