// 📈 Chart Data
// Daily resampling of income and expense, plus the renderer seam

use crate::error::Result;
use crate::transaction::{Category, Transaction, DATE_FORMAT};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

pub const CHART_TITLE: &str = "Income and Expenses Summary";

/// DailySeries - two aligned per-day totals over a contiguous date span
///
/// `dates[i]`, `income[i]` and `expense[i]` describe the same calendar day.
/// Days without matching rows hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

impl DailySeries {
    /// Bucket over the span the data itself covers (earliest to latest day)
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let first = transactions.iter().map(|tx| tx.date).min();
        let last = transactions.iter().map(|tx| tx.date).max();

        match (first, last) {
            (Some(start), Some(end)) => Self::over_span(transactions, start, end),
            _ => Self::default(),
        }
    }

    /// Bucket over an explicit inclusive span; rows outside it are ignored
    pub fn over_span(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> Self {
        let dates: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
        let mut income = vec![0.0; dates.len()];
        let mut expense = vec![0.0; dates.len()];

        for tx in transactions {
            if tx.date < start || tx.date > end {
                continue;
            }
            let slot = (tx.date - start).num_days() as usize;
            match tx.category {
                Category::Income => income[slot] += tx.amount,
                Category::Expense => expense[slot] += tx.amount,
            }
        }

        Self {
            dates,
            income,
            expense,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Largest single-day value across both series
    pub fn peak(&self) -> f64 {
        self.income
            .iter()
            .chain(self.expense.iter())
            .copied()
            .fold(0.0, f64::max)
    }

    /// `(day index, amount)` points, the shape line charts want
    pub fn income_points(&self) -> Vec<(f64, f64)> {
        to_points(&self.income)
    }

    pub fn expense_points(&self) -> Vec<(f64, f64)> {
        to_points(&self.expense)
    }
}

fn to_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

// ============================================================================
// RENDERERS
// ============================================================================

/// ChartRenderer - draws a [`DailySeries`]
///
/// The drawing itself is opaque to the rest of the crate: the session only
/// hands over data.
pub trait ChartRenderer {
    fn render(&mut self, series: &DailySeries) -> Result<()>;
}

/// TextChart - per-day table written to any stream
pub struct TextChart<W: Write> {
    out: W,
    date_format: String,
}

impl<W: Write> TextChart<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            date_format: DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChart<W> {
    fn render(&mut self, series: &DailySeries) -> Result<()> {
        writeln!(self.out, "{}", CHART_TITLE)?;
        if series.is_empty() {
            writeln!(self.out, "No transactions to chart")?;
            return Ok(());
        }

        writeln!(self.out, "{:<12} {:>12} {:>12}", "Date", "Income", "Expense")?;
        for i in 0..series.len() {
            writeln!(
                self.out,
                "{:<12} {:>12.2} {:>12.2}",
                series.dates[i].format(&self.date_format).to_string(),
                series.income[i],
                series.expense[i]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
    }

    fn tx(day: u32, amount: f64, category: Category) -> Transaction {
        Transaction::new(date(day), amount, category, "").unwrap()
    }

    #[test]
    fn test_zero_filled_span() {
        let transactions = vec![tx(1, 20.0, Category::Expense)];

        let series = DailySeries::over_span(&transactions, date(1), date(3));
        assert_eq!(series.dates, vec![date(1), date(2), date(3)]);
        assert_eq!(series.expense, vec![20.0, 0.0, 0.0]);
        assert_eq!(series.income, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_span_follows_data() {
        let transactions = vec![
            tx(4, 15.0, Category::Expense),
            tx(2, 2500.0, Category::Income),
            tx(4, 20.0, Category::Expense),
            tx(2, 1500.0, Category::Expense),
        ];

        let series = DailySeries::from_transactions(&transactions);
        assert_eq!(series.len(), 3);
        assert_eq!(series.dates[0], date(2));
        assert_eq!(series.income, vec![2500.0, 0.0, 0.0]);
        assert_eq!(series.expense, vec![1500.0, 0.0, 35.0]);
        assert_eq!(series.peak(), 2500.0);
    }

    #[test]
    fn test_rows_outside_span_ignored() {
        let transactions = vec![tx(1, 5.0, Category::Income), tx(9, 5.0, Category::Income)];

        let series = DailySeries::over_span(&transactions, date(2), date(8));
        assert_eq!(series.len(), 7);
        assert!(series.income.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_input() {
        let series = DailySeries::from_transactions(&[]);
        assert!(series.is_empty());
        assert_eq!(series.peak(), 0.0);

        let reversed = DailySeries::over_span(&[], date(5), date(1));
        assert!(reversed.is_empty());
    }

    #[test]
    fn test_points_are_indexed_by_day() {
        let series = DailySeries::over_span(&[tx(2, 7.5, Category::Income)], date(1), date(2));
        assert_eq!(series.income_points(), vec![(0.0, 0.0), (1.0, 7.5)]);
        assert_eq!(series.expense_points(), vec![(0.0, 0.0), (1.0, 0.0)]);
    }

    #[test]
    fn test_text_chart_output() {
        let series = DailySeries::over_span(&[tx(1, 20.0, Category::Expense)], date(1), date(2));

        let mut chart = TextChart::new(Vec::new());
        chart.render(&series).unwrap();
        let text = String::from_utf8(chart.into_inner()).unwrap();

        assert!(text.starts_with(CHART_TITLE));
        assert!(text.contains("01-10-2024"));
        assert!(text.contains("20.00"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_text_chart_date_format() {
        let series = DailySeries::over_span(&[tx(1, 20.0, Category::Expense)], date(1), date(1));

        let mut chart = TextChart::new(Vec::new()).with_date_format("%Y/%m/%d");
        chart.render(&series).unwrap();
        let text = String::from_utf8(chart.into_inner()).unwrap();

        assert!(text.contains("2024/10/01"));
        assert!(!text.contains("01-10-2024"));
    }
}
