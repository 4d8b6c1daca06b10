// ⌨️ Validated Input Collector
// Prompts that keep asking until the answer is usable

use crate::error::{LedgerError, Result};
use crate::transaction::{parse_date, Category, DATE_FORMAT};
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};

/// Prompter - reads answers from `input`, writes prompts and diagnostics to `output`
///
/// Every `collect_*` method loops until the answer validates. There is no
/// retry cap; the only way out besides a valid answer is end of input,
/// which surfaces as [`LedgerError::InputClosed`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
    date_format: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            today: Local::now().date_naive(),
            date_format: DATE_FORMAT.to_string(),
        }
    }

    /// Parse dates with the ledger's configured format
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Pin "today" (used for the empty-answer date default)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line, without the line terminator
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(LedgerError::InputClosed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn collect_date(&mut self, prompt: &str, allow_default: bool) -> Result<NaiveDate> {
        loop {
            let answer = self.ask(prompt)?;
            if allow_default && answer.trim().is_empty() {
                return Ok(self.today);
            }

            match parse_date(&answer, &self.date_format) {
                Ok(date) => return Ok(date),
                Err(_) => self.say("Invalid date format. Enter date as dd-mm-yyyy")?,
            }
        }
    }

    /// Strictly positive amount
    pub fn collect_amount(&mut self) -> Result<f64> {
        loop {
            let answer = self.ask("Enter an amount: ")?;
            match answer.trim().parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount > 0.0 => return Ok(amount),
                Ok(amount) if amount.is_finite() => {
                    self.say("")?;
                    self.say("Amount must be non-negative and non-zero")?;
                }
                _ => self.say("Invalid amount. Enter a number")?,
            }
        }
    }

    pub fn collect_category(&mut self) -> Result<Category> {
        loop {
            let answer = self.ask("Enter category ('I' for Income or 'E' for Expense): ")?;
            match Category::from_code(&answer) {
                Some(category) => return Ok(category),
                None => self.say("Invalid category. Enter 'I' for Income or 'E' for Expense")?,
            }
        }
    }

    pub fn collect_description(&mut self) -> Result<String> {
        self.ask("Enter description: ")
    }

    /// Optional non-negative budget. Declining, or entering 0, means none.
    pub fn collect_budget(&mut self) -> Result<Option<f64>> {
        if !self.confirm("Do you want to set a budget? (y/n) ")? {
            return Ok(None);
        }

        loop {
            let answer = self.ask("Enter budget: ")?;
            match answer.trim().parse::<f64>() {
                Ok(budget) if budget.is_finite() && budget >= 0.0 => {
                    return Ok(if budget > 0.0 { Some(budget) } else { None });
                }
                _ => {
                    self.say("")?;
                    self.say("Please enter valid amount")?;
                }
            }
        }
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::format_date;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
            .with_today(NaiveDate::from_ymd_opt(2024, 10, 19).unwrap())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_date_round_trip() {
        for text in ["28-09-2024", "01-01-2000", "29-02-2024", "31-12-1999"] {
            let mut p = prompter(&format!("{}\n", text));
            let date = p.collect_date("Date: ", false).unwrap();
            assert_eq!(format_date(date, DATE_FORMAT), text);
        }
    }

    #[test]
    fn test_date_retries_until_valid() {
        let mut p = prompter("2024-10-02\n\n32-01-2024\n02-10-2024\n");
        let date = p.collect_date("Date: ", false).unwrap();

        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        let out = transcript(p);
        assert_eq!(out.matches("Invalid date format").count(), 3);
        assert_eq!(out.matches("Date: ").count(), 4);
    }

    #[test]
    fn test_date_uses_configured_format() {
        let mut p = prompter("02-10-2024\n2024/10/02\n").with_date_format("%Y/%m/%d");
        let date = p.collect_date("Date: ", false).unwrap();

        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
        assert_eq!(transcript(p).matches("Invalid date format").count(), 1);
    }

    #[test]
    fn test_date_default_is_today() {
        let mut p = prompter("\n");
        let date = p.collect_date("Date: ", true).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 19).unwrap());
    }

    #[test]
    fn test_amount_rejects_non_positive() {
        let mut p = prompter("0\n-5\nabc\n12.50\n");
        assert_eq!(p.collect_amount().unwrap(), 12.5);

        let out = transcript(p);
        assert_eq!(out.matches("Amount must be non-negative and non-zero").count(), 2);
        assert_eq!(out.matches("Invalid amount").count(), 1);
    }

    #[test]
    fn test_amount_returns_exact_value() {
        for amount in [0.01, 57.79, 2500.0, 1e9] {
            let mut p = prompter(&format!("{}\n", amount));
            assert_eq!(p.collect_amount().unwrap(), amount);
        }
    }

    #[test]
    fn test_category_codes() {
        let mut p = prompter("x\nincome\ni\n");
        assert_eq!(p.collect_category().unwrap(), Category::Income);
        assert_eq!(transcript(p).matches("Invalid category").count(), 2);

        let mut p = prompter("E\n");
        assert_eq!(p.collect_category().unwrap(), Category::Expense);
    }

    #[test]
    fn test_description_may_be_empty() {
        let mut p = prompter("\nNetflix subscription\n");
        assert_eq!(p.collect_description().unwrap(), "");
        assert_eq!(p.collect_description().unwrap(), "Netflix subscription");
    }

    #[test]
    fn test_budget_loops_until_valid() {
        let mut p = prompter("Y\n-10\nlots\n1500\n");
        assert_eq!(p.collect_budget().unwrap(), Some(1500.0));
        assert_eq!(transcript(p).matches("Please enter valid amount").count(), 2);

        let mut p = prompter("n\n");
        assert_eq!(p.collect_budget().unwrap(), None);

        let mut p = prompter("y\n0\n");
        assert_eq!(p.collect_budget().unwrap(), None);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompter("not-a-date\n");
        match p.collect_date("Date: ", false) {
            Err(LedgerError::InputClosed) => {}
            other => panic!("expected InputClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_windows_line_endings() {
        let mut p = prompter("02-10-2024\r\n");
        assert!(p.collect_date("Date: ", false).is_ok());
    }
}
