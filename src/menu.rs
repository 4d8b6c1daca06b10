// 🧭 Interactive Session
// Budget prompt and the main menu loop

use crate::chart::{ChartRenderer, DailySeries};
use crate::error::Result;
use crate::input::Prompter;
use crate::query::QueryEngine;
use crate::report;
use crate::store::LedgerStore;
use crate::transaction::Transaction;
use std::io::{BufRead, Write};

/// MenuChoice - one line typed at the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Overview,
    Add,
    RangeQuery,
    Reset,
    Quit,
    Invalid,
}

impl MenuChoice {
    pub fn parse(answer: &str) -> Self {
        match answer.trim() {
            "" => MenuChoice::Overview,
            "1" => MenuChoice::Add,
            "2" => MenuChoice::RangeQuery,
            "3" => MenuChoice::Reset,
            "q" => MenuChoice::Quit,
            _ => MenuChoice::Invalid,
        }
    }
}

const MENU: &str = "
Click ENTER to view full transaction summary
1) Add transaction
2) View transaction summary within date range
3) Start a new month
q) to exit";

/// Session - one interactive run against a store
///
/// The only state held across menu iterations is the budget entered at
/// startup.
pub struct Session<'a, R, W, C> {
    store: &'a LedgerStore,
    prompter: Prompter<R, W>,
    chart: C,
    budget: Option<f64>,
}

impl<'a, R: BufRead, W: Write, C: ChartRenderer> Session<'a, R, W, C> {
    pub fn new(store: &'a LedgerStore, prompter: Prompter<R, W>, chart: C) -> Self {
        let prompter = prompter.with_date_format(store.config().date_format.clone());
        Self {
            store,
            prompter,
            chart,
            budget: None,
        }
    }

    /// Skip the startup budget question
    pub fn with_budget(mut self, budget: Option<f64>) -> Self {
        self.budget = budget.filter(|b| *b > 0.0);
        self
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn into_parts(self) -> (Prompter<R, W>, C) {
        (self.prompter, self.chart)
    }

    /// Welcome, optional budget prompt, then the menu until `q`
    pub fn run(&mut self, ask_budget: bool) -> Result<()> {
        self.prompter.say("")?;
        self.prompter.say("Welcome to your budget tracker!")?;

        if ask_budget {
            self.budget = self.prompter.collect_budget()?;
        }

        loop {
            self.prompter.say(MENU)?;
            let answer = self.prompter.ask("Enter choice: ")?;

            match MenuChoice::parse(&answer) {
                MenuChoice::Overview => self.show_overview()?,
                MenuChoice::Add => self.add_transaction()?,
                MenuChoice::RangeQuery => self.range_query()?,
                MenuChoice::Reset => {
                    self.store.reset()?;
                    self.prompter.say("Ledger cleared")?;
                }
                MenuChoice::Quit => {
                    self.prompter.say("Exiting...")?;
                    return Ok(());
                }
                MenuChoice::Invalid => self.prompter.say("Invalid option")?,
            }
        }
    }

    fn show_overview(&mut self) -> Result<()> {
        let overview = QueryEngine::new(self.store).overview(self.budget)?;
        let text = report::render_overview(&overview, self.date_format());
        write!(self.prompter.output(), "{}", text)?;

        self.offer_chart(&overview.transactions)
    }

    fn add_transaction(&mut self) -> Result<()> {
        let date = self.prompter.collect_date(
            "Enter the date of the transaction (dd-mm-yyyy) or ENTER for today's date: ",
            true,
        )?;
        let amount = self.prompter.collect_amount()?;
        let category = self.prompter.collect_category()?;
        let description = self.prompter.collect_description()?;

        let transaction = Transaction::new(date, amount, category, description)?;
        self.store.append(&transaction)?;
        self.prompter.say("Entry added successfully")
    }

    fn range_query(&mut self) -> Result<()> {
        let start = self
            .prompter
            .collect_date("Enter start date (dd-mm-yyyy): ", false)?;
        let end = self
            .prompter
            .collect_date("Enter end date (dd-mm-yyyy): ", false)?;

        let result = QueryEngine::new(self.store).query(start, end)?;
        let text = report::render_query(&result, self.date_format());
        write!(self.prompter.output(), "{}", text)?;

        if result.is_empty() {
            return Ok(());
        }
        self.offer_chart(&result.transactions)
    }

    fn date_format(&self) -> &'a str {
        &self.store.config().date_format
    }

    fn offer_chart(&mut self, transactions: &[Transaction]) -> Result<()> {
        if self.prompter.confirm("Would you like to see a graph? (y/n) ")? {
            let series = DailySeries::from_transactions(transactions);
            self.chart.render(&series)?;
        }
        Ok(())
    }
}
