use crate::chart::{ChartRenderer, DailySeries, CHART_TITLE};
use crate::error::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::io;

/// TerminalChart - full-screen income/expense line chart
///
/// Blocks until the user presses `q`, `Esc` or `Enter`.
#[derive(Debug)]
pub struct TerminalChart {
    date_format: String,
}

impl TerminalChart {
    /// `date_format` drives the x-axis labels
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }
}

impl ChartRenderer for TerminalChart {
    fn render(&mut self, series: &DailySeries) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = run_chart(&mut terminal, series, &self.date_format);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res.map_err(Into::into)
    }
}

fn run_chart<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    series: &DailySeries,
    date_format: &str,
) -> io::Result<()> {
    let income = series.income_points();
    let expense = series.expense_points();

    loop {
        terminal.draw(|f| draw(f, series, date_format, &income, &expense))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return Ok(()),
                _ => {}
            }
        }
    }
}

fn draw(
    f: &mut Frame,
    series: &DailySeries,
    date_format: &str,
    income: &[(f64, f64)],
    expense: &[(f64, f64)],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Chart
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    if series.is_empty() {
        let empty = Paragraph::new("No transactions to chart")
            .block(Block::default().borders(Borders::ALL).title(CHART_TITLE));
        f.render_widget(empty, chunks[0]);
    } else {
        render_chart(f, chunks[0], series, date_format, income, expense);
    }

    render_status_bar(f, chunks[1]);
}

fn render_chart(
    f: &mut Frame,
    area: Rect,
    series: &DailySeries,
    date_format: &str,
    income: &[(f64, f64)],
    expense: &[(f64, f64)],
) {
    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(income),
        Dataset::default()
            .name("Expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(expense),
    ];

    // A single day still needs a non-zero x range
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;
    let y_max = if series.peak() > 0.0 { series.peak() * 1.1 } else { 1.0 };

    let first = series.dates[0];
    let last = series.dates[series.len() - 1];
    let middle = series.dates[series.len() / 2];
    let x_labels = vec![
        Span::raw(first.format(date_format).to_string()),
        Span::raw(middle.format(date_format).to_string()),
        Span::raw(last.format(date_format).to_string()),
    ];
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", y_max / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    CHART_TITLE,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(y_labels),
        )
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" / "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" / "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": close chart"),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}
