//! Summary view: portfolio totals and the live watchlist.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use foliowatch_core::constants::WATCHLIST;
use foliowatch_core::PortfolioSummary;

use crate::app::App;
use crate::views::{gain_style, money};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    render_totals(frame, app, chunks[0]);
    render_watchlist(frame, app, chunks[1]);
}

fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let summary = PortfolioSummary::compute(&app.positions, &app.quotes);

    let gain_pct = summary
        .gain_pct
        .map(|p| format!(" ({}%)", p.round_dp(2)))
        .unwrap_or_default();

    let categories = summary
        .categories
        .iter()
        .map(|c| format!("{} {}", c.category, money(c.market_value)))
        .collect::<Vec<_>>()
        .join("  ·  ");

    let lines = vec![
        Line::from(vec![
            Span::raw("Market value  "),
            Span::styled(
                money(summary.market_value),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Cost basis    {}", money(summary.cost_basis))),
        Line::from(vec![
            Span::raw("Gain          "),
            Span::styled(
                format!("{}{}", money(summary.gain), gain_pct),
                gain_style(summary.gain),
            ),
        ]),
        Line::from(""),
        Line::from(categories),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Portfolio ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_watchlist(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Symbol", "Date", "Open", "High", "Low", "Close", "Volume"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = WATCHLIST
        .iter()
        .map(|symbol| match app.quotes.get(symbol) {
            Some(quote) => Row::new(vec![
                Cell::from(quote.symbol.clone()),
                Cell::from(quote.date.to_string()),
                Cell::from(quote.open.to_string()),
                Cell::from(quote.high.to_string()),
                Cell::from(quote.low.to_string()),
                Cell::from(quote.close.to_string()),
                Cell::from(quote.volume.to_string()),
            ]),
            None => Row::new(vec![
                Cell::from(*symbol),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("-"),
            ]),
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let title = if app.batch_in_flight {
        " Watchlist (refreshing...) "
    } else {
        " Watchlist (r to refresh) "
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}
