//! Holdings view: one expandable card per category.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use foliowatch_core::Position;

use crate::app::{App, Density};
use crate::views::{gain_style, money};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let categories = app.categories();

    let mut constraints: Vec<Constraint> = categories
        .iter()
        .map(|category| {
            if app.expanded.contains(category) {
                let rows = app
                    .positions
                    .iter()
                    .filter(|p| &p.category == category)
                    .count() as u16;
                // border + header + one row per position
                Constraint::Length(rows + 3)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, category) in categories.iter().enumerate() {
        render_card(frame, app, category, i == app.selected_category, chunks[i]);
    }
}

fn render_card(frame: &mut Frame, app: &App, category: &str, selected: bool, area: Rect) {
    let positions: Vec<&Position> = app
        .positions
        .iter()
        .filter(|p| p.category == category)
        .collect();

    let value: rust_decimal::Decimal = positions
        .iter()
        .map(|p| p.market_value(app.quotes.get(&p.symbol)))
        .sum();
    let cost: rust_decimal::Decimal = positions.iter().map(|p| p.cost_basis()).sum();
    let gain = value - cost;

    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} — {} ", category, money(value)));

    if !app.expanded.contains(category) {
        let line = Line::from(vec![
            format!("{} positions · gain ", positions.len()).into(),
            ratatui::text::Span::styled(money(gain), gain_style(gain)),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let (header, widths): (Vec<&str>, Vec<Constraint>) = match app.density {
        Density::Comfortable => (
            vec!["Symbol", "Name", "Shares", "Price", "Value", "Gain"],
            vec![
                Constraint::Length(8),
                Constraint::Min(18),
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(12),
            ],
        ),
        Density::Compact => (
            vec!["Symbol", "Price", "Value"],
            vec![
                Constraint::Length(8),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        ),
    };

    let rows: Vec<Row> = positions
        .iter()
        .map(|p| {
            let live = app.quotes.get(&p.symbol);
            let price = p.effective_price(live);
            // live quotes are marked so stale sample prices stand out
            let price_cell = if live.is_some() {
                format!("{}*", price)
            } else {
                price.to_string()
            };
            let value = p.market_value(live);
            let gain = value - p.cost_basis();

            match app.density {
                Density::Comfortable => Row::new(vec![
                    Cell::from(p.symbol.clone()),
                    Cell::from(p.name.clone()),
                    Cell::from(p.shares.to_string()),
                    Cell::from(price_cell),
                    Cell::from(money(value)),
                    Cell::from(money(gain)).style(gain_style(gain)),
                ]),
                Density::Compact => Row::new(vec![
                    Cell::from(p.symbol.clone()),
                    Cell::from(price_cell),
                    Cell::from(money(value)),
                ]),
            }
        })
        .collect();

    let header = Row::new(header).style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
