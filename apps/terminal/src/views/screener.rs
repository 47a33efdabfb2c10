//! Screener view: filter form plus the filtered universe table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{App, FilterField};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.form.visible {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(area);
        render_form(frame, app, chunks[0]);
        render_results(frame, app, chunks[1]);
    } else {
        render_results(frame, app, area);
    }
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = FilterField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == app.form.selected;
            let value = if selected && app.form.editing {
                format!("{}_", app.form.buffer)
            } else {
                field.get(&app.filters)
            };
            let text = format!("{:<16} {}", field.label(), value);
            if selected {
                Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Filters ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let matches: Vec<_> = app
        .universe
        .iter()
        .filter(|row| app.filters.matches(row))
        .collect();

    let header = Row::new(["Symbol", "Sector", "Price", "Yield%", "P/E", "P/B", "Cap(B)"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    fn ratio(r: Option<rust_decimal::Decimal>) -> String {
        r.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    }

    let rows: Vec<Row> = matches
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.symbol.clone()),
                Cell::from(r.sector.clone()),
                Cell::from(r.price.to_string()),
                Cell::from(r.dividend_yield.to_string()),
                Cell::from(ratio(r.pe_ratio)),
                Cell::from(ratio(r.pb_ratio)),
                Cell::from(r.market_cap.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(14),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
    ];

    let title = format!(" Matches {}/{} ", matches.len(), app.universe.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}
