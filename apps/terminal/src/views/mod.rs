//! View rendering.
//!
//! Pure functions from app state to widgets; no view mutates anything.

mod holdings;
mod projection;
mod screener;
mod summary;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use rust_decimal::Decimal;

use crate::app::{App, Tab};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Summary => summary::render(frame, app, chunks[1]),
        Tab::Holdings => holdings::render(frame, app, chunks[1]),
        Tab::Screener => screener::render(frame, app, chunks[1]),
        Tab::Projection => projection::render(frame, app, chunks[1]),
    }
    render_status(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" FolioWatch "),
        );
    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref buffer) = app.symbol_prompt {
        Line::styled(
            format!("Symbol: {}_  (Enter to fetch, Esc to cancel)", buffer),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(ref status) = app.status {
        Line::styled(status.message.clone(), Style::default().fg(Color::Cyan))
    } else {
        Line::styled(
            hint_for(app.tab),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hint_for(tab: Tab) -> &'static str {
    match tab {
        Tab::Summary => "r refresh watchlist · / quote a symbol · Tab switch view · q quit",
        Tab::Holdings => "Up/Down select card · Enter expand · d density · q quit",
        Tab::Screener => "f toggle form · Enter edit field · c clear filters · q quit",
        Tab::Projection => "Left/Right years · Up/Down return · +/- contribution · q quit",
    }
}

/// Money amount for display, two decimal places.
pub(crate) fn money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

/// Green for gains, red for losses.
pub(crate) fn gain_style(value: Decimal) -> Style {
    if value < Decimal::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}
