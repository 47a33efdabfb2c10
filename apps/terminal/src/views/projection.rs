//! Projection view: compound-growth chart over the configured horizon.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;
use rust_decimal::prelude::ToPrimitive;

use foliowatch_core::project;

use crate::app::App;
use crate::views::money;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let points = project(&app.projection);
    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (f64::from(p.year), p.value.to_f64().unwrap_or(0.0)))
        .collect();
    let final_value = points.last().map(|p| p.value).unwrap_or_default();

    let inputs = &app.projection;
    let header = Paragraph::new(format!(
        "Start {} · Monthly {} · Return {}% · {} years → {}",
        money(inputs.initial),
        money(inputs.monthly_contribution),
        inputs.annual_return_pct,
        inputs.years,
        money(final_value),
    ))
    .block(Block::default().borders(Borders::ALL).title(" Assumptions "));
    frame.render_widget(header, chunks[0]);

    let y_max = data
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.05;
    let x_max = f64::from(inputs.years.max(1));

    let dataset = Dataset::default()
        .name("projected value")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title("years")
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{}", inputs.years / 2)),
                    Span::raw(format!("{}", inputs.years)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("value")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        )
        .block(Block::default().borders(Borders::ALL).title(" Projection "));
    frame.render_widget(chart, chunks[1]);
}
