//! Presentation primitives shared by every page.
//!
//! Each function draws into the given area and holds no state of its own.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Shown whenever a page fetch fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Failed to load data.";

/// One bar in a bar chart.
#[derive(Debug, Clone)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    /// Text drawn on the bar, e.g. `"78.9%"`.
    pub display: String,
    pub style: Style,
}

/// Page title strip.
pub fn render_page_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(subtitle.to_string(), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Single headline number with an optional caption.
pub fn render_stat_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    caption: Option<&str>,
    value_style: Style,
) {
    let mut lines = vec![Line::from(Span::styled(
        value.to_string(),
        value_style.add_modifier(ratatui::style::Modifier::BOLD),
    ))];
    if let Some(caption) = caption {
        lines.push(Line::from(Span::styled(
            caption.to_string(),
            MedicalTheme::text_muted(),
        )));
    }

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(card, area);
}

/// Titled card with a colored verdict badge above wrapped body text.
pub fn render_result_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    badge: Option<(&str, Style)>,
    body: Vec<Line<'_>>,
) {
    let mut lines = Vec::with_capacity(body.len() + 2);
    if let Some((label, style)) = badge {
        lines.push(Line::from(Span::styled(format!("● {label}"), style)));
        lines.push(Line::from(""));
    }
    lines.extend(body);

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(card, area);
}

/// Vertical bar chart.
///
/// Values are drawn at one-decimal resolution; `max` pins the top of the
/// scale (e.g. 100 for percentages), otherwise the largest bar fills it.
pub fn render_bar_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    data: &[BarDatum],
    max: Option<f64>,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if data.is_empty() {
        let empty = Paragraph::new(Span::styled("No data", MedicalTheme::text_muted()))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = data
        .iter()
        .map(|d| {
            Bar::default()
                .value(scaled(d.value))
                .text_value(d.display.clone())
                .label(Line::from(d.label.clone()))
                .style(d.style)
                .value_style(MedicalTheme::selected())
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let slots = u16::try_from(data.len()).unwrap_or(u16::MAX);
    let bar_width = (inner_width / slots.max(1)).saturating_sub(2).clamp(3, 16);

    let mut chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2);
    if let Some(max) = max {
        chart = chart.max(scaled(max));
    }

    f.render_widget(chart, area);
}

fn scaled(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * 10.0).round() as u64
    } else {
        0
    }
}

/// Table with a highlighted header row.
pub fn render_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    header: &[&str],
    rows: Vec<Vec<Cell<'_>>>,
    widths: &[Constraint],
) {
    let header = Row::new(header.iter().map(|h| Cell::from(h.to_string())))
        .style(MedicalTheme::header());

    let table = Table::new(rows.into_iter().map(Row::new), widths.to_vec())
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(table, area);
}

pub fn render_loading(f: &mut Frame, area: Rect, what: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("Loading {what}..."), MedicalTheme::text_muted())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

pub fn render_failure(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(FAILURE_MESSAGE, MedicalTheme::danger())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[R] ", MedicalTheme::key_hint()),
            Span::styled("Reload", MedicalTheme::key_desc()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}
