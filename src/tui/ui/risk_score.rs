//! Risk score view: calculator form and banded result.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::views::format_risk_score;
use crate::application::{RiskField, RiskFormState};
use crate::domain::RiskBand;
use crate::tui::styles::MedicalTheme;

use super::widgets::render_page_header;

pub fn render_risk_score(f: &mut Frame, area: Rect, state: &RiskFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Risk Score",
        "Estimate cardiovascular risk from age, weight, blood pressure and cholesterol",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[1]);

    render_form(f, columns[0], state);
    render_result(f, columns[1], state);
}

fn render_form(f: &mut Frame, area: Rect, state: &RiskFormState) {
    let field_height = 3;
    let constraints: Vec<Constraint> = RiskField::ALL
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain([Constraint::Length(3), Constraint::Min(0)])
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in RiskField::ALL.iter().enumerate() {
        let is_selected = state.selected_field() == *field;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };
        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} · {} ", field.label(), field.hint()),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match state.value(*field) {
            Some(text) => text.to_string(),
            None => format!("‹ {} ›", state.cholesterol.label()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(value, MedicalTheme::text()),
            if is_selected && *field != RiskField::Cholesterol {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }

    let button_row = RiskField::ALL.len();
    let (label, style) = if state.is_submitting() {
        ("Calculating...", MedicalTheme::text_muted())
    } else {
        ("[Enter] Calculate", MedicalTheme::key_hint())
    };
    let button = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
    f.render_widget(button, chunks[button_row]);

    if let Some(err) = &state.input_error {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ]))
        .wrap(Wrap { trim: true });
        f.render_widget(error, chunks[button_row + 1]);
    }
}

fn render_result(f: &mut Frame, area: Rect, state: &RiskFormState) {
    let block = Block::default()
        .title(Span::styled(" Your Risk ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let lines = match (state.score(), state.band()) {
        (Some(score), Some(band)) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format_risk_score(score),
                MedicalTheme::risk_band(band),
            )),
            Line::from(Span::styled(band.label(), MedicalTheme::risk_band(band))),
            Line::from(""),
            Line::from(Span::styled(band.guidance(), MedicalTheme::text_secondary())),
            Line::from(""),
            render_scale(band),
        ],
        _ if state.is_submitting() => vec![
            Line::from(""),
            Line::from(Span::styled("Calculating...", MedicalTheme::text_muted())),
        ],
        _ => vec![
            Line::from(""),
            Line::from(Span::styled("Not yet calculated", MedicalTheme::text_muted())),
            Line::from(""),
            Line::from(Span::styled(
                "Fill in the form and press Enter",
                MedicalTheme::text_secondary(),
            )),
        ],
    };

    let result = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(result, area);
}

/// Five-step scale with the current band marked.
fn render_scale(current: RiskBand) -> Line<'static> {
    let spans = RiskBand::ALL
        .iter()
        .map(|band| {
            let glyph = if *band == current { "█████" } else { "▁▁▁▁▁" };
            Span::styled(glyph, MedicalTheme::risk_band(*band))
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}
