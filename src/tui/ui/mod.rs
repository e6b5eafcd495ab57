//! UI module: View components for the TUI.

pub mod clustering;
pub mod home;
pub mod hypothesis_one;
pub mod hypothesis_three;
pub mod hypothesis_two;
pub mod risk_score;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{Resource, ResourceState};
use crate::tui::styles::MedicalTheme;

/// Render a page body from its resource: loading and failure panels for
/// the in-between states, `render_data` once the payload is in.
pub fn render_resource<T, F>(
    f: &mut Frame,
    area: Rect,
    resource: &Resource<T>,
    what: &str,
    render_data: F,
) where
    F: FnOnce(&mut Frame, Rect, &T),
{
    match resource.state() {
        ResourceState::Idle | ResourceState::Loading => widgets::render_loading(f, area, what),
        ResourceState::Failed(_) => widgets::render_failure(f, area),
        ResourceState::Success(data) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(area);
            render_data(f, chunks[0], data);

            if let Some(at) = resource.fetched_at() {
                let updated = Paragraph::new(Span::styled(
                    format!("Last updated {}", at.format("%H:%M:%S UTC")),
                    MedicalTheme::text_muted(),
                ))
                .alignment(Alignment::Right);
                f.render_widget(updated, chunks[1]);
            }
        }
    }
}

/// Global key hints plus page-specific ones.
pub fn render_footer(f: &mut Frame, area: Rect, page_hints: &[(&str, &str)]) {
    let mut spans = vec![
        Span::styled("[Tab/←→] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[0-5] ", MedicalTheme::key_hint()),
        Span::styled("Jump ", MedicalTheme::key_desc()),
    ];
    for (key, desc) in page_hints {
        spans.push(Span::styled(format!("[{key}] "), MedicalTheme::key_hint()));
        spans.push(Span::styled(format!("{desc} "), MedicalTheme::key_desc()));
    }
    spans.push(Span::styled("[Q] ", MedicalTheme::key_hint()));
    spans.push(Span::styled("Quit", MedicalTheme::key_desc()));

    let footer = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(footer, area);
}

/// Draw into an off-screen buffer and return its text, row by row.
#[cfg(test)]
pub(crate) fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut Frame),
{
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal =
        Terminal::new(TestBackend::new(width, height)).expect("Should create test terminal");
    terminal.draw(draw).expect("Should draw");

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
