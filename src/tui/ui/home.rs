//! Home view: landing page with one card per analysis.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::nav::Route;
use crate::tui::styles::MedicalTheme;

/// Patients in the analysed dataset after cleaning.
const SAMPLE_SIZE: &str = "68,668 patients";

pub fn render_home(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Hero
            Constraint::Min(0),    // Cards
        ])
        .split(area);

    render_hero(f, chunks[0]);
    render_cards(f, chunks[1]);
}

fn render_hero(f: &mut Frame, area: Rect) {
    let hero = Paragraph::new(vec![
        Line::from(Span::styled("♥ CardioAnalytics", MedicalTheme::title())),
        Line::from(Span::styled(
            "Cardiovascular risk analysis and statistical insights dashboard",
            MedicalTheme::subtitle(),
        )),
        Line::from(vec![
            Span::styled("Sample size: ", MedicalTheme::text_secondary()),
            Span::styled(SAMPLE_SIZE, MedicalTheme::text()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(hero, area);
}

fn render_cards(f: &mut Frame, area: Rect) {
    let routes: Vec<Route> = Route::ALL
        .iter()
        .copied()
        .filter(|r| *r != Route::Home)
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            routes
                .iter()
                .map(|_| Constraint::Length(4))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .margin(1)
        .split(area);

    for (route, row) in routes.iter().zip(rows.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(route.description(), MedicalTheme::text())),
            Line::from(vec![
                Span::styled(format!("[{}] ", route.index()), MedicalTheme::key_hint()),
                Span::styled("Open", MedicalTheme::key_desc()),
            ]),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", route.title()), MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(card, *row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::render_to_string;

    #[test]
    fn test_home_lists_every_analysis() {
        let text = render_to_string(100, 32, |f| render_home(f, f.area()));
        assert!(text.contains("CardioAnalytics"));
        for route in Route::ALL.iter().filter(|r| **r != Route::Home) {
            assert!(text.contains(route.title()), "missing card for {route}");
        }
    }
}
