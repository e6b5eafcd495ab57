//! Hypothesis 3 view: multivariate linear regression on systolic BP.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Cell,
    Frame,
};

use crate::application::{HypothesisThreeView, Resource};
use crate::domain::HypothesisThreeResult;
use crate::tui::styles::MedicalTheme;

use super::render_resource;
use super::widgets::{render_page_header, render_result_card, render_stat_card, render_table};

pub fn render_hypothesis_three(
    f: &mut Frame,
    area: Rect,
    resource: &Resource<HypothesisThreeResult>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Hypothesis 3",
        "Which risk factors predict systolic BP? (Multiple linear regression)",
    );
    render_resource(f, chunks[1], resource, "regression analysis", |f, area, data| {
        render_results(f, area, &HypothesisThreeView::from(data));
    });
}

fn render_results(f: &mut Frame, area: Rect, view: &HypothesisThreeView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stat cards
            Constraint::Length(7), // Hypotheses + conclusion
            Constraint::Min(0),    // Coefficients
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    render_stat_card(
        f,
        cards[0],
        "R²",
        &view.r_squared,
        Some(&format!("{} fit", view.fit.label())),
        MedicalTheme::model_fit(view.fit),
    );
    render_stat_card(
        f,
        cards[1],
        "Adjusted R²",
        &view.adjusted_r_squared,
        Some(&format!("{} fit", view.adjusted_fit.label())),
        MedicalTheme::model_fit(view.adjusted_fit),
    );
    render_stat_card(
        f,
        cards[2],
        "F-statistic",
        &view.f_statistic,
        Some(&format!("p = {}", view.f_pvalue)),
        MedicalTheme::text(),
    );
    render_stat_card(
        f,
        cards[3],
        "RMSE",
        &view.rmse,
        Some("Prediction Error"),
        MedicalTheme::info(),
    );

    let (verdict, verdict_style) = if view.model_significant {
        ("Model is statistically significant", MedicalTheme::success())
    } else {
        ("Model is not statistically significant", MedicalTheme::warning())
    };
    let summary = vec![
        Line::from(vec![
            Span::styled("H0: ", MedicalTheme::text_secondary()),
            Span::styled(view.null_hypothesis.clone(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("H1: ", MedicalTheme::text_secondary()),
            Span::styled(view.alternative_hypothesis.clone(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled(
                format!(
                    "{} of {} predictors significant, n = {}. ",
                    view.significant_predictors, view.num_predictors, view.sample_size
                ),
                MedicalTheme::text_secondary(),
            ),
            Span::styled(view.conclusion.clone(), MedicalTheme::text()),
        ]),
    ];
    render_result_card(f, rows[1], "Conclusion", Some((verdict, verdict_style)), summary);

    let coefficient_rows = view
        .rows
        .iter()
        .map(|c| {
            let style = if c.significant {
                MedicalTheme::success()
            } else {
                MedicalTheme::text_muted()
            };
            vec![
                Cell::from(c.predictor.clone()),
                Cell::from(c.coefficient.clone()),
                Cell::from(c.std_error.clone()),
                Cell::from(c.t_statistic.clone()),
                Cell::from(c.p_value.clone()),
                Cell::from(c.confidence_interval.clone()),
                Cell::from(Span::styled(if c.significant { "Yes" } else { "No" }, style)),
            ]
        })
        .collect();

    render_table(
        f,
        rows[2],
        "Coefficients",
        &["Predictor", "Coef", "Std Error", "t", "p-value", "95% CI", "Sig."],
        coefficient_rows,
        &[
            Constraint::Min(18),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Length(5),
        ],
    );
}
