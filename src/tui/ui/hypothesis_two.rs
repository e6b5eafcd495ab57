//! Hypothesis 2 view: logistic regression vs. the majority-class baseline.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Cell,
    Frame,
};

use crate::application::{HypothesisTwoView, Resource};
use crate::domain::HypothesisTwoResult;
use crate::tui::styles::MedicalTheme;

use super::render_resource;
use super::widgets::{render_page_header, render_result_card, render_stat_card, render_table};

pub fn render_hypothesis_two(f: &mut Frame, area: Rect, resource: &Resource<HypothesisTwoResult>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Hypothesis 2",
        "Do clinical variables predict CVD better than chance? (Logistic regression)",
    );
    render_resource(f, chunks[1], resource, "model results", |f, area, data| {
        render_results(f, area, &HypothesisTwoView::from(data));
    });
}

fn render_results(f: &mut Frame, area: Rect, view: &HypothesisTwoView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    render_stat_card(
        f,
        cards[0],
        "Baseline",
        &view.baseline_accuracy,
        Some("majority class"),
        MedicalTheme::text_secondary(),
    );
    render_stat_card(
        f,
        cards[1],
        "Test Accuracy",
        &view.test_accuracy,
        Some(&view.improvement),
        MedicalTheme::info(),
    );
    render_stat_card(
        f,
        cards[2],
        "ROC AUC",
        &view.roc_auc,
        Some("discrimination"),
        MedicalTheme::text(),
    );
    render_stat_card(
        f,
        cards[3],
        "p-value",
        &view.p_value,
        Some(view.significance.label()),
        MedicalTheme::significance(view.significance),
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let predictor_rows = view
        .predictors
        .iter()
        .map(|p| {
            vec![
                Cell::from(format!("#{}", p.rank)),
                Cell::from(p.name.clone()),
                Cell::from(format!("{:.3}", p.magnitude)),
            ]
        })
        .collect();
    render_table(
        f,
        body[0],
        "Most Important Predictors",
        &["Rank", "Predictor", "|Coefficient|"],
        predictor_rows,
        &[Constraint::Length(5), Constraint::Min(12), Constraint::Length(13)],
    );

    let (verdict, verdict_style) = if view.significantly_better {
        ("Significantly better than baseline", MedicalTheme::success())
    } else {
        ("Not significantly better than baseline", MedicalTheme::warning())
    };

    let details = vec![
        Line::from(Span::styled(view.conclusion.clone(), MedicalTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("CV accuracy: ", MedicalTheme::text_secondary()),
            Span::styled(view.cv_accuracy.clone(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("95% CI: ", MedicalTheme::text_secondary()),
            Span::styled(view.accuracy_ci.clone(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("Cohen's d: ", MedicalTheme::text_secondary()),
            Span::styled(view.cohens_d.clone(), MedicalTheme::text()),
        ]),
    ];

    render_result_card(f, body[1], "Conclusion", Some((verdict, verdict_style)), details);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::render_to_string;

    #[test]
    fn test_predictors_render_in_rank_order() {
        let data: HypothesisTwoResult = serde_json::from_value(serde_json::json!({
            "baseline_accuracy": 0.5,
            "cv_accuracy_mean": 0.72,
            "cv_accuracy_std": 0.01,
            "test_accuracy": 0.728,
            "accuracy_95_ci": [0.72, 0.736],
            "roc_auc": 0.79,
            "p_value": 0.0001,
            "cohens_d": 0.8,
            "is_significantly_better": true,
            "conclusion": "The model beats the baseline.",
            "most_important_predictors": [
                {"name": "cholesterol", "coefficient_magnitude": 0.35},
                {"name": "ap_hi", "coefficient_magnitude": 0.92},
                {"name": "age_years", "coefficient_magnitude": 0.41}
            ]
        }))
        .expect("Should parse fixture");

        let mut res = Resource::new("hypothesis-2");
        let ticket = res.begin();
        res.complete(ticket, Ok(data));

        let text = render_to_string(130, 30, |f| render_hypothesis_two(f, f.area(), &res));
        let bp = text.find("Blood Pressure Hi").expect("Should list ap_hi");
        let age = text.find("Age Years").expect("Should list age");
        let chol = text.find("Cholesterol").expect("Should list cholesterol");
        assert!(bp < age && age < chol);
        assert!(text.contains("72.8%"));
        assert!(text.contains("+22.8 pts"));
        assert!(text.contains("Significantly better than baseline"));
    }
}
