//! Hypothesis 1 view: systolic BP with vs. without cardiovascular disease.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    Frame,
};

use crate::application::{HypothesisOneView, Resource};
use crate::domain::HypothesisOneResult;
use crate::tui::styles::MedicalTheme;

use super::render_resource;
use super::widgets::{
    render_bar_chart, render_page_header, render_result_card, render_stat_card, BarDatum,
};

pub fn render_hypothesis_one(f: &mut Frame, area: Rect, resource: &Resource<HypothesisOneResult>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Hypothesis 1",
        "Do patients with CVD have higher systolic blood pressure? (Welch's t-test)",
    );
    render_resource(f, chunks[1], resource, "results", |f, area, data| {
        render_results(f, area, &HypothesisOneView::from(data));
    });
}

fn render_results(f: &mut Frame, area: Rect, view: &HypothesisOneView) {
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
        "With CVD",
        &view.with_disease,
        Some("mean systolic BP"),
        MedicalTheme::danger(),
    );
    render_stat_card(
        f,
        cards[1],
        "Without CVD",
        &view.without_disease,
        Some("mean systolic BP"),
        MedicalTheme::success(),
    );
    render_stat_card(
        f,
        cards[2],
        "Difference",
        &view.mean_difference_display,
        Some(view.clinical.label()),
        MedicalTheme::clinical(view.clinical),
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

    let bars: Vec<BarDatum> = view
        .chart
        .iter()
        .enumerate()
        .map(|(i, (label, value))| BarDatum {
            label: label.clone(),
            value: *value,
            display: format!("{value:.1}"),
            style: if i == 0 {
                MedicalTheme::danger()
            } else {
                MedicalTheme::success()
            },
        })
        .collect();
    render_bar_chart(f, body[0], "Mean Systolic BP (mmHg)", &bars, None);

    let mut details = vec![Line::from(Span::styled(
        view.conclusion.clone(),
        MedicalTheme::text(),
    ))];
    let extras = [
        ("t-statistic", view.t_statistic.as_deref()),
        ("Degrees of freedom", view.degrees_of_freedom.as_deref()),
        ("95% CI of difference", view.confidence_interval.as_deref()),
        ("Effect size", view.effect_size.as_deref()),
        ("Samples", view.sample_sizes.as_deref()),
    ];
    if extras.iter().any(|(_, v)| v.is_some()) {
        details.push(Line::from(""));
    }
    for (label, value) in extras {
        if let Some(value) = value {
            details.push(Line::from(vec![
                Span::styled(format!("{label}: "), MedicalTheme::text_secondary()),
                Span::styled(value.to_string(), MedicalTheme::text()),
            ]));
        }
    }

    render_result_card(
        f,
        body[1],
        "Conclusion",
        Some((view.significance.label(), MedicalTheme::significance(view.significance))),
        details,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ApiError;
    use crate::tui::ui::render_to_string;
    use crate::tui::ui::widgets::FAILURE_MESSAGE;

    fn sample() -> HypothesisOneResult {
        serde_json::from_value(serde_json::json!({
            "group_with_disease_avg_bp": 133.9,
            "group_without_disease_avg_bp": 119.6,
            "p_value": 0.0,
            "conclusion": "Reject H0: patients with CVD have higher systolic BP.",
            "t_statistic": 97.3,
            "sample_size_cvd": 34000,
            "sample_size_no_cvd": 34668
        }))
        .expect("Should parse fixture")
    }

    #[test]
    fn test_renders_success() {
        let mut res = Resource::new("hypothesis-1");
        let ticket = res.begin();
        res.complete(ticket, Ok(sample()));

        let text = render_to_string(120, 30, |f| render_hypothesis_one(f, f.area(), &res));
        assert!(text.contains("133.9 mmHg"));
        assert!(text.contains("14.3 mmHg"));
        assert!(text.contains("< 0.001"));
        assert!(text.contains("Highly Significant"));
        assert!(text.contains("Last updated"));
        assert!(!text.contains(FAILURE_MESSAGE));
    }

    #[test]
    fn test_renders_failure_without_data() {
        let mut res: Resource<HypothesisOneResult> = Resource::new("hypothesis-1");
        let ticket = res.begin();
        res.complete(ticket, Err(ApiError::Status(500)));

        let text = render_to_string(100, 20, |f| render_hypothesis_one(f, f.area(), &res));
        assert!(text.contains(FAILURE_MESSAGE));
        assert!(!text.contains("mmHg"));
    }

    #[test]
    fn test_renders_loading() {
        let mut res: Resource<HypothesisOneResult> = Resource::new("hypothesis-1");
        res.begin();
        let text = render_to_string(100, 20, |f| render_hypothesis_one(f, f.area(), &res));
        assert!(text.contains("Loading results..."));
    }
}
