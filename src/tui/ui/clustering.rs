//! Clustering view: k-means patient profiles and their disease rates.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Cell,
    Frame,
};

use crate::application::{ClusterView, Resource};
use crate::domain::{ClusterResult, RiskBand};
use crate::tui::styles::MedicalTheme;

use super::render_resource;
use super::widgets::{
    render_bar_chart, render_page_header, render_result_card, render_stat_card, render_table,
    BarDatum,
};

pub fn render_clustering(f: &mut Frame, area: Rect, resource: &Resource<ClusterResult>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_page_header(
        f,
        chunks[0],
        "Clustering",
        "K-means patient profiles ranked by CVD prevalence",
    );
    render_resource(f, chunks[1], resource, "cluster profiles", |f, area, data| {
        render_results(f, area, &ClusterView::from(data));
    });
}

fn render_results(f: &mut Frame, area: Rect, view: &ClusterView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[0]);

    let bars: Vec<BarDatum> = view
        .bars
        .iter()
        .map(|b| BarDatum {
            label: format!("Cluster {}", b.cluster),
            value: b.disease_percentage,
            display: b.label.clone(),
            style: MedicalTheme::risk_band(b.band),
        })
        .collect();
    render_bar_chart(f, left[0], "CVD Prevalence by Cluster", &bars, Some(100.0));

    let rows = view
        .rows
        .iter()
        .map(|r| {
            vec![
                Cell::from(r.cluster.clone()),
                Cell::from(r.age.clone()),
                Cell::from(r.weight.clone()),
                Cell::from(r.bmi.clone()),
                Cell::from(r.systolic.clone()),
                Cell::from(r.diastolic.clone()),
            ]
        })
        .collect();
    render_table(
        f,
        left[1],
        "Cluster Averages",
        &["Cluster", "Age", "Weight", "BMI", "Sys. BP", "Dia. BP"],
        rows,
        &[
            Constraint::Length(11),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Top risk
            Constraint::Length(4), // Profiles found
            Constraint::Length(9), // Legend
            Constraint::Min(0),    // Finding
        ])
        .split(columns[1]);

    let top_style = view
        .bars
        .first()
        .map_or(MedicalTheme::text(), |b| MedicalTheme::risk_band(b.band));
    render_stat_card(
        f,
        right[0],
        "Highest Risk",
        view.top_risk.as_deref().unwrap_or("n/a"),
        None,
        top_style,
    );
    render_stat_card(
        f,
        right[1],
        "Profiles Found",
        &view.profiles_found.to_string(),
        None,
        MedicalTheme::info(),
    );

    let legend = RiskBand::ALL
        .iter()
        .rev()
        .map(|band| {
            Line::from(vec![
                Span::styled("■ ", MedicalTheme::risk_band(*band)),
                Span::styled(band.label(), MedicalTheme::text()),
            ])
        })
        .collect();
    render_result_card(f, right[2], "Risk Bands", None, legend);

    render_result_card(
        f,
        right[3],
        "Finding",
        None,
        vec![Line::from(Span::styled(view.finding.clone(), MedicalTheme::text()))],
    );
}
