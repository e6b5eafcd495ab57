//! Derived views: display-ready values computed from backend payloads.
//!
//! Views are pure functions of their payload, so re-fetching unchanged data
//! always yields identical strings, bands and orderings.

use crate::domain::{
    ClinicalSignificance, ClusterResult, CoefficientRow, HypothesisOneResult,
    HypothesisThreeResult, HypothesisTwoResult, ModelFit, RiskBand, Significance,
};

/// `0.734` → `"73.4%"`.
#[must_use]
pub fn format_fraction_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// p-values below 0.001 collapse to `"< 0.001"`.
#[must_use]
pub fn format_p_value(p: f64) -> String {
    if p < 0.001 {
        "< 0.001".to_string()
    } else {
        format!("{p:.4}")
    }
}

/// Risk scores print as returned: whole numbers without a fraction,
/// anything else in full.
#[must_use]
pub fn format_risk_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}

/// `68668` → `"68,668"`.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Backend column name to display name: `ap_hi` → `Blood Pressure Hi`.
#[must_use]
pub fn format_predictor_name(raw: &str) -> String {
    if raw == CoefficientRow::INTERCEPT {
        return "Intercept".to_string();
    }

    let spaced = raw.replace('_', " ");
    spaced
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            if word.eq_ignore_ascii_case("ap") {
                "Blood Pressure".to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Systolic BP comparison between patients with and without CVD.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisOneView {
    pub with_disease: String,
    pub without_disease: String,
    /// With-disease mean minus without-disease mean, mmHg.
    pub mean_difference: f64,
    pub mean_difference_display: String,
    pub clinical: ClinicalSignificance,
    pub significance: Significance,
    pub p_value: String,
    pub t_statistic: Option<String>,
    pub degrees_of_freedom: Option<String>,
    pub confidence_interval: Option<String>,
    pub effect_size: Option<String>,
    pub sample_sizes: Option<String>,
    pub conclusion: String,
    /// Bar chart data: (label, mean BP).
    pub chart: Vec<(String, f64)>,
}

impl From<&HypothesisOneResult> for HypothesisOneView {
    fn from(r: &HypothesisOneResult) -> Self {
        let mean_difference = r.group_with_disease_avg_bp - r.group_without_disease_avg_bp;
        let sample_sizes = match (r.sample_size_cvd, r.sample_size_no_cvd) {
            (Some(cvd), Some(no_cvd)) => Some(format!(
                "{} with CVD / {} without",
                format_thousands(cvd),
                format_thousands(no_cvd)
            )),
            _ => None,
        };

        Self {
            with_disease: format!("{:.1} mmHg", r.group_with_disease_avg_bp),
            without_disease: format!("{:.1} mmHg", r.group_without_disease_avg_bp),
            mean_difference,
            mean_difference_display: format!("{mean_difference:.1} mmHg"),
            clinical: ClinicalSignificance::from_mean_difference(mean_difference),
            significance: Significance::from_p_value(r.p_value),
            p_value: format_p_value(r.p_value),
            t_statistic: r.t_statistic.map(|t| format!("{t:.3}")),
            degrees_of_freedom: r.degrees_of_freedom.map(|df| format!("{df:.0}")),
            confidence_interval: r
                .confidence_interval_difference
                .map(|[lo, hi]| format!("[{lo:.2}, {hi:.2}] mmHg")),
            effect_size: r.effect_size.clone(),
            sample_sizes,
            conclusion: r.conclusion.clone(),
            chart: vec![
                ("With Disease".to_string(), r.group_with_disease_avg_bp),
                ("Without Disease".to_string(), r.group_without_disease_avg_bp),
            ],
        }
    }
}

/// A predictor ranked for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPredictor {
    pub rank: usize,
    pub name: String,
    pub magnitude: f64,
}

/// Logistic regression summary.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisTwoView {
    pub baseline_accuracy: String,
    pub cv_accuracy: String,
    pub test_accuracy: String,
    pub accuracy_ci: String,
    pub improvement: String,
    pub roc_auc: String,
    pub cohens_d: String,
    pub significance: Significance,
    pub p_value: String,
    pub significantly_better: bool,
    pub conclusion: String,
    pub predictors: Vec<RankedPredictor>,
}

impl From<&HypothesisTwoResult> for HypothesisTwoView {
    fn from(r: &HypothesisTwoResult) -> Self {
        let predictors = r
            .ranked_predictors()
            .into_iter()
            .enumerate()
            .map(|(i, p)| RankedPredictor {
                rank: i + 1,
                name: format_predictor_name(&p.name),
                magnitude: p.coefficient_magnitude,
            })
            .collect();

        Self {
            baseline_accuracy: format_fraction_percent(r.baseline_accuracy),
            cv_accuracy: format!(
                "{} ± {}",
                format_fraction_percent(r.cv_accuracy_mean),
                format_fraction_percent(r.cv_accuracy_std)
            ),
            test_accuracy: format_fraction_percent(r.test_accuracy),
            accuracy_ci: format!(
                "[{}, {}]",
                format_fraction_percent(r.accuracy_95_ci[0]),
                format_fraction_percent(r.accuracy_95_ci[1])
            ),
            improvement: format!(
                "{:+.1} pts",
                (r.test_accuracy - r.baseline_accuracy) * 100.0
            ),
            roc_auc: format!("{:.3}", r.roc_auc),
            cohens_d: format!("{:.2}", r.cohens_d),
            significance: Significance::from_p_value(r.p_value),
            p_value: format_p_value(r.p_value),
            significantly_better: r.is_significantly_better,
            conclusion: r.conclusion.clone(),
            predictors,
        }
    }
}

/// One formatted coefficient table row.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientView {
    pub predictor: String,
    pub coefficient: String,
    pub std_error: String,
    pub t_statistic: String,
    pub p_value: String,
    pub confidence_interval: String,
    pub significant: bool,
}

impl From<&CoefficientRow> for CoefficientView {
    fn from(c: &CoefficientRow) -> Self {
        Self {
            predictor: format_predictor_name(&c.predictor),
            coefficient: format!("{:.3}", c.coefficient),
            std_error: format!("{:.3}", c.std_error),
            t_statistic: format!("{:.3}", c.t_statistic),
            p_value: format_p_value(c.p_value),
            confidence_interval: format!("[{:.2}, {:.2}]", c.conf_int_lower, c.conf_int_upper),
            significant: c.is_significant,
        }
    }
}

/// Linear regression summary.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisThreeView {
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub sample_size: String,
    pub num_predictors: usize,
    /// Significant rows, intercept excluded.
    pub significant_predictors: usize,
    pub fit: ModelFit,
    pub adjusted_fit: ModelFit,
    pub r_squared: String,
    pub adjusted_r_squared: String,
    pub f_statistic: String,
    pub f_pvalue: String,
    pub rmse: String,
    pub model_significant: bool,
    pub conclusion: String,
    pub rows: Vec<CoefficientView>,
}

impl From<&HypothesisThreeResult> for HypothesisThreeView {
    fn from(r: &HypothesisThreeResult) -> Self {
        let significant_predictors = r
            .coefficients
            .iter()
            .filter(|c| c.is_significant && !c.is_intercept())
            .count();

        Self {
            null_hypothesis: r.null_hypothesis.clone(),
            alternative_hypothesis: r.alternative_hypothesis.clone(),
            sample_size: format_thousands(r.sample_size),
            num_predictors: r.num_predictors,
            significant_predictors,
            fit: ModelFit::from_r_squared(r.r_squared),
            adjusted_fit: ModelFit::from_r_squared(r.adjusted_r_squared),
            r_squared: format_fraction_percent(r.r_squared),
            adjusted_r_squared: format_fraction_percent(r.adjusted_r_squared),
            f_statistic: format!("{:.2}", r.f_statistic),
            f_pvalue: format_p_value(r.f_pvalue),
            rmse: format!("{:.1} mmHg", r.rmse),
            model_significant: r.model_significant,
            conclusion: r.conclusion.clone(),
            rows: r.coefficients.iter().map(CoefficientView::from).collect(),
        }
    }
}

/// One cluster's disease-rate bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterBar {
    pub cluster: i64,
    pub disease_percentage: f64,
    pub label: String,
    pub band: RiskBand,
}

/// One cluster's averages row.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRow {
    pub cluster: String,
    pub age: String,
    pub weight: String,
    pub bmi: String,
    pub systolic: String,
    pub diastolic: String,
}

/// Clustering summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterView {
    pub finding: String,
    pub profiles_found: usize,
    /// Highest-risk cluster, e.g. `"Cluster 2 (78.9%)"`.
    pub top_risk: Option<String>,
    /// Sorted by disease percentage, highest first.
    pub bars: Vec<ClusterBar>,
    /// Backend order.
    pub rows: Vec<ClusterRow>,
}

impl From<&ClusterResult> for ClusterView {
    fn from(r: &ClusterResult) -> Self {
        let bars: Vec<ClusterBar> = r
            .sorted_by_risk()
            .into_iter()
            .map(|c| ClusterBar {
                cluster: c.cluster,
                disease_percentage: c.disease_percentage,
                label: format!("{:.1}%", c.disease_percentage),
                band: RiskBand::from_disease_percentage(c.disease_percentage),
            })
            .collect();

        let top_risk = bars
            .first()
            .map(|top| format!("Cluster {} ({})", top.cluster, top.label));

        let rows = r
            .analysis_by_cluster
            .iter()
            .map(|c| ClusterRow {
                cluster: format!("Cluster {}", c.cluster),
                age: format!("{:.1}", c.age_years),
                weight: format!("{:.1}", c.weight),
                bmi: format!("{:.1}", c.bmi),
                systolic: format!("{:.1}", c.ap_hi),
                diastolic: format!("{:.1}", c.ap_lo),
            })
            .collect();

        Self {
            finding: r.finding.clone(),
            profiles_found: r.analysis_by_cluster.len(),
            top_risk,
            bars,
            rows,
        }
    }
}
