//! Precomputed analysis results served by the statistics backend.
//!
//! These mirror the backend JSON field names one-to-one. Nothing here is
//! computed locally; `validate()` only rejects payloads that break the
//! documented ranges.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

fn check_probability(errors: &mut Vec<String>, name: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{name} {value} out of range [0, 1]"));
    }
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Welch's t-test comparing systolic BP between patients with and without CVD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisOneResult {
    pub group_with_disease_avg_bp: f64,
    pub group_without_disease_avg_bp: f64,
    pub p_value: f64,
    pub conclusion: String,
    #[serde(default)]
    pub t_statistic: Option<f64>,
    #[serde(default)]
    pub degrees_of_freedom: Option<f64>,
    #[serde(default)]
    pub confidence_interval_difference: Option<[f64; 2]>,
    #[serde(default)]
    pub effect_size: Option<String>,
    #[serde(default)]
    pub sample_size_cvd: Option<u64>,
    #[serde(default)]
    pub sample_size_no_cvd: Option<u64>,
}

impl HypothesisOneResult {
    /// # Errors
    /// Returns every violated range as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_probability(&mut errors, "p_value", self.p_value);
        for (name, bp) in [
            ("group_with_disease_avg_bp", self.group_with_disease_avg_bp),
            ("group_without_disease_avg_bp", self.group_without_disease_avg_bp),
        ] {
            if !bp.is_finite() || bp <= 0.0 {
                errors.push(format!("{name} {bp} must be a positive BP value"));
            }
        }
        into_result(errors)
    }
}

/// One ranked predictor from the logistic regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictor {
    pub name: String,
    pub coefficient_magnitude: f64,
}

/// Logistic regression predicting CVD presence against a majority-class baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTwoResult {
    pub baseline_accuracy: f64,
    pub cv_accuracy_mean: f64,
    pub cv_accuracy_std: f64,
    pub test_accuracy: f64,
    pub accuracy_95_ci: [f64; 2],
    pub roc_auc: f64,
    pub p_value: f64,
    pub cohens_d: f64,
    pub is_significantly_better: bool,
    pub conclusion: String,
    pub most_important_predictors: Vec<Predictor>,
}

impl HypothesisTwoResult {
    /// # Errors
    /// Returns every violated range as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_probability(&mut errors, "baseline_accuracy", self.baseline_accuracy);
        check_probability(&mut errors, "cv_accuracy_mean", self.cv_accuracy_mean);
        check_probability(&mut errors, "test_accuracy", self.test_accuracy);
        check_probability(&mut errors, "accuracy_95_ci[0]", self.accuracy_95_ci[0]);
        check_probability(&mut errors, "accuracy_95_ci[1]", self.accuracy_95_ci[1]);
        check_probability(&mut errors, "roc_auc", self.roc_auc);
        check_probability(&mut errors, "p_value", self.p_value);
        into_result(errors)
    }

    /// Predictors ordered by coefficient magnitude, largest first.
    #[must_use]
    pub fn ranked_predictors(&self) -> Vec<Predictor> {
        let mut ranked = self.most_important_predictors.clone();
        ranked.sort_by(|a, b| b.coefficient_magnitude.total_cmp(&a.coefficient_magnitude));
        ranked
    }
}

/// One row of the OLS coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    pub predictor: String,
    pub coefficient: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub conf_int_lower: f64,
    pub conf_int_upper: f64,
    pub is_significant: bool,
}

impl CoefficientRow {
    /// Name the backend uses for the intercept term.
    pub const INTERCEPT: &'static str = "const";

    #[must_use]
    pub fn is_intercept(&self) -> bool {
        self.predictor == Self::INTERCEPT
    }
}

/// Multiple linear regression predicting systolic BP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisThreeResult {
    pub null_hypothesis: String,
    pub alternative_hypothesis: String,
    pub sample_size: u64,
    pub num_predictors: usize,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    pub f_statistic: f64,
    pub f_pvalue: f64,
    pub rmse: f64,
    pub coefficients: Vec<CoefficientRow>,
    pub model_significant: bool,
    pub conclusion: String,
}

impl HypothesisThreeResult {
    /// # Errors
    /// Returns every violated range as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_probability(&mut errors, "r_squared", self.r_squared);
        check_probability(&mut errors, "f_pvalue", self.f_pvalue);

        let rows = self.coefficients.len();
        if rows != self.num_predictors && rows != self.num_predictors + 1 {
            errors.push(format!(
                "expected {} coefficient rows (+1 for intercept), got {}",
                self.num_predictors, rows
            ));
        }
        into_result(errors)
    }
}

/// Mean profile of one k-means cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster: i64,
    pub age_years: f64,
    pub weight: f64,
    pub height: f64,
    pub ap_hi: f64,
    pub ap_lo: f64,
    pub bmi: f64,
    pub disease_percentage: f64,
}

/// K-means clustering summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub finding: String,
    pub analysis_by_cluster: Vec<ClusterProfile>,
}

impl ClusterResult {
    /// # Errors
    /// Returns every violated range as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for profile in &self.analysis_by_cluster {
            if !(0.0..=100.0).contains(&profile.disease_percentage) {
                errors.push(format!(
                    "cluster {} disease_percentage {} out of range [0, 100]",
                    profile.cluster, profile.disease_percentage
                ));
            }
            if !seen.insert(profile.cluster) {
                errors.push(format!("duplicate cluster id {}", profile.cluster));
            }
        }
        into_result(errors)
    }

    /// Profiles ordered by disease percentage, highest risk first.
    #[must_use]
    pub fn sorted_by_risk(&self) -> Vec<ClusterProfile> {
        let mut sorted = self.analysis_by_cluster.clone();
        sorted.sort_by(|a, b| b.disease_percentage.total_cmp(&a.disease_percentage));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(cluster: i64, disease_percentage: f64) -> ClusterProfile {
        ClusterProfile {
            cluster,
            age_years: 52.0,
            weight: 74.0,
            height: 165.0,
            ap_hi: 128.0,
            ap_lo: 82.0,
            bmi: 27.1,
            disease_percentage,
        }
    }

    #[test]
    fn test_hypothesis_one_optional_fields_default() {
        let json = r#"{
            "group_with_disease_avg_bp": 135.4,
            "group_without_disease_avg_bp": 121.1,
            "p_value": 0.0,
            "conclusion": "Reject null hypothesis"
        }"#;
        let parsed: HypothesisOneResult = serde_json::from_str(json).expect("Should parse");
        assert!(parsed.t_statistic.is_none());
        assert!(parsed.confidence_interval_difference.is_none());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_hypothesis_one_rejects_bad_p_value() {
        let json = r#"{
            "group_with_disease_avg_bp": 135.4,
            "group_without_disease_avg_bp": 121.1,
            "p_value": 1.5,
            "conclusion": "?"
        }"#;
        let parsed: HypothesisOneResult = serde_json::from_str(json).expect("Should parse");
        let errors = parsed.validate().expect_err("Should reject p > 1");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_field_is_a_decode_error() {
        let json = r#"{"group_with_disease_avg_bp": 135.4, "p_value": 0.01}"#;
        assert!(serde_json::from_str::<HypothesisOneResult>(json).is_err());
    }

    #[test]
    fn test_predictors_ranked_descending() {
        let result = HypothesisTwoResult {
            baseline_accuracy: 0.5,
            cv_accuracy_mean: 0.72,
            cv_accuracy_std: 0.01,
            test_accuracy: 0.73,
            accuracy_95_ci: [0.71, 0.74],
            roc_auc: 0.79,
            p_value: 0.0001,
            cohens_d: 1.2,
            is_significantly_better: true,
            conclusion: String::new(),
            most_important_predictors: vec![
                Predictor { name: "cholesterol".into(), coefficient_magnitude: 0.35 },
                Predictor { name: "ap_hi".into(), coefficient_magnitude: 0.91 },
                Predictor { name: "age_years".into(), coefficient_magnitude: 0.42 },
            ],
        };
        let names: Vec<_> = result.ranked_predictors().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["ap_hi", "age_years", "cholesterol"]);
    }

    #[test]
    fn test_coefficient_row_count() {
        let row = CoefficientRow {
            predictor: "const".into(),
            coefficient: 90.0,
            std_error: 1.0,
            t_statistic: 90.0,
            p_value: 0.0,
            conf_int_lower: 88.0,
            conf_int_upper: 92.0,
            is_significant: true,
        };
        let mut result = HypothesisThreeResult {
            null_hypothesis: String::new(),
            alternative_hypothesis: String::new(),
            sample_size: 100,
            num_predictors: 1,
            r_squared: 0.1,
            adjusted_r_squared: 0.09,
            f_statistic: 10.0,
            f_pvalue: 0.001,
            rmse: 15.0,
            coefficients: vec![row.clone(), row.clone()],
            model_significant: true,
            conclusion: String::new(),
        };
        assert!(result.validate().is_ok());

        result.coefficients.push(row);
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_clusters_sorted_by_risk() {
        let result = ClusterResult {
            finding: String::new(),
            analysis_by_cluster: vec![profile(0, 45.2), profile(1, 12.0), profile(2, 78.9)],
        };
        let order: Vec<f64> = result
            .sorted_by_risk()
            .iter()
            .map(|c| c.disease_percentage)
            .collect();
        assert_eq!(order, [78.9, 45.2, 12.0]);
        // Backend order is untouched.
        assert_eq!(result.analysis_by_cluster[0].cluster, 0);
    }

    #[test]
    fn test_cluster_validation() {
        let dup = ClusterResult {
            finding: String::new(),
            analysis_by_cluster: vec![profile(0, 10.0), profile(0, 20.0)],
        };
        assert!(dup.validate().is_err());

        let out_of_range = ClusterResult {
            finding: String::new(),
            analysis_by_cluster: vec![profile(0, 101.0)],
        };
        assert!(out_of_range.validate().is_err());
    }
}
