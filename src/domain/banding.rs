//! Banding: mapping continuous statistics onto small labeled categories.
//!
//! All thresholds live here so every page applies the same cutoffs.

use serde::{Deserialize, Serialize};

/// Five-step severity band shared by cluster disease rates and risk scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    LowModerate,
    Moderate,
    ModerateHigh,
    High,
}

impl RiskBand {
    /// All bands, lowest first.
    pub const ALL: [RiskBand; 5] = [
        Self::Low,
        Self::LowModerate,
        Self::Moderate,
        Self::ModerateHigh,
        Self::High,
    ];

    /// Band for a disease percentage in `[0, 100]`.
    ///
    /// Cutoffs are strict: exactly 80.0 is still `ModerateHigh`.
    #[must_use]
    pub fn from_disease_percentage(percentage: f64) -> Self {
        if percentage > 80.0 {
            Self::High
        } else if percentage > 60.0 {
            Self::ModerateHigh
        } else if percentage > 40.0 {
            Self::Moderate
        } else if percentage > 20.0 {
            Self::LowModerate
        } else {
            Self::Low
        }
    }

    /// Band for an ordinal risk score on the 1..=5 scale.
    ///
    /// The score is rounded to the nearest integer and clamped into range;
    /// non-finite scores have no band.
    #[must_use]
    pub fn from_risk_score(score: f64) -> Option<Self> {
        if !score.is_finite() {
            return None;
        }
        let idx = score.round().clamp(1.0, 5.0) as usize - 1;
        Some(Self::ALL[idx])
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::LowModerate => "Low-Moderate Risk",
            Self::Moderate => "Moderate Risk",
            Self::ModerateHigh => "Moderate-High Risk",
            Self::High => "High Risk",
        }
    }

    /// Guidance line shown next to a risk score.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Low => "Maintain current habits and routine check-ups",
            Self::LowModerate => "Monitor blood pressure and cholesterol periodically",
            Self::Moderate => "Lifestyle changes and follow-up recommended",
            Self::ModerateHigh => "Clinical follow-up advised",
            Self::High => "Prompt clinical consultation recommended",
        }
    }

    /// Associated RGB color for display.
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),          // #10B981
            Self::LowModerate => (250, 204, 21),  // #FACC15
            Self::Moderate => (251, 146, 60),     // #FB923C
            Self::ModerateHigh => (239, 68, 68),  // #EF4444
            Self::High => (107, 33, 168),         // #6B21A8
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Statistical significance of a p-value.
///
/// Variants are ordered from most to least significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Significance {
    HighlySignificant,
    VerySignificant,
    Significant,
    NotSignificant,
}

impl Significance {
    /// Conventional alpha level.
    pub const ALPHA: f64 = 0.05;

    #[must_use]
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.001 {
            Self::HighlySignificant
        } else if p < 0.01 {
            Self::VerySignificant
        } else if p < Self::ALPHA {
            Self::Significant
        } else {
            Self::NotSignificant
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlySignificant => "Highly Significant",
            Self::VerySignificant => "Very Significant",
            Self::Significant => "Significant",
            Self::NotSignificant => "Not Significant",
        }
    }

    #[must_use]
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::NotSignificant)
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical relevance of a mean systolic BP difference (mmHg).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClinicalSignificance {
    ClinicallySignificant,
    Borderline,
    NotClinicallySignificant,
}

impl ClinicalSignificance {
    #[must_use]
    pub fn from_mean_difference(delta: f64) -> Self {
        let magnitude = delta.abs();
        if magnitude >= 5.0 {
            Self::ClinicallySignificant
        } else if magnitude >= 2.0 {
            Self::Borderline
        } else {
            Self::NotClinicallySignificant
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ClinicallySignificant => "Clinically Significant",
            Self::Borderline => "Borderline",
            Self::NotClinicallySignificant => "Not Clinically Significant",
        }
    }
}

impl std::fmt::Display for ClinicalSignificance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Goodness of fit for a regression model, from R².
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFit {
    Strong,
    Moderate,
    Weak,
}

impl ModelFit {
    #[must_use]
    pub fn from_r_squared(r_squared: f64) -> Self {
        if r_squared >= 0.7 {
            Self::Strong
        } else if r_squared >= 0.3 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}
