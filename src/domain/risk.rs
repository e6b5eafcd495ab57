//! Risk calculator input and output.

use serde::{Deserialize, Serialize};

use super::banding::RiskBand;

/// Cholesterol category as coded in the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cholesterol {
    #[default]
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Cholesterol {
    pub const ALL: [Cholesterol; 3] = [Self::Normal, Self::AboveNormal, Self::WellAboveNormal];

    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::AboveNormal => 2,
            Self::WellAboveNormal => 3,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::AboveNormal => "Above Normal",
            Self::WellAboveNormal => "Well Above Normal",
        }
    }

    /// Next category, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::AboveNormal,
            Self::AboveNormal => Self::WellAboveNormal,
            Self::WellAboveNormal => Self::Normal,
        }
    }

    /// Previous category, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Normal => Self::WellAboveNormal,
            Self::AboveNormal => Self::Normal,
            Self::WellAboveNormal => Self::AboveNormal,
        }
    }
}

impl From<Cholesterol> for u8 {
    fn from(value: Cholesterol) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for Cholesterol {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Normal),
            2 => Ok(Self::AboveNormal),
            3 => Ok(Self::WellAboveNormal),
            other => Err(format!("cholesterol must be 1, 2 or 3, got {other}")),
        }
    }
}

/// Body of `POST /calculate-risk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFormInput {
    pub age: f64,
    pub weight: f64,
    pub ap_hi: f64,
    pub cholesterol: Cholesterol,
}

impl RiskFormInput {
    /// # Errors
    /// Returns every non-positive field as a message.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let fields = [
            ("Age", self.age),
            ("Weight", self.weight),
            ("Systolic BP", self.ap_hi),
        ];
        let errors: Vec<String> = fields
            .into_iter()
            .filter(|(_, v)| !v.is_finite() || *v <= 0.0)
            .map(|(name, v)| format!("{name} {v} must be greater than 0"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for RiskFormInput {
    fn default() -> Self {
        Self {
            age: 50.0,
            weight: 70.0,
            ap_hi: 120.0,
            cholesterol: Cholesterol::Normal,
        }
    }
}

/// Response of `POST /calculate-risk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub risk_score: f64,
}

impl RiskScoreResult {
    /// # Errors
    /// Rejects a non-finite score.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if self.risk_score.is_finite() {
            Ok(())
        } else {
            Err(vec![format!("risk_score {} is not a number", self.risk_score)])
        }
    }

    #[must_use]
    pub fn band(&self) -> Option<RiskBand> {
        RiskBand::from_risk_score(self.risk_score)
    }
}
