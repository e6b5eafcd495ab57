//! Analysis API port: Trait for the external statistics backend.
//!
//! This trait abstracts the HTTP transport from the page controllers so they
//! can be driven by an in-memory fake in tests.

use crate::domain::{
    ClusterResult, HypothesisOneResult, HypothesisThreeResult, HypothesisTwoResult,
    RiskFormInput, RiskScoreResult,
};

/// Errors returned by the statistics backend.
///
/// Every variant ends up as the same "failed to load" state in the UI; the
/// distinction only reaches the logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Response failed validation: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Build an `Invalid` error from `validate()` messages.
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self::Invalid(errors.join(", "))
    }
}

/// The three precomputed hypothesis tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HypothesisId {
    One,
    Two,
    Three,
}

impl HypothesisId {
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Backend path, relative to the API base.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/hypothesis-{}", self.number())
    }
}

/// Path of the clustering endpoint.
pub const CLUSTERING_PATH: &str = "/k-means-clustering";

/// Path of the risk calculator endpoint.
pub const RISK_PATH: &str = "/calculate-risk";

/// Read-only access to precomputed analyses plus the risk calculator.
///
/// Calls are single-attempt: no retry, no custom timeout.
pub trait AnalysisApi: Send + Sync {
    /// `GET /hypothesis-1`
    ///
    /// # Errors
    /// Transport failure, non-2xx status, or a malformed payload.
    fn fetch_hypothesis_one(&self) -> Result<HypothesisOneResult, ApiError>;

    /// `GET /hypothesis-2`
    ///
    /// # Errors
    /// Transport failure, non-2xx status, or a malformed payload.
    fn fetch_hypothesis_two(&self) -> Result<HypothesisTwoResult, ApiError>;

    /// `GET /hypothesis-3`
    ///
    /// # Errors
    /// Transport failure, non-2xx status, or a malformed payload.
    fn fetch_hypothesis_three(&self) -> Result<HypothesisThreeResult, ApiError>;

    /// `GET /k-means-clustering`
    ///
    /// # Errors
    /// Transport failure, non-2xx status, or a malformed payload.
    fn fetch_clustering(&self) -> Result<ClusterResult, ApiError>;

    /// `POST /calculate-risk`
    ///
    /// # Errors
    /// Transport failure, non-2xx status, or a malformed payload.
    fn submit_risk_calculation(&self, input: &RiskFormInput) -> Result<RiskScoreResult, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypothesis_paths() {
        assert_eq!(HypothesisId::One.path(), "/hypothesis-1");
        assert_eq!(HypothesisId::Three.path(), "/hypothesis-3");
    }

    #[test]
    fn test_invalid_joins_messages() {
        let err = ApiError::invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err, ApiError::Invalid("a, b".into()));
    }
}
