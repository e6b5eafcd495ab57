//! # cardiodash
//!
//! Terminal dashboard for precomputed cardiovascular statistics.
//!
//! The statistics themselves (t-tests, regressions, k-means, risk scores) are
//! computed by an external backend; this crate fetches them over REST/JSON
//! and renders cards, tables and charts.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Backend payload types and banding rules
//! - `ports`: The `AnalysisApi` trait
//! - `adapters`: reqwest implementation of the port
//! - `application`: Fetch lifecycle, derived views, risk form
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::DashboardConfig;
pub use domain::{RiskBand, Significance};

/// Result type for cardiodash operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for cardiodash
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("Backend request failed: {0}")]
    Api(#[from] ports::ApiError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_convert() {
        let err: CardioError = ports::ApiError::Status(503).into();
        assert!(matches!(err, CardioError::Api(ports::ApiError::Status(503))));
        assert!(err.to_string().starts_with("Backend request failed"));
    }
}
