//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the dashboard and the statistics backend.

mod analysis_api;

pub use analysis_api::{AnalysisApi, ApiError, HypothesisId, CLUSTERING_PATH, RISK_PATH};
