//! Domain layer: Backend payload types and banding rules.
//!
//! Pure types with no I/O. Payloads deserialize straight from the backend
//! JSON and expose `validate()` for their documented ranges.

mod analysis;
pub mod banding;
mod risk;

pub use analysis::{
    ClusterProfile, ClusterResult, CoefficientRow, HypothesisOneResult, HypothesisThreeResult,
    HypothesisTwoResult, Predictor,
};
pub use banding::{ClinicalSignificance, ModelFit, RiskBand, Significance};
pub use risk::{Cholesterol, RiskFormInput, RiskScoreResult};
