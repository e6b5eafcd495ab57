//! Application layer: Fetch lifecycle, derived views and the risk form.
//!
//! Nothing here touches the terminal or the network directly; pages drive
//! these types from the TUI and the API port supplies the data.

pub mod resource;
pub mod risk_form;
pub mod views;

pub use resource::{Resource, ResourceState, Ticket};
pub use risk_form::{RiskField, RiskFormState};
pub use views::{ClusterView, HypothesisOneView, HypothesisThreeView, HypothesisTwoView};
