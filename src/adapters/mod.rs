//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the statistics backend

pub mod http;

pub use http::HttpAnalysisApi;
