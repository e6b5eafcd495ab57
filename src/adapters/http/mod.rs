//! HTTP adapter: Implementation of AnalysisApi over REST/JSON.
//!
//! Uses a blocking `reqwest` client; callers run it on a worker thread so the
//! TUI loop never waits on the network.
//!
//! Each request is a single attempt with the transport's default timeout.
//! Decoding goes through the response text so a malformed body is reported
//! as `ApiError::Decode` rather than a transport failure.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    ClusterResult, HypothesisOneResult, HypothesisThreeResult, HypothesisTwoResult,
    RiskFormInput, RiskScoreResult,
};
use crate::ports::{AnalysisApi, ApiError, HypothesisId, CLUSTERING_PATH, RISK_PATH};

/// REST client for the statistics backend.
pub struct HttpAnalysisApi {
    client: Client,
    base: String,
}

impl HttpAnalysisApi {
    /// Create a client rooted at `base` (e.g. `http://127.0.0.1:8000/api`).
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(base: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base))
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { client, base }
    }

    /// Base URL with no trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(resp)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(resp)
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let text = resp.text().map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl AnalysisApi for HttpAnalysisApi {
    fn fetch_hypothesis_one(&self) -> Result<HypothesisOneResult, ApiError> {
        let result: HypothesisOneResult = self.get(&HypothesisId::One.path())?;
        result.validate().map_err(ApiError::invalid)?;
        Ok(result)
    }

    fn fetch_hypothesis_two(&self) -> Result<HypothesisTwoResult, ApiError> {
        let result: HypothesisTwoResult = self.get(&HypothesisId::Two.path())?;
        result.validate().map_err(ApiError::invalid)?;
        Ok(result)
    }

    fn fetch_hypothesis_three(&self) -> Result<HypothesisThreeResult, ApiError> {
        let result: HypothesisThreeResult = self.get(&HypothesisId::Three.path())?;
        result.validate().map_err(ApiError::invalid)?;
        Ok(result)
    }

    fn fetch_clustering(&self) -> Result<ClusterResult, ApiError> {
        let result: ClusterResult = self.get(CLUSTERING_PATH)?;
        result.validate().map_err(ApiError::invalid)?;
        Ok(result)
    }

    fn submit_risk_calculation(&self, input: &RiskFormInput) -> Result<RiskScoreResult, ApiError> {
        let result: RiskScoreResult = self.post(RISK_PATH, input)?;
        result.validate().map_err(ApiError::invalid)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let api = HttpAnalysisApi::new("http://127.0.0.1:8000/api/").expect("Should build client");
        assert_eq!(api.base(), "http://127.0.0.1:8000/api");
        assert_eq!(api.url("/hypothesis-1"), "http://127.0.0.1:8000/api/hypothesis-1");
        assert_eq!(api.url(CLUSTERING_PATH), "http://127.0.0.1:8000/api/k-means-clustering");
    }

    #[test]
    fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let api = HttpAnalysisApi::new("http://127.0.0.1:9/api").expect("Should build client");
        assert!(matches!(api.fetch_clustering(), Err(ApiError::Transport(_))));
    }
}
