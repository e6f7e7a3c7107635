//! `OpenStreetMap` Overpass API source.
//!
//! One `around:` query per search, covering nodes, ways and relations tagged
//! with any of the requested `amenity` values. `out center tags;` gives ways
//! and relations a representative point so every element can be ranked.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{CandidateSource, SourceError};
use crate::types::{ApiNode, FetchRequest, RawCandidate};

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
    /// Set by Overpass when the query ran into a runtime limit; the element
    /// list is then partial.
    remark: Option<String>,
}

/// HTTP client for an Overpass `interpreter` endpoint.
#[derive(Debug, Clone)]
pub struct OverpassSource {
    client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl OverpassSource {
    /// Creates a source with a request timeout and `User-Agent`.
    ///
    /// No retries are attempted; a failed request fails the search.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            timeout_secs,
        })
    }

    /// Overpass QL for the request. The server-side timeout mirrors the
    /// client timeout so Overpass gives up no later than we do.
    pub(crate) fn build_query(request: &FetchRequest, timeout_secs: u64) -> String {
        let kinds = request
            .kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join("|");
        format!(
            "[out:json][timeout:{timeout_secs}];\n\
             nwr[\"amenity\"~\"^({kinds})$\"](around:{radius_m:.0},{lat},{lon});\n\
             out center tags;",
            radius_m = request.radius_km * 1000.0,
            lat = request.origin.latitude(),
            lon = request.origin.longitude(),
        )
    }

    fn parse_elements(body: &str) -> Result<Vec<RawCandidate>, SourceError> {
        let response: OverpassResponse =
            serde_json::from_str(body).map_err(|source| SourceError::Deserialize {
                context: "overpass response".to_owned(),
                source,
            })?;

        if let Some(remark) = response.remark.as_deref() {
            tracing::warn!(remark, "overpass returned a remark; results may be partial");
        }

        let mut candidates = Vec::with_capacity(response.elements.len());
        for element in response.elements {
            match serde_json::from_value::<ApiNode>(element) {
                Ok(node) => candidates.push(RawCandidate::ApiNode(node)),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable overpass element"),
            }
        }
        Ok(candidates)
    }
}

impl CandidateSource for OverpassSource {
    fn name(&self) -> &'static str {
        "overpass"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawCandidate>, SourceError> {
        let query = Self::build_query(request, self.timeout_secs);
        tracing::debug!(endpoint = %self.endpoint, %query, "querying overpass");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text().await?;
        Self::parse_elements(&body)
    }
}
