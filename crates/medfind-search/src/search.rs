//! Search orchestration: validate, fetch, normalize, rank.

use std::time::Duration;

use medfind_core::{AmenityKind, Coordinate, RankedAmenity};
use serde_json::Value;

use crate::error::SearchError;
use crate::normalize::normalize_all;
use crate::rank::rank;
use crate::source::{CandidateSource, SourceError};
use crate::types::FetchRequest;

/// Radius used when a request does not name one.
pub const DEFAULT_RADIUS_KM: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub radius_km: f64,
    pub amenity_kind: AmenityKind,
}

impl SearchConfig {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] unless the radius is finite
    /// and strictly positive.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "radius must be a positive number of kilometres, got {}",
                self.radius_km
            )));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            amenity_kind: AmenityKind::Pharmacy,
        }
    }
}

/// A search request parsed from loosely-typed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub origin: Coordinate,
    pub config: SearchConfig,
}

impl SearchRequest {
    /// Parses request fields that may be JSON numbers or numeric strings.
    ///
    /// A missing or `null` radius falls back to `default_radius_km`; a missing
    /// or `null` amenity type falls back to pharmacy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] when a coordinate is missing or
    /// not numeric, the origin is out of range, the radius is not a positive
    /// number, or the amenity type is unknown.
    pub fn parse(
        user_lat: Option<&Value>,
        user_lon: Option<&Value>,
        radius: Option<&Value>,
        amenity_type: Option<&Value>,
        default_radius_km: f64,
    ) -> Result<Self, SearchError> {
        let latitude = required_number(user_lat, "user_lat")?;
        let longitude = required_number(user_lon, "user_lon")?;
        let origin = Coordinate::new(latitude, longitude)?;

        let radius_km = match radius {
            None | Some(Value::Null) => default_radius_km,
            Some(value) => number(value, "radius")?,
        };

        let amenity_kind = match amenity_type {
            None | Some(Value::Null) => AmenityKind::Pharmacy,
            Some(Value::String(s)) => s.parse::<AmenityKind>()?,
            Some(other) => {
                return Err(SearchError::InvalidRequest(format!(
                    "amenity_type must be a string, got {other}"
                )))
            }
        };

        let config = SearchConfig {
            radius_km,
            amenity_kind,
        };
        config.validate()?;

        Ok(Self { origin, config })
    }
}

fn required_number(value: Option<&Value>, field: &str) -> Result<f64, SearchError> {
    match value {
        None | Some(Value::Null) => Err(SearchError::InvalidRequest(format!(
            "{field} is required"
        ))),
        Some(value) => number(value, field),
    }
}

fn number(value: &Value, field: &str) -> Result<f64, SearchError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| SearchError::InvalidRequest(format!("{field} must be a number, got {value}")))
}

/// Runs searches against one candidate source.
///
/// Holds no per-search state; concurrent searches share only the source.
#[derive(Debug)]
pub struct Searcher<S> {
    source: S,
    fetch_timeout: Duration,
}

impl<S: CandidateSource> Searcher<S> {
    #[must_use]
    pub fn new(source: S, fetch_timeout: Duration) -> Self {
        Self {
            source,
            fetch_timeout,
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Finds amenities within `config.radius_km` of `origin`, nearest first.
    ///
    /// Malformed candidates are dropped and counted; an empty result is a
    /// normal outcome.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidRequest`]: radius is not a positive number.
    /// - [`SearchError::UpstreamUnavailable`]: the source failed or did not
    ///   answer within the fetch timeout.
    pub async fn search(
        &self,
        origin: Coordinate,
        config: &SearchConfig,
    ) -> Result<Vec<RankedAmenity>, SearchError> {
        config.validate()?;

        tracing::info!(
            source = self.source.name(),
            %origin,
            radius_km = config.radius_km,
            kind = %config.amenity_kind,
            "searching for amenities"
        );

        let request = FetchRequest {
            origin,
            radius_km: config.radius_km,
            kinds: config.amenity_kind.fetch_kinds().to_vec(),
        };

        let raws = match tokio::time::timeout(self.fetch_timeout, self.source.fetch(&request)).await
        {
            Ok(Ok(raws)) => raws,
            Ok(Err(e)) => return Err(upstream_failure(self.source.name(), e)),
            Err(_) => {
                let e = SourceError::Timeout {
                    secs: self.fetch_timeout.as_secs(),
                };
                return Err(upstream_failure(self.source.name(), e));
            }
        };

        let fetched = raws.len();
        let batch = normalize_all(&raws);
        let ranked = rank(origin, batch.amenities, config.radius_km);

        tracing::info!(
            fetched,
            dropped = batch.dropped,
            matched = ranked.len(),
            "search complete"
        );

        Ok(ranked)
    }
}

fn upstream_failure(source: &str, err: SourceError) -> SearchError {
    tracing::error!(source, error = %err, "candidate source failed");
    SearchError::from(err)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
