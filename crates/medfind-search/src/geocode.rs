//! Free-text place lookup against a Nominatim `search` endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("geocoder returned an unusable coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: String, lon: String },
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Resolves `place` to its best match, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`]: network or TLS failure.
    /// - [`GeocodeError::UnexpectedStatus`]: any non-2xx response.
    /// - [`GeocodeError::Deserialize`]: body is not the expected JSON array.
    /// - [`GeocodeError::InvalidCoordinate`]: the match has a non-numeric or
    ///   out-of-range position.
    pub async fn lookup(&self, place: &str) -> Result<Option<GeocodedPlace>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|source| GeocodeError::Deserialize {
                context: "nominatim search response".to_owned(),
                source,
            })?;

        places.into_iter().next().map(to_geocoded_place).transpose()
    }
}

fn to_geocoded_place(place: NominatimPlace) -> Result<GeocodedPlace, GeocodeError> {
    let invalid = || GeocodeError::InvalidCoordinate {
        lat: place.lat.clone(),
        lon: place.lon.clone(),
    };
    let latitude = place.lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let longitude = place.lon.trim().parse::<f64>().map_err(|_| invalid())?;
    medfind_core::Coordinate::new(latitude, longitude).map_err(|_| invalid())?;

    Ok(GeocodedPlace {
        latitude,
        longitude,
        display_name: place.display_name,
    })
}
