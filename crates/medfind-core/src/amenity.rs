//! Canonical value types shared by every candidate source and the ranker.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

const MAP_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A WGS84 position in decimal degrees.
///
/// Only constructible through [`Coordinate::new`], so every value in
/// circulation is finite and within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] when either component is not
    /// finite, or latitude is outside `[-90, 90]`, or longitude is outside
    /// `[-180, 180]`. Out-of-range values are rejected, never clamped.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Amenity categories a search can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityKind {
    Pharmacy,
    Hospital,
}

impl AmenityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AmenityKind::Pharmacy => "pharmacy",
            AmenityKind::Hospital => "hospital",
        }
    }

    /// Categories a source is asked to return for this kind.
    ///
    /// Pharmacy searches are broadened to hospitals as well, since hospitals
    /// generally dispense too.
    #[must_use]
    pub fn fetch_kinds(self) -> &'static [AmenityKind] {
        match self {
            AmenityKind::Pharmacy => &[AmenityKind::Pharmacy, AmenityKind::Hospital],
            AmenityKind::Hospital => &[AmenityKind::Hospital],
        }
    }
}

impl std::fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmenityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pharmacy" => Ok(AmenityKind::Pharmacy),
            "hospital" => Ok(AmenityKind::Hospital),
            _ => Err(CoreError::UnknownAmenityKind(s.to_string())),
        }
    }
}

/// Builds the map search URL for a coordinate.
#[must_use]
pub fn map_link(coordinate: Coordinate) -> String {
    format!(
        "{MAP_SEARCH_BASE}{},{}",
        coordinate.latitude(),
        coordinate.longitude()
    )
}

/// A point of interest normalized from any candidate source.
///
/// The map link is always derived from the coordinate; links supplied by a
/// source are never trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amenity {
    name: String,
    address: String,
    #[serde(flatten)]
    coordinate: Coordinate,
    #[serde(rename = "google_map_link")]
    map_link: String,
}

impl Amenity {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            coordinate,
            map_link: map_link(coordinate),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn map_link(&self) -> &str {
        &self.map_link
    }
}

/// An [`Amenity`] with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAmenity {
    #[serde(flatten)]
    pub amenity: Amenity,
    pub distance_km: f64,
}

impl RankedAmenity {
    #[must_use]
    pub fn new(amenity: Amenity, distance_km: f64) -> Self {
        Self {
            amenity,
            distance_km,
        }
    }
}
