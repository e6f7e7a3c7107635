//! Normalization from [`RawCandidate`] shapes to [`medfind_core::Amenity`].
//!
//! Field fallbacks differ per source: table rows use bare column names,
//! Overpass elements use OSM tag names. Both end in the same canonical shape
//! with a synthesized map link.

use medfind_core::{Amenity, Coordinate};

use crate::error::SearchError;
use crate::types::{ApiNode, RawCandidate, TableRow};

const MISSING_NAME: &str = "N/A";

const NAME_KEYS: &[&str] = &["name", "Name"];
const ADDRESS_KEYS: &[&str] = &["address", "Address"];
const API_ADDRESS_KEYS: &[&str] = &["address", "Address", "addr:full"];
const ADDRESS_PART_KEYS: &[&str] = &["housename", "street", "city", "postcode"];
const API_ADDRESS_PART_KEYS: &[&str] = &[
    "addr:housename",
    "addr:street",
    "addr:city",
    "addr:postcode",
];
const LATITUDE_KEYS: &[&str] = &["latitude", "Latitude", "lat", "Lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "Longitude", "lon", "Lon", "lng"];

/// Result of normalizing a batch: the good records plus how many were dropped.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub amenities: Vec<Amenity>,
    pub dropped: usize,
}

/// Normalizes one raw record into an [`Amenity`].
///
/// # Errors
///
/// Returns [`SearchError::MalformedCandidate`] when the record has no usable
/// latitude/longitude: missing, unparseable, non-finite, or out of range.
pub fn normalize(raw: &RawCandidate) -> Result<Amenity, SearchError> {
    match raw {
        RawCandidate::TableRow(row) => normalize_row(row),
        RawCandidate::ApiNode(node) => normalize_node(node),
    }
    .map_err(|reason| SearchError::MalformedCandidate {
        candidate: raw.describe(),
        reason,
    })
}

/// Normalizes every record, dropping the malformed ones.
///
/// Each drop is logged at `warn`; the batch never fails as a whole.
pub fn normalize_all(raws: &[RawCandidate]) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        amenities: Vec::with_capacity(raws.len()),
        dropped: 0,
    };

    for raw in raws {
        match normalize(raw) {
            Ok(amenity) => batch.amenities.push(amenity),
            Err(e) => {
                tracing::warn!(error = %e, "dropping candidate");
                batch.dropped += 1;
            }
        }
    }

    batch
}

fn normalize_row(row: &TableRow) -> Result<Amenity, String> {
    let latitude = parse_field(row.first_of(LATITUDE_KEYS), "latitude")?;
    let longitude = parse_field(row.first_of(LONGITUDE_KEYS), "longitude")?;
    let coordinate = Coordinate::new(latitude, longitude).map_err(|e| e.to_string())?;

    let name = row.first_of(NAME_KEYS).unwrap_or(MISSING_NAME);
    let address = row.first_of(ADDRESS_KEYS).map_or_else(
        || join_address(ADDRESS_PART_KEYS.iter().map(|&k| row.first_of(&[k]))),
        str::to_string,
    );

    Ok(Amenity::new(name, address, coordinate))
}

fn normalize_node(node: &ApiNode) -> Result<Amenity, String> {
    let (latitude, longitude) = match (node.lat, node.lon, node.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return Err("element has neither lat/lon nor center".to_string()),
    };
    let coordinate = Coordinate::new(latitude, longitude).map_err(|e| e.to_string())?;

    let name = node.first_tag(NAME_KEYS).unwrap_or(MISSING_NAME);
    let address = node.first_tag(API_ADDRESS_KEYS).map_or_else(
        || join_address(API_ADDRESS_PART_KEYS.iter().map(|&k| node.first_tag(&[k]))),
        str::to_string,
    );

    Ok(Amenity::new(name, address, coordinate))
}

fn parse_field(value: Option<&str>, field: &str) -> Result<f64, String> {
    let raw = value.ok_or_else(|| format!("missing {field}"))?;
    let parsed = raw
        .parse::<f64>()
        .map_err(|_| format!("{field} '{raw}' is not a number"))?;
    if !parsed.is_finite() {
        return Err(format!("{field} '{raw}' is not finite"));
    }
    Ok(parsed)
}

fn join_address<'a>(parts: impl Iterator<Item = Option<&'a str>>) -> String {
    parts.flatten().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
