//! Radius filtering and distance ordering.

use medfind_core::{Amenity, Coordinate, RankedAmenity};

use crate::distance::distance_km;

/// Keeps the candidates within `radius_km` of `origin` (inclusive) and sorts
/// them nearest first.
///
/// The sort is stable, so candidates at equal distance keep their input
/// order. A candidate whose distance cannot be computed is skipped without
/// affecting the rest.
#[must_use]
pub fn rank(origin: Coordinate, candidates: Vec<Amenity>, radius_km: f64) -> Vec<RankedAmenity> {
    let mut ranked: Vec<RankedAmenity> = candidates
        .into_iter()
        .filter_map(|amenity| {
            let distance = distance_km(origin, amenity.coordinate());
            if !distance.is_finite() {
                tracing::warn!(
                    name = amenity.name(),
                    coordinate = %amenity.coordinate(),
                    "skipping candidate with non-finite distance"
                );
                return None;
            }
            (distance <= radius_km).then(|| RankedAmenity::new(amenity, distance))
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
