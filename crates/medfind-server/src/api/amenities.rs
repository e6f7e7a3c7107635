//! Nearest-amenity search handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use medfind_core::RankedAmenity;
use medfind_search::{SearchError, SearchRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Fields are loosely typed so numeric strings are accepted.
#[derive(Debug, Deserialize)]
pub(super) struct FindAmenitiesRequest {
    user_lat: Option<Value>,
    user_lon: Option<Value>,
    radius: Option<Value>,
    amenity_type: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct AmenityItem {
    name: String,
    address: String,
    distance_km: f64,
    google_map_link: String,
    latitude: f64,
    longitude: f64,
}

impl From<RankedAmenity> for AmenityItem {
    fn from(ranked: RankedAmenity) -> Self {
        let coordinate = ranked.amenity.coordinate();
        Self {
            name: ranked.amenity.name().to_owned(),
            address: ranked.amenity.address().to_owned(),
            distance_km: ranked.distance_km,
            google_map_link: ranked.amenity.map_link().to_owned(),
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

pub(super) async fn find_amenities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<FindAmenitiesRequest>, JsonRejection>,
) -> Result<Json<Vec<AmenityItem>>, ApiError> {
    let Json(body) = payload?;

    let request = SearchRequest::parse(
        body.user_lat.as_ref(),
        body.user_lon.as_ref(),
        body.radius.as_ref(),
        body.amenity_type.as_ref(),
        state.config.default_radius_km,
    )
    .map_err(|e| map_search_error(&req_id, e))?;

    let ranked = state
        .searcher
        .search(request.origin, &request.config)
        .await
        .map_err(|e| map_search_error(&req_id, e))?;

    Ok(Json(ranked.into_iter().map(AmenityItem::from).collect()))
}

fn map_search_error(req_id: &RequestId, error: SearchError) -> ApiError {
    match error {
        SearchError::InvalidRequest(msg) => {
            tracing::info!(request_id = %req_id.0, error = %msg, "rejected search request");
            ApiError::bad_request(msg)
        }
        SearchError::UpstreamUnavailable(detail) => {
            tracing::error!(request_id = %req_id.0, error = %detail, "search failed");
            ApiError::internal(format!("candidate source unavailable: {detail}"))
        }
        other @ SearchError::MalformedCandidate { .. } => {
            tracing::error!(request_id = %req_id.0, error = %other, "search failed");
            ApiError::internal(other.to_string())
        }
    }
}
