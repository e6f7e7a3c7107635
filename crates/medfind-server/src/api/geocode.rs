//! Place-name lookup handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use medfind_search::GeocodedPlace;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeRequest {
    #[serde(alias = "query")]
    place: Option<String>,
}

pub(super) async fn geocode_place(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodedPlace>, ApiError> {
    let Json(body) = payload?;

    let place = body.place.as_deref().map(str::trim).unwrap_or_default();
    if place.is_empty() {
        return Err(ApiError::bad_request("place is required"));
    }

    match state.geocoder.lookup(place).await {
        Ok(Some(found)) => Ok(Json(found)),
        Ok(None) => Err(ApiError::not_found(format!("no location found for '{place}'"))),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, place, error = %e, "geocode lookup failed");
            Err(ApiError::internal(format!("geocoding failed: {e}")))
        }
    }
}
