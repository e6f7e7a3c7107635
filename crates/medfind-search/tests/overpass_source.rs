//! Integration tests for `OverpassSource` and a full search over it.
//!
//! Uses `wiremock` to stand up a local Overpass endpoint per test so no real
//! network traffic is made.

use std::time::Duration;

use medfind_core::{AmenityKind, Coordinate};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medfind_search::{
    CandidateSource, FetchRequest, OverpassSource, RawCandidate, SearchConfig, SearchError,
    Searcher, SourceError,
};

fn test_source(server: &MockServer) -> OverpassSource {
    OverpassSource::new(
        &format!("{}/api/interpreter", server.uri()),
        5,
        "medfind-test/0.1",
    )
    .expect("failed to build test OverpassSource")
}

fn origin() -> Coordinate {
    Coordinate::new(40.0, -75.0).expect("valid origin")
}

fn pharmacy_request() -> FetchRequest {
    FetchRequest {
        origin: origin(),
        radius_km: 15.0,
        kinds: AmenityKind::Pharmacy.fetch_kinds().to_vec(),
    }
}

fn elements_json() -> serde_json::Value {
    json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 1,
                "lat": 40.05,
                "lon": -75.0,
                "tags": {"amenity": "pharmacy", "name": "A", "addr:street": "Market St"}
            },
            {
                "type": "way",
                "id": 2,
                "center": {"lat": 40.01, "lon": -75.0},
                "tags": {"amenity": "hospital", "name": "Near Hospital"}
            },
            {
                "type": "node",
                "id": 3,
                "lat": 41.0,
                "lon": -75.0,
                "tags": {"amenity": "pharmacy", "name": "B"}
            },
            {
                "type": "relation",
                "id": 4,
                "tags": {"amenity": "hospital", "name": "No Center"}
            }
        ]
    })
}

#[tokio::test]
async fn fetch_posts_around_query_and_returns_every_element() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("around%3A15000"))
        .and(body_string_contains("pharmacy%7Chospital"))
        .respond_with(ResponseTemplate::new(200).set_body_json(elements_json()))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_source(&server).fetch(&pharmacy_request()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let candidates = result.unwrap();
    assert_eq!(candidates.len(), 4);
    assert!(candidates
        .iter()
        .all(|c| matches!(c, RawCandidate::ApiNode(_))));
}

#[tokio::test]
async fn fetch_returns_unexpected_status_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch(&pharmacy_request())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SourceError::UnexpectedStatus { status: 504, .. }),
        "expected UnexpectedStatus(504), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_returns_deserialize_error_on_html_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = test_source(&server)
        .fetch(&pharmacy_request())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SourceError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn search_over_overpass_refilters_and_sorts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(elements_json()))
        .mount(&server)
        .await;

    let searcher = Searcher::new(test_source(&server), Duration::from_secs(5));
    let results = searcher
        .search(origin(), &SearchConfig::default())
        .await
        .expect("search succeeds");

    let names: Vec<_> = results.iter().map(|r| r.amenity.name()).collect();
    assert_eq!(names, vec!["Near Hospital", "A"]);
    assert_eq!(results[1].amenity.address(), "Market St");
    assert_eq!(
        results[1].amenity.map_link(),
        "https://www.google.com/maps/search/?api=1&query=40.05,-75"
    );
}

#[tokio::test]
async fn search_over_overpass_surfaces_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let searcher = Searcher::new(test_source(&server), Duration::from_secs(5));
    let err = searcher
        .search(origin(), &SearchConfig::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SearchError::UpstreamUnavailable(ref detail) if detail.contains("429")),
        "expected UpstreamUnavailable, got: {err:?}"
    );
}
