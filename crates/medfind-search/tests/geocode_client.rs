//! Integration tests for `GeocodeClient::lookup` against a mocked Nominatim.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medfind_search::{GeocodeClient, GeocodeError};

fn test_client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::new(&format!("{}/", server.uri()), 5, "medfind-test/0.1")
        .expect("failed to build test GeocodeClient")
}

#[tokio::test]
async fn lookup_returns_best_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Connaught Place"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "place_id": 1,
                "lat": "28.6314022",
                "lon": "77.2193791",
                "display_name": "Connaught Place, New Delhi, India"
            }
        ])))
        .mount(&server)
        .await;

    let place = test_client(&server)
        .lookup("Connaught Place")
        .await
        .expect("lookup succeeds")
        .expect("place found");

    assert!((place.latitude - 28.631_402_2).abs() < 1e-9);
    assert!((place.longitude - 77.219_379_1).abs() < 1e-9);
    assert_eq!(place.display_name, "Connaught Place, New Delhi, India");
}

#[tokio::test]
async fn lookup_returns_none_when_nothing_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = test_client(&server).lookup("Atlantis").await;
    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn lookup_propagates_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server).lookup("Pune").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}
