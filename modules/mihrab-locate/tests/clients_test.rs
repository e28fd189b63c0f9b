//! Integration tests for the HTTP clients using wiremock mocks.

use mihrab_common::Coordinate;
use mihrab_locate::{IpApiProvider, LocationError, LocationProvider, NominatimClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ip_provider_parses_success_response() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "success",
        "lat": 40.2206,
        "lon": -74.7597,
        "city": "Trenton"
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = IpApiProvider::new(&server.uri());
    let coord = provider.current_position().await.unwrap();
    assert!((coord.lat - 40.2206).abs() < 1e-9);
    assert!((coord.lon + 74.7597).abs() < 1e-9);
}

#[tokio::test]
async fn ip_provider_maps_fail_status_to_unavailable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "fail",
        "message": "private range"
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = IpApiProvider::new(&server.uri());
    let err = provider.current_position().await.unwrap_err();
    assert_eq!(err, LocationError::Unavailable("private range".to_string()));
}

#[tokio::test]
async fn ip_provider_rejects_out_of_range_coordinates() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "success",
        "lat": 140.0,
        "lon": 20.0
    });

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = IpApiProvider::new(&server.uri());
    assert!(provider.current_position().await.is_err());
}

#[tokio::test]
async fn reverse_geocode_prefers_city() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "display_name": "Trenton, Mercer County, New Jersey, United States",
        "address": {
            "city": "Trenton",
            "county": "Mercer County",
            "state": "New Jersey"
        }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri());
    let name = client
        .reverse(Coordinate::new(40.2206, -74.7597))
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("Trenton"));
}

#[tokio::test]
async fn reverse_geocode_falls_back_to_town() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "address": {
            "town": "Princeton",
            "state": "New Jersey"
        }
    });

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri());
    let name = client
        .reverse(Coordinate::new(40.35, -74.66))
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("Princeton"));
}

#[tokio::test]
async fn reverse_geocode_empty_address_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri());
    let name = client.reverse(Coordinate::new(0.0, 0.0)).await.unwrap();
    assert!(name.is_none());
}

#[tokio::test]
async fn reverse_geocode_error_status_is_err() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri());
    assert!(client.reverse(Coordinate::new(0.0, 0.0)).await.is_err());
}
