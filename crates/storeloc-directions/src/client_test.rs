use storeloc_core::{Coordinate, TravelProfile};

use super::*;
use crate::types::{LineGeometry, RouteCandidate};

fn test_client(base_url: &str) -> DirectionsClient {
    DirectionsClient::with_base_url("pk.test", 30, base_url, "storeloc-test/0.1")
        .expect("client construction should not fail")
}

fn request(profile: TravelProfile) -> DirectionsRequest {
    DirectionsRequest {
        origin: Coordinate::new(-77.0, 38.9),
        destination: Coordinate::new(-77.001, 38.901),
        profile,
    }
}

fn candidate(distance: f64) -> RouteCandidate {
    RouteCandidate {
        geometry: LineGeometry {
            coordinates: vec![Coordinate::new(-77.0, 38.9), Coordinate::new(-77.001, 38.901)],
        },
        distance,
        duration: 60.0,
    }
}

#[test]
fn build_url_places_profile_and_coordinates_in_path() {
    let client = test_client("https://api.mapbox.com");
    let url = client.build_url(&request(TravelProfile::Walking)).unwrap();
    assert_eq!(
        url.path(),
        "/directions/v5/mapbox/walking/-77,38.9;-77.001,38.901"
    );
}

#[test]
fn build_url_appends_token_and_geometry_options() {
    let client = test_client("https://api.mapbox.com/");
    let url = client.build_url(&request(TravelProfile::Driving)).unwrap();
    let query = url.query().unwrap_or_default();
    assert!(query.contains("access_token=pk.test"), "{query}");
    assert!(query.contains("geometries=geojson"), "{query}");
    assert!(query.contains("overview=full"), "{query}");
}

#[test]
fn build_url_keeps_base_path_prefix() {
    let client = test_client("http://localhost:9999/proxy");
    let url = client.build_url(&request(TravelProfile::Cycling)).unwrap();
    assert!(
        url.path().starts_with("/proxy/directions/v5/mapbox/cycling/"),
        "{url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = DirectionsClient::with_base_url("pk.test", 5, "not a url", "ua").unwrap_err();
    assert!(matches!(err, DirectionsError::InvalidBaseUrl { .. }));
}

#[test]
fn first_route_takes_the_first_candidate() {
    let response = DirectionsResponse {
        code: "Ok".to_string(),
        message: None,
        routes: vec![candidate(100.0), candidate(200.0)],
    };
    let route = DirectionsClient::first_route(response).unwrap();
    assert!((route.distance_meters - 100.0).abs() < f64::EPSILON);
    assert_eq!(route.geometry.len(), 2);
}

#[test]
fn first_route_with_zero_routes_is_no_routes() {
    let response = DirectionsResponse {
        code: "Ok".to_string(),
        message: None,
        routes: vec![],
    };
    let err = DirectionsClient::first_route(response).unwrap_err();
    assert!(matches!(err, DirectionsError::NoRoutes));
}

#[test]
fn first_route_maps_error_codes() {
    let response = DirectionsResponse {
        code: "InvalidInput".to_string(),
        message: Some("bad coordinates".to_string()),
        routes: vec![],
    };
    let err = DirectionsClient::first_route(response).unwrap_err();
    assert!(
        matches!(err, DirectionsError::Api { ref code, ref message } if code == "InvalidInput" && message == "bad coordinates")
    );
}

#[test]
fn debug_output_redacts_access_token() {
    let client = test_client("https://api.mapbox.com");
    let rendered = format!("{client:?}");
    assert!(!rendered.contains("pk.test"));
}
