//! Integration tests for `DirectionsClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use storeloc_core::{Coordinate, TravelProfile};
use storeloc_directions::{
    DirectionsApi, DirectionsClient, DirectionsError, DirectionsRequest, FailureKind,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROUTE_PATH: &str = "/directions/v5/mapbox/driving/-77,38.9;-77.001,38.901";

fn test_client(base_url: &str) -> DirectionsClient {
    DirectionsClient::with_base_url("pk.test", 5, base_url, "storeloc-test/0.1")
        .expect("client construction should not fail")
}

fn request() -> DirectionsRequest {
    DirectionsRequest {
        origin: Coordinate::new(-77.0, 38.9),
        destination: Coordinate::new(-77.001, 38.901),
        profile: TravelProfile::Driving,
    }
}

fn route_body() -> serde_json::Value {
    json!({
        "code": "Ok",
        "routes": [
            {
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-77.0, 38.9], [-77.0005, 38.9004], [-77.001, 38.901]]
                },
                "distance": 152.4,
                "duration": 41.7,
                "weight": 50.0
            },
            {
                "geometry": { "type": "LineString", "coordinates": [[-77.0, 38.9]] },
                "distance": 999.0,
                "duration": 999.0
            }
        ],
        "waypoints": []
    })
}

#[tokio::test]
async fn fetch_route_returns_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let route = client.fetch_route(&request()).await.expect("should parse route");

    assert_eq!(route.geometry.len(), 3);
    assert_eq!(route.geometry[2], Coordinate::new(-77.001, 38.901));
    assert!((route.distance_meters - 152.4).abs() < 1e-9);
    assert!((route.duration_secs - 41.7).abs() < 1e-9);
}

#[tokio::test]
async fn trait_route_delegates_to_fetch_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directions/v5/mapbox/walking/-77,38.9;-77.001,38.901"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let walking = DirectionsRequest {
        profile: TravelProfile::Walking,
        ..request()
    };
    let route = client.route(&walking).await.expect("should parse route");
    assert_eq!(route.geometry.len(), 3);
}

#[tokio::test]
async fn zero_routes_is_no_routes_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": "Ok", "routes": [] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_route(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, DirectionsError::NoRoutes), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::NoRoutes);
}

#[tokio::test]
async fn no_route_code_is_no_routes_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NoRoute",
            "message": "No route found",
            "routes": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_route(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, DirectionsError::NoRoutes), "got {err:?}");
}

#[tokio::test]
async fn unauthorized_status_carries_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Not Authorized - Invalid Token" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_route(&request())
        .await
        .unwrap_err();
    assert!(
        matches!(err, DirectionsError::UnexpectedStatus { status: 401, ref message } if message.contains("Invalid Token")),
        "got {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::Status);
}

#[tokio::test]
async fn server_error_without_body_uses_reason_phrase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_route(&request())
        .await
        .unwrap_err();
    assert!(
        matches!(err, DirectionsError::UnexpectedStatus { status: 503, ref message } if message == "Service Unavailable"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "Ok", "routes": [{ "distance": "far" }] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_route(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, DirectionsError::Deserialize { .. }), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Malformed);
}

#[tokio::test]
async fn slow_response_is_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(route_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = DirectionsClient::with_base_url("pk.test", 1, &server.uri(), "storeloc-test/0.1")
        .expect("client construction should not fail");
    let err = client.fetch_route(&request()).await.unwrap_err();
    assert!(
        matches!(err, DirectionsError::Timeout { timeout_ms: 1000 }),
        "got {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::Timeout);
}
