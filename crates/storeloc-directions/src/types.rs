//! Directions request/response types.
//!
//! The wire types model the JSON returned by the Mapbox Directions v5 API
//! when requested with `geometries=geojson`. [`DirectionsRoute`] is the
//! service-independent value handed to the rest of the kit.

use serde::Deserialize;
use storeloc_core::{Coordinate, TravelProfile};

/// One route request: origin to destination with a travel profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub profile: TravelProfile,
}

/// A resolved route. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    /// Ordered path from origin to destination.
    pub geometry: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_secs: f64,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Top-level directions response: `{ "code": "Ok", "routes": [...] }`.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct RouteCandidate {
    pub geometry: LineGeometry,
    pub distance: f64,
    pub duration: f64,
}

/// GeoJSON `LineString`.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    pub coordinates: Vec<Coordinate>,
}

impl From<RouteCandidate> for DirectionsRoute {
    fn from(candidate: RouteCandidate) -> Self {
        Self {
            geometry: candidate.geometry.coordinates,
            distance_meters: candidate.distance,
            duration_secs: candidate.duration,
        }
    }
}

/// Error body returned alongside non-2xx statuses: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
