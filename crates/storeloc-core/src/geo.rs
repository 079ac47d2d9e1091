//! Geographic primitives shared by every crate in the workspace.
//!
//! Coordinates are always `(longitude, latitude)` in degrees, matching the
//! GeoJSON position order used by the feature collections and the directions
//! service.

use serde::{Deserialize, Serialize};

/// Mean earth radius in metres, as used by turf/Mapbox for great-circle math.
const EARTH_RADIUS_METERS: f64 = 6_371_008.8;
const METERS_PER_MILE: f64 = 1_609.344;

/// A `[longitude, latitude]` position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns `true` when both components are finite and inside the valid
    /// longitude/latitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Two coordinates are "the same place" when they differ by at most
    /// `tolerance_deg` in *both* axes.
    #[must_use]
    pub fn within_tolerance(&self, other: &Self, tolerance_deg: f64) -> bool {
        (self.lng - other.lng).abs() <= tolerance_deg
            && (self.lat - other.lat).abs() <= tolerance_deg
    }

    /// Great-circle (haversine) distance to `other` in miles.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        c * EARTH_RADIUS_METERS / METERS_PER_MILE
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = crate::CoreError;

    /// Parses `"lng,lat"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::CoreError::InvalidCoordinate(s.to_string());
        let (lng, lat) = s.split_once(',').ok_or_else(invalid)?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let coord = Self { lng, lat };
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(invalid())
        }
    }
}

/// Round a distance to one decimal place for display.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Axis-aligned geographic rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl BoundingBox {
    /// Smallest box enclosing every coordinate, or `None` for an empty input.
    pub fn enclosing<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        let init = Self {
            south_west: first,
            north_east: first,
        };
        Some(iter.fold(init, |mut bbox, c| {
            bbox.south_west.lng = bbox.south_west.lng.min(c.lng);
            bbox.south_west.lat = bbox.south_west.lat.min(c.lat);
            bbox.north_east.lng = bbox.north_east.lng.max(c.lng);
            bbox.north_east.lat = bbox.north_east.lat.max(c.lat);
            bbox
        }))
    }
}
