//! Camera framing for a freshly fetched route.

use storeloc_core::{BoundingBox, Coordinate};
use storeloc_directions::DirectionsRoute;

use crate::selection::SelectionSource;

pub const BOUNDS_PADDING_VERTICAL: f64 = 206.0;
pub const BOUNDS_PADDING_HORIZONTAL: f64 = 60.0;
pub const FIT_ANIMATION_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self {
            top: BOUNDS_PADDING_VERTICAL,
            right: BOUNDS_PADDING_HORIZONTAL,
            bottom: BOUNDS_PADDING_VERTICAL,
            left: BOUNDS_PADDING_HORIZONTAL,
        }
    }
}

/// A proposal to frame the camera on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
    pub padding: EdgePadding,
    pub animation_duration_ms: u64,
}

impl FitBounds {
    /// Bounds of the route geometry, or `None` for an empty geometry.
    #[must_use]
    pub fn for_route(route: &DirectionsRoute) -> Option<Self> {
        let BoundingBox {
            south_west,
            north_east,
        } = BoundingBox::enclosing(&route.geometry)?;
        Some(Self {
            south_west,
            north_east,
            padding: EdgePadding::default(),
            animation_duration_ms: FIT_ANIMATION_MS,
        })
    }
}

/// Whether a new route should re-frame the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitPolicy {
    /// Leave the camera alone when the user tapped a marker directly: they
    /// are already looking at it.
    #[default]
    SkipDirectTaps,
    Always,
    Never,
}

impl FitPolicy {
    #[must_use]
    pub fn should_fit(self, source: SelectionSource) -> bool {
        match self {
            FitPolicy::SkipDirectTaps => source != SelectionSource::Tap,
            FitPolicy::Always => true,
            FitPolicy::Never => false,
        }
    }
}

/// The map camera, as seen from the kit.
pub trait MapViewport {
    fn fit_bounds(&mut self, bounds: &FitBounds);
}
