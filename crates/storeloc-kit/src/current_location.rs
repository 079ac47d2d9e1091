//! User location: where updates come from, what the kit remembers about
//! them, and how the location dot is styled.

use futures::stream::{self, BoxStream, StreamExt};
use storeloc_core::{Coordinate, Theme};

use crate::style::{CircleOverride, CircleStyle};

const INNER_RADIUS: f64 = 8.0;
const OUTER_RADIUS: f64 = 13.0;
const OUTER_OPACITY: f64 = 0.4;

/// One report from the location collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position(Coordinate),
    PermissionDenied,
    /// A transient sensor error. The last known position is kept.
    Unavailable(String),
}

/// Where positions come from.
pub enum LocationSource {
    /// A fixed position reported once at start.
    Simulated(Coordinate),
    /// A push-style watch, e.g. wrapping a platform sensor.
    Watch(BoxStream<'static, LocationUpdate>),
}

impl std::fmt::Debug for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationSource::Simulated(c) => f.debug_tuple("Simulated").field(c).finish(),
            LocationSource::Watch(_) => f.write_str("Watch(..)"),
        }
    }
}

impl LocationSource {
    #[must_use]
    pub fn into_stream(self) -> BoxStream<'static, LocationUpdate> {
        match self {
            LocationSource::Simulated(c) => stream::once(async move { LocationUpdate::Position(c) }).boxed(),
            LocationSource::Watch(updates) => updates,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Permission {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Effect of applying a [`LocationUpdate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationChange {
    Unchanged,
    /// The origin moved (or appeared).
    Moved(Coordinate),
    /// Permission was revoked; the origin is gone.
    Disabled,
}

#[derive(Debug, Clone, Default)]
pub struct CurrentLocation {
    permission: Permission,
    origin: Option<Coordinate>,
}

impl CurrentLocation {
    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }

    #[must_use]
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn apply(&mut self, update: LocationUpdate) -> LocationChange {
        match update {
            LocationUpdate::Position(coordinate) if !coordinate.is_valid() => {
                tracing::warn!(%coordinate, "ignoring out-of-range position");
                LocationChange::Unchanged
            }
            LocationUpdate::Position(coordinate) => {
                self.permission = Permission::Granted;
                if self.origin == Some(coordinate) {
                    return LocationChange::Unchanged;
                }
                self.origin = Some(coordinate);
                LocationChange::Moved(coordinate)
            }
            LocationUpdate::PermissionDenied => {
                let was_denied = self.permission == Permission::Denied;
                self.permission = Permission::Denied;
                self.origin = None;
                if was_denied {
                    LocationChange::Unchanged
                } else {
                    tracing::warn!("location permission denied; location features disabled");
                    LocationChange::Disabled
                }
            }
            LocationUpdate::Unavailable(reason) => {
                tracing::warn!(%reason, "location temporarily unavailable");
                LocationChange::Unchanged
            }
        }
    }
}

/// Styles for the two concentric circles of the user-location dot.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDot {
    pub inner: CircleStyle,
    pub outer: CircleStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDotOverrides {
    pub inner: CircleOverride,
    pub outer: CircleOverride,
}

impl LocationDot {
    #[must_use]
    pub fn new(theme: &Theme, overrides: &LocationDotOverrides) -> Self {
        let theme_layer = CircleOverride {
            circle_color: theme.directions_line_color.clone(),
            ..CircleOverride::default()
        };
        let inner = CircleStyle {
            circle_radius: INNER_RADIUS,
            circle_opacity: 1.0,
            circle_color: None,
        };
        let outer = CircleStyle {
            circle_radius: OUTER_RADIUS,
            circle_opacity: OUTER_OPACITY,
            circle_color: None,
        };
        Self {
            inner: inner.with(&theme_layer).with(&overrides.inner),
            outer: outer.with(&theme_layer).with(&overrides.outer),
        }
    }
}
