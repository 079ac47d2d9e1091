//! Selection and directions synchronization for an embeddable store
//! locator: map markers, a snapping card carousel and a fetched route kept
//! in agreement with a single selected location.

pub mod cards;
pub mod current_location;
pub mod error;
pub mod markers;
pub mod route;
pub mod selection;
pub mod session;
pub mod style;
pub mod viewport;

pub use cards::{ActiveIndexChanged, CardPresenter, CardTextInfo, CardView, CarouselView, TextInfo};
pub use current_location::{
    CurrentLocation, LocationChange, LocationDot, LocationDotOverrides, LocationSource,
    LocationUpdate, Permission,
};
pub use error::KitError;
pub use markers::{MarkerGroup, MarkerOverrides, MarkerPartition, MarkerPresenter};
pub use route::{
    FetchTicket, Generation, RouteCommand, RouteFailure, RouteFetcher, RouteOutcome, RoutePhase,
    RouteUpdate, COORDINATE_TOLERANCE_DEG,
};
pub use selection::{Selection, SelectionChanged, SelectionController, SelectionSource};
pub use session::{
    Event, Notification, SessionHandle, SessionOptions, SessionSnapshot, StoreLocator,
};
pub use viewport::{EdgePadding, FitBounds, FitPolicy, MapViewport};
