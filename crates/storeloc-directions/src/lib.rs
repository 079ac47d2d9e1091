pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::DirectionsApi;
pub use client::DirectionsClient;
pub use error::{DirectionsError, FailureKind};
pub use types::{DirectionsRequest, DirectionsResponse, DirectionsRoute};
