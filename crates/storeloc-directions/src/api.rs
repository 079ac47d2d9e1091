use std::future::Future;

use crate::error::DirectionsError;
use crate::types::{DirectionsRequest, DirectionsRoute};

/// The directions collaborator: one best-effort route lookup per call.
///
/// Implemented by [`crate::DirectionsClient`] for the real service and by
/// scripted fakes in tests.
pub trait DirectionsApi: Send + Sync {
    /// Resolve the first candidate route for `request`.
    fn route(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsRoute, DirectionsError>> + Send;
}
