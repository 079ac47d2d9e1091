//! Route fetcher state machine.
//!
//! `Idle → Fetching → {Succeeded, Failed}`, re-entrant from any state.
//! The fetcher performs no I/O itself: input changes return a
//! [`RouteCommand`] telling the caller whether to issue a request, and the
//! caller reports the outcome back through [`RouteFetcher::complete`].
//!
//! Every issued request carries a [`Generation`]. Any later transition
//! (a new fetch, or clearing because an endpoint disappeared) bumps the
//! generation, so a late completion for an older request is discarded
//! instead of overwriting newer state.

use std::sync::Arc;

use storeloc_core::{Coordinate, TravelProfile};
use storeloc_directions::{
    DirectionsError, DirectionsRequest, DirectionsRoute, FailureKind,
};

use crate::selection::SelectionSource;

/// Coordinates closer than this (degrees, per axis) are treated as equal so
/// that sensor jitter does not trigger a re-fetch.
pub const COORDINATE_TOLERANCE_DEG: f64 = 6e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// A request the caller must issue. Its completion is reported back with
/// the same generation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: Generation,
    pub request: DirectionsRequest,
    pub source: SelectionSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteCommand {
    /// Inputs did not change materially.
    Unchanged,
    /// An endpoint went absent; any held route was dropped.
    Cleared,
    Fetch(FetchTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteUpdate {
    pub generation: Generation,
    pub route: Arc<DirectionsRoute>,
    /// Source of the selection that was current when the request was issued.
    pub source: SelectionSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub generation: Generation,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The completion belonged to a superseded request and was ignored.
    Stale,
    Updated(RouteUpdate),
    Failed(RouteFailure),
}

#[derive(Debug)]
pub struct RouteFetcher {
    profile: TravelProfile,
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    source: SelectionSource,
    phase: RoutePhase,
    route: Option<Arc<DirectionsRoute>>,
    generation: Generation,
    /// Inputs of the most recently issued request; the baseline for the
    /// tolerance comparison.
    issued: Option<DirectionsRequest>,
}

impl RouteFetcher {
    #[must_use]
    pub fn new(profile: TravelProfile) -> Self {
        Self {
            profile,
            origin: None,
            destination: None,
            source: SelectionSource::Initial,
            phase: RoutePhase::Idle,
            route: None,
            generation: Generation(0),
            issued: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoutePhase {
        self.phase
    }

    #[must_use]
    pub fn route(&self) -> Option<&Arc<DirectionsRoute>> {
        self.route.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn profile(&self) -> TravelProfile {
        self.profile
    }

    pub fn set_origin(&mut self, origin: Option<Coordinate>) -> RouteCommand {
        self.origin = origin;
        self.reconcile(false)
    }

    pub fn set_destination(
        &mut self,
        destination: Option<Coordinate>,
        source: SelectionSource,
    ) -> RouteCommand {
        self.destination = destination;
        self.source = source;
        self.reconcile(false)
    }

    /// Switching travel mode re-fetches even when both endpoints are
    /// unchanged.
    pub fn set_profile(&mut self, profile: TravelProfile) -> RouteCommand {
        if profile == self.profile {
            return RouteCommand::Unchanged;
        }
        self.profile = profile;
        self.reconcile(true)
    }

    fn reconcile(&mut self, force: bool) -> RouteCommand {
        let (Some(origin), Some(destination)) = (self.origin, self.destination) else {
            return self.clear();
        };

        let request = DirectionsRequest {
            origin,
            destination,
            profile: self.profile,
        };

        let unchanged = self.issued.as_ref().is_some_and(|prev| {
            prev.profile == request.profile
                && prev
                    .origin
                    .within_tolerance(&request.origin, COORDINATE_TOLERANCE_DEG)
                && prev
                    .destination
                    .within_tolerance(&request.destination, COORDINATE_TOLERANCE_DEG)
        });
        if unchanged && !force {
            return RouteCommand::Unchanged;
        }

        self.generation = Generation(self.generation.0 + 1);
        self.phase = RoutePhase::Fetching;
        self.issued = Some(request);
        tracing::debug!(
            generation = %self.generation,
            origin = %origin,
            destination = %destination,
            profile = %self.profile,
            "route fetch issued"
        );

        RouteCommand::Fetch(FetchTicket {
            generation: self.generation,
            request,
            source: self.source,
        })
    }

    fn clear(&mut self) -> RouteCommand {
        let had_state = self.phase != RoutePhase::Idle || self.route.is_some();
        self.phase = RoutePhase::Idle;
        self.route = None;
        self.issued = None;
        if !had_state {
            return RouteCommand::Unchanged;
        }
        // Invalidate any request still in flight.
        self.generation = Generation(self.generation.0 + 1);
        tracing::debug!(generation = %self.generation, "route cleared: endpoint missing");
        RouteCommand::Cleared
    }

    /// Apply the result of the request issued with `generation`.
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<DirectionsRoute, DirectionsError>,
    ) -> RouteOutcome {
        if generation != self.generation || self.phase != RoutePhase::Fetching {
            tracing::debug!(
                %generation,
                current = %self.generation,
                "discarding superseded route response"
            );
            return RouteOutcome::Stale;
        }

        match result {
            Ok(route) if route.geometry.is_empty() => {
                self.fail(generation, &DirectionsError::NoRoutes)
            }
            Ok(route) => {
                let route = Arc::new(route);
                self.phase = RoutePhase::Succeeded;
                self.route = Some(Arc::clone(&route));
                tracing::debug!(
                    %generation,
                    distance_m = route.distance_meters,
                    duration_s = route.duration_secs,
                    "route updated"
                );
                RouteOutcome::Updated(RouteUpdate {
                    generation,
                    route,
                    source: self.source,
                })
            }
            Err(err) => self.fail(generation, &err),
        }
    }

    fn fail(&mut self, generation: Generation, err: &DirectionsError) -> RouteOutcome {
        tracing::warn!(%generation, error = %err, "route fetch failed");
        self.phase = RoutePhase::Failed;
        self.route = None;
        RouteOutcome::Failed(RouteFailure {
            generation,
            kind: err.kind(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate::new(-77.0, 38.9);
    const DEST: Coordinate = Coordinate::new(-77.001, 38.901);

    fn route_to(dest: Coordinate) -> DirectionsRoute {
        DirectionsRoute {
            geometry: vec![ORIGIN, dest],
            distance_meters: 150.0,
            duration_secs: 40.0,
        }
    }

    fn expect_fetch(cmd: RouteCommand) -> FetchTicket {
        match cmd {
            RouteCommand::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    fn ready_fetcher() -> (RouteFetcher, FetchTicket) {
        let mut fetcher = RouteFetcher::new(TravelProfile::default());
        assert_eq!(fetcher.set_origin(Some(ORIGIN)), RouteCommand::Unchanged);
        let ticket = expect_fetch(fetcher.set_destination(Some(DEST), SelectionSource::Initial));
        (fetcher, ticket)
    }

    #[test]
    fn starts_idle_without_route() {
        let fetcher = RouteFetcher::new(TravelProfile::Walking);
        assert_eq!(fetcher.phase(), RoutePhase::Idle);
        assert!(fetcher.route().is_none());
        assert_eq!(fetcher.profile(), TravelProfile::Walking);
    }

    #[test]
    fn both_endpoints_issue_exactly_one_request() {
        let (fetcher, ticket) = ready_fetcher();
        assert_eq!(fetcher.phase(), RoutePhase::Fetching);
        assert_eq!(ticket.request.origin, ORIGIN);
        assert_eq!(ticket.request.destination, DEST);
        assert_eq!(ticket.request.profile, TravelProfile::Driving);
    }

    #[test]
    fn success_stores_route_and_reports_source() {
        let (mut fetcher, ticket) = ready_fetcher();
        let outcome = fetcher.complete(ticket.generation, Ok(route_to(DEST)));
        let RouteOutcome::Updated(update) = outcome else {
            panic!("expected update, got {outcome:?}");
        };
        assert_eq!(update.source, SelectionSource::Initial);
        assert_eq!(fetcher.phase(), RoutePhase::Succeeded);
        assert_eq!(fetcher.route().unwrap().geometry, vec![ORIGIN, DEST]);
    }

    #[test]
    fn change_within_tolerance_issues_no_fetch_and_keeps_route() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Ok(route_to(DEST)));

        let jittered = Coordinate::new(DEST.lng + 5e-7, DEST.lat + 5e-7);
        assert_eq!(
            fetcher.set_destination(Some(jittered), SelectionSource::Carousel),
            RouteCommand::Unchanged
        );
        assert_eq!(
            fetcher.set_origin(Some(Coordinate::new(ORIGIN.lng - 5e-6, ORIGIN.lat))),
            RouteCommand::Unchanged
        );
        assert_eq!(fetcher.phase(), RoutePhase::Succeeded);
        assert!(fetcher.route().is_some());
    }

    #[test]
    fn change_beyond_tolerance_in_one_axis_refetches() {
        let (mut fetcher, first) = ready_fetcher();
        let moved = Coordinate::new(DEST.lng, DEST.lat + 1e-5);
        let second = expect_fetch(fetcher.set_destination(Some(moved), SelectionSource::Tap));
        assert!(second.generation > first.generation);
        assert_eq!(second.source, SelectionSource::Tap);
    }

    #[test]
    fn jitter_is_measured_against_last_issued_request() {
        let (mut fetcher, _) = ready_fetcher();
        // Two sub-tolerance steps that add up to more than the tolerance.
        let step1 = Coordinate::new(DEST.lng + 4e-6, DEST.lat);
        let step2 = Coordinate::new(DEST.lng + 8e-6, DEST.lat);
        assert_eq!(
            fetcher.set_destination(Some(step1), SelectionSource::Carousel),
            RouteCommand::Unchanged
        );
        expect_fetch(fetcher.set_destination(Some(step2), SelectionSource::Carousel));
    }

    #[test]
    fn missing_origin_clears_route_synchronously() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Ok(route_to(DEST)));

        assert_eq!(fetcher.set_origin(None), RouteCommand::Cleared);
        assert!(fetcher.route().is_none());
        assert_eq!(fetcher.phase(), RoutePhase::Idle);
    }

    #[test]
    fn missing_destination_clears_route_synchronously() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Ok(route_to(DEST)));

        assert_eq!(
            fetcher.set_destination(None, SelectionSource::Programmatic),
            RouteCommand::Cleared
        );
        assert!(fetcher.route().is_none());
    }

    #[test]
    fn clearing_while_fetching_discards_late_response() {
        let (mut fetcher, ticket) = ready_fetcher();
        assert_eq!(fetcher.set_origin(None), RouteCommand::Cleared);
        assert_eq!(
            fetcher.complete(ticket.generation, Ok(route_to(DEST))),
            RouteOutcome::Stale
        );
        assert!(fetcher.route().is_none());
        assert_eq!(fetcher.phase(), RoutePhase::Idle);
    }

    #[test]
    fn endpoint_returning_after_clear_refetches() {
        let (mut fetcher, _) = ready_fetcher();
        fetcher.set_origin(None);
        expect_fetch(fetcher.set_origin(Some(ORIGIN)));
    }

    #[test]
    fn superseded_response_arriving_late_is_discarded() {
        let (mut fetcher, a) = ready_fetcher();
        let other = Coordinate::new(-77.01, 38.91);
        let b = expect_fetch(fetcher.set_destination(Some(other), SelectionSource::Carousel));

        let b_outcome = fetcher.complete(b.generation, Ok(route_to(other)));
        assert!(matches!(b_outcome, RouteOutcome::Updated(_)));

        assert_eq!(
            fetcher.complete(a.generation, Ok(route_to(DEST))),
            RouteOutcome::Stale
        );
        assert_eq!(fetcher.route().unwrap().geometry, vec![ORIGIN, other]);
    }

    #[test]
    fn superseded_response_arriving_first_is_discarded() {
        let (mut fetcher, a) = ready_fetcher();
        let other = Coordinate::new(-77.01, 38.91);
        let b = expect_fetch(fetcher.set_destination(Some(other), SelectionSource::Carousel));

        assert_eq!(
            fetcher.complete(a.generation, Ok(route_to(DEST))),
            RouteOutcome::Stale
        );
        assert_eq!(fetcher.phase(), RoutePhase::Fetching);
        assert!(fetcher.route().is_none());

        fetcher.complete(b.generation, Ok(route_to(other)));
        assert_eq!(fetcher.route().unwrap().geometry, vec![ORIGIN, other]);
    }

    #[test]
    fn superseded_failure_does_not_clear_newer_route() {
        let (mut fetcher, a) = ready_fetcher();
        let other = Coordinate::new(-77.01, 38.91);
        let b = expect_fetch(fetcher.set_destination(Some(other), SelectionSource::Carousel));
        fetcher.complete(b.generation, Ok(route_to(other)));

        assert_eq!(
            fetcher.complete(a.generation, Err(DirectionsError::NoRoutes)),
            RouteOutcome::Stale
        );
        assert!(fetcher.route().is_some());
    }

    #[test]
    fn zero_routes_fails_and_clears() {
        let (mut fetcher, first) = ready_fetcher();
        fetcher.complete(first.generation, Ok(route_to(DEST)));

        let moved = Coordinate::new(-77.02, 38.92);
        let second = expect_fetch(fetcher.set_destination(Some(moved), SelectionSource::Carousel));
        let outcome = fetcher.complete(second.generation, Err(DirectionsError::NoRoutes));

        let RouteOutcome::Failed(failure) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(failure.kind, FailureKind::NoRoutes);
        assert_eq!(fetcher.phase(), RoutePhase::Failed);
        assert!(fetcher.route().is_none());
    }

    #[test]
    fn empty_geometry_counts_as_no_route() {
        let (mut fetcher, ticket) = ready_fetcher();
        let empty = DirectionsRoute {
            geometry: vec![],
            distance_meters: 0.0,
            duration_secs: 0.0,
        };
        let outcome = fetcher.complete(ticket.generation, Ok(empty));
        assert!(matches!(
            outcome,
            RouteOutcome::Failed(RouteFailure { kind: FailureKind::NoRoutes, .. })
        ));
    }

    #[test]
    fn failure_is_not_retried_for_same_inputs() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Err(DirectionsError::Timeout { timeout_ms: 10 }));
        assert_eq!(fetcher.set_origin(Some(ORIGIN)), RouteCommand::Unchanged);
        assert_eq!(fetcher.phase(), RoutePhase::Failed);
    }

    #[test]
    fn duplicate_completion_is_stale() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Ok(route_to(DEST)));
        assert_eq!(
            fetcher.complete(ticket.generation, Ok(route_to(DEST))),
            RouteOutcome::Stale
        );
    }

    #[test]
    fn profile_change_forces_refetch() {
        let (mut fetcher, ticket) = ready_fetcher();
        fetcher.complete(ticket.generation, Ok(route_to(DEST)));
        let walking = expect_fetch(fetcher.set_profile(TravelProfile::Walking));
        assert_eq!(walking.request.profile, TravelProfile::Walking);
        assert_eq!(
            fetcher.set_profile(TravelProfile::Walking),
            RouteCommand::Unchanged
        );
    }

    #[test]
    fn profile_change_without_endpoints_stays_idle() {
        let mut fetcher = RouteFetcher::new(TravelProfile::Driving);
        assert_eq!(
            fetcher.set_profile(TravelProfile::Cycling),
            RouteCommand::Unchanged
        );
        assert_eq!(fetcher.phase(), RoutePhase::Idle);
    }
}
