//! The store locator session.
//!
//! Owns one selection controller, marker presenter, route fetcher, card
//! presenter and location state, and processes [`Event`]s one at a time.
//! Directions requests are the only suspension point: each runs on its own
//! task under a deadline and posts its result back into the event inbox
//! tagged with the generation it was issued for.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use storeloc_core::{
    load_locations, AppConfig, Coordinate, Location, LocationId, Theme, TravelProfile,
};
use storeloc_directions::{DirectionsApi, DirectionsClient, DirectionsError, DirectionsRoute};
use tokio::sync::{broadcast, mpsc};
use tokio::task::{JoinHandle, JoinSet};

use crate::cards::{ActiveIndexChanged, CardPresenter, CardTextInfo, CarouselView, DEFAULT_ITEM_HEIGHT};
use crate::current_location::{
    CurrentLocation, LocationChange, LocationDot, LocationDotOverrides, LocationSource,
    LocationUpdate, Permission,
};
use crate::error::KitError;
use crate::markers::{MarkerOverrides, MarkerPartition, MarkerPresenter};
use crate::route::{
    FetchTicket, Generation, RouteCommand, RouteFailure, RouteFetcher, RouteOutcome, RoutePhase,
    RouteUpdate,
};
use crate::selection::{Selection, SelectionChanged, SelectionController, SelectionSource};
use crate::style::{LineOverride, LineStyle};
use crate::viewport::{FitBounds, FitPolicy};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const NOTIFICATION_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub theme: Theme,
    pub profile: TravelProfile,
    /// Deadline for a single directions request.
    pub request_timeout: Duration,
    pub markers: MarkerOverrides,
    pub location_dot: LocationDotOverrides,
    pub route_line: LineOverride,
    pub item_height: f64,
    pub text_info: CardTextInfo,
    pub fit_policy: FitPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            profile: TravelProfile::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            markers: MarkerOverrides::default(),
            location_dot: LocationDotOverrides::default(),
            route_line: LineOverride::default(),
            item_height: DEFAULT_ITEM_HEIGHT,
            text_info: CardTextInfo::default(),
            fit_policy: FitPolicy::default(),
        }
    }
}

impl SessionOptions {
    /// Options seeded from the environment: travel profile and request
    /// deadline come from `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig, theme: Theme) -> Self {
        Self {
            theme,
            profile: config.travel_profile,
            request_timeout: Duration::from_secs(config.directions_timeout_secs),
            ..Self::default()
        }
    }
}

/// Inputs to the session.
#[derive(Debug)]
pub enum Event {
    MarkerTapped(LocationId),
    CarouselSettled(usize),
    CarouselLayout { slider_width: f64 },
    SelectIndex(usize),
    Location(LocationUpdate),
    SetTravelProfile(TravelProfile),
    RouteResolved {
        generation: Generation,
        result: Result<DirectionsRoute, DirectionsError>,
    },
    Shutdown,
}

/// Outputs of the session, broadcast to every subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    SelectionChanged(SelectionChanged),
    RouteUpdated(RouteUpdate),
    RouteCleared,
    RouteFailed(RouteFailure),
    FitBounds(FitBounds),
    LocationDisabled,
}

/// Point-in-time view of everything the session renders.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub selection: Option<Selection>,
    pub origin: Option<Coordinate>,
    pub permission: Permission,
    pub profile: TravelProfile,
    pub markers: MarkerPartition,
    pub route_phase: RoutePhase,
    pub route: Option<Arc<DirectionsRoute>>,
    pub route_line: LineStyle,
    /// Present only while the origin is known.
    pub location_dot: Option<LocationDot>,
    pub carousel: Option<CarouselView>,
}

/// Cheap, cloneable sender for session events.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<Event>,
}

impl SessionHandle {
    /// # Errors
    ///
    /// Returns [`KitError::SessionClosed`] once the session has been dropped.
    pub fn send(&self, event: Event) -> Result<(), KitError> {
        self.events.send(event).map_err(|_| KitError::SessionClosed)
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub fn tap_marker(&self, id: impl Into<LocationId>) -> Result<(), KitError> {
        self.send(Event::MarkerTapped(id.into()))
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub fn select_index(&self, index: usize) -> Result<(), KitError> {
        self.send(Event::SelectIndex(index))
    }

    /// # Errors
    ///
    /// See [`SessionHandle::send`].
    pub fn shutdown(&self) -> Result<(), KitError> {
        self.send(Event::Shutdown)
    }
}

pub struct StoreLocator<D> {
    api: Arc<D>,
    options: SessionOptions,
    selection: SelectionController,
    markers: MarkerPresenter,
    route: RouteFetcher,
    cards: CardPresenter,
    location: CurrentLocation,
    location_dot: LocationDot,
    route_line: LineStyle,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    notifications: broadcast::Sender<Notification>,
    location_task: Option<JoinHandle<()>>,
    fetches: JoinSet<()>,
}

impl<D> std::fmt::Debug for StoreLocator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreLocator")
            .field("selection", &self.selection.selection())
            .field("route_phase", &self.route.phase())
            .field("origin", &self.location.origin())
            .finish_non_exhaustive()
    }
}

impl StoreLocator<DirectionsClient> {
    /// Load the places file and build a Mapbox client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::Config`] if the places file cannot be loaded, or
    /// [`KitError::Directions`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, options: SessionOptions) -> Result<Self, KitError> {
        let locations = load_locations(&config.places_path)?;
        let client = DirectionsClient::with_base_url(
            &config.mapbox_access_token,
            config.directions_timeout_secs,
            &config.directions_base_url,
            &config.user_agent,
        )?;
        Ok(Self::new(Arc::new(client), locations, options))
    }
}

impl<D: DirectionsApi + 'static> StoreLocator<D> {
    pub fn new(api: Arc<D>, locations: impl Into<Arc<[Location]>>, options: SessionOptions) -> Self {
        let locations = locations.into();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        let selection = SelectionController::new(locations);
        let mut route = RouteFetcher::new(options.profile);
        // No origin yet, so this only records the destination.
        let _ = route.set_destination(selection.destination(), SelectionSource::Initial);

        let mut cards = CardPresenter::new(options.item_height, options.text_info.clone());
        if let Some(current) = selection.selection() {
            cards.set_active_index(current.index);
        }

        tracing::info!(
            locations = selection.locations().len(),
            profile = %options.profile,
            "store locator session created"
        );

        Self {
            api,
            markers: MarkerPresenter::new(&options.theme, &options.markers),
            location_dot: LocationDot::new(&options.theme, &options.location_dot),
            route_line: LineStyle::for_theme(&options.theme).with(&options.route_line),
            selection,
            route,
            cards,
            location: CurrentLocation::default(),
            events_tx,
            events_rx,
            notifications,
            location_task: None,
            fetches: JoinSet::new(),
            options,
        }
    }

    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            events: self.events_tx.clone(),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Start forwarding `source` into the event inbox, replacing any
    /// previous watch. Must be called from within a tokio runtime.
    pub fn attach_location(&mut self, source: LocationSource) {
        self.stop_location_watch();
        tracing::debug!(?source, "attaching location source");
        let events = self.events_tx.clone();
        let mut updates = source.into_stream();
        self.location_task = Some(tokio::spawn(async move {
            while let Some(update) = updates.next().await {
                if events.send(Event::Location(update)).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop_location_watch(&mut self) {
        if let Some(task) = self.location_task.take() {
            task.abort();
        }
    }

    /// Wait for the next event and process it. Returns `false` once a
    /// [`Event::Shutdown`] has been handled.
    pub async fn step(&mut self) -> bool {
        let Some(event) = self.events_rx.recv().await else {
            return false;
        };
        self.handle_event(event)
    }

    /// Process events until shutdown.
    pub async fn run(mut self) {
        while self.step().await {}
        tracing::info!("store locator session stopped");
    }

    /// Apply one event synchronously. Returns `false` for
    /// [`Event::Shutdown`].
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::MarkerTapped(id) => {
                let changed = self.selection.select_by_id(&id, SelectionSource::Tap);
                self.on_selection_changed(changed);
            }
            Event::SelectIndex(index) => {
                let changed = self
                    .selection
                    .select_by_index(index, SelectionSource::Programmatic);
                self.on_selection_changed(changed);
            }
            Event::CarouselSettled(index) => {
                if let Some(ActiveIndexChanged { index }) = self.cards.on_snap(index) {
                    let changed = self.selection.select_by_index(index, SelectionSource::Carousel);
                    self.on_selection_changed(changed);
                }
            }
            Event::CarouselLayout { slider_width } => self.cards.on_layout(slider_width),
            Event::Location(update) => match self.location.apply(update) {
                LocationChange::Unchanged => {}
                LocationChange::Moved(origin) => {
                    let command = self.route.set_origin(Some(origin));
                    self.apply(command);
                }
                LocationChange::Disabled => {
                    self.publish(Notification::LocationDisabled);
                    let command = self.route.set_origin(None);
                    self.apply(command);
                }
            },
            Event::SetTravelProfile(profile) => {
                let command = self.route.set_profile(profile);
                self.apply(command);
            }
            Event::RouteResolved { generation, result } => {
                let outcome = self.route.complete(generation, result);
                self.on_route_outcome(outcome);
            }
            Event::Shutdown => {
                self.stop_location_watch();
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let origin = self.location.origin();
        SessionSnapshot {
            selection: self.selection.selection().cloned(),
            origin,
            permission: self.location.permission(),
            profile: self.route.profile(),
            markers: self
                .markers
                .partition(self.selection.locations(), self.selection.selection()),
            route_phase: self.route.phase(),
            route: self.route.route().cloned(),
            route_line: self.route_line.clone(),
            location_dot: origin.map(|_| self.location_dot.clone()),
            carousel: self
                .cards
                .render(self.selection.locations(), origin, &self.options.theme),
        }
    }

    fn on_selection_changed(&mut self, changed: Option<SelectionChanged>) {
        let Some(changed) = changed else {
            return;
        };
        self.cards.set_active_index(changed.selection.index);
        let command = self
            .route
            .set_destination(Some(changed.destination), changed.source);
        self.publish(Notification::SelectionChanged(changed));
        self.apply(command);
    }

    fn apply(&mut self, command: RouteCommand) {
        match command {
            RouteCommand::Unchanged => {}
            RouteCommand::Cleared => self.publish(Notification::RouteCleared),
            RouteCommand::Fetch(ticket) => self.spawn_fetch(ticket),
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        // Reap finished fetches so the set does not grow unbounded.
        while self.fetches.try_join_next().is_some() {}

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        let deadline = self.options.request_timeout;
        let FetchTicket {
            generation,
            request,
            ..
        } = ticket;

        self.fetches.spawn(async move {
            let result = match tokio::time::timeout(deadline, api.route(&request)).await {
                Ok(result) => result,
                Err(_) => Err(DirectionsError::Timeout {
                    timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                }),
            };
            if events
                .send(Event::RouteResolved { generation, result })
                .is_err()
            {
                tracing::debug!(%generation, "session gone before route resolved");
            }
        });
    }

    fn on_route_outcome(&mut self, outcome: RouteOutcome) {
        match outcome {
            RouteOutcome::Stale => {}
            RouteOutcome::Updated(update) => {
                let fit = self
                    .options
                    .fit_policy
                    .should_fit(update.source)
                    .then(|| FitBounds::for_route(&update.route))
                    .flatten();
                self.publish(Notification::RouteUpdated(update));
                if let Some(fit) = fit {
                    self.publish(Notification::FitBounds(fit));
                }
            }
            RouteOutcome::Failed(failure) => self.publish(Notification::RouteFailed(failure)),
        }
    }

    fn publish(&self, notification: Notification) {
        // No subscribers is fine; the snapshot API still reflects the state.
        let _ = self.notifications.send(notification);
    }
}

impl<D> Drop for StoreLocator<D> {
    fn drop(&mut self) {
        if let Some(task) = self.location_task.take() {
            task.abort();
        }
    }
}
