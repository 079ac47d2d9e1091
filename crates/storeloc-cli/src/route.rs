//! `route` command: drive a session with a simulated origin until the route
//! for the chosen store settles, then print what the map would show.

use std::time::Duration;

use storeloc_core::{AppConfig, Coordinate, LocationId, TravelProfile};
use storeloc_kit::{
    FitBounds, FitPolicy, LocationSource, MapViewport, Notification, RoutePhase, SessionOptions,
    StoreLocator,
};
use tokio::sync::broadcast::error::TryRecvError;

use crate::themes::resolve_theme;

/// Which store to route to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Initial,
    Index(usize),
    Id(LocationId),
}

/// Prints camera proposals instead of moving a real map.
struct PrintViewport;

impl MapViewport for PrintViewport {
    fn fit_bounds(&mut self, bounds: &FitBounds) {
        println!(
            "fit bounds: sw={} ne={} padding=[{:.0}, {:.0}, {:.0}, {:.0}] over {} ms",
            bounds.south_west,
            bounds.north_east,
            bounds.padding.top,
            bounds.padding.right,
            bounds.padding.bottom,
            bounds.padding.left,
            bounds.animation_duration_ms,
        );
    }
}

pub(crate) async fn run_route(
    config: &AppConfig,
    theme_name: &str,
    origin: Coordinate,
    target: Target,
    profile: Option<TravelProfile>,
    fit_policy: FitPolicy,
) -> anyhow::Result<()> {
    let theme = resolve_theme(theme_name, config.themes_path.as_deref())?;
    let mut options = SessionOptions::from_config(config, theme);
    options.fit_policy = fit_policy;
    if let Some(profile) = profile {
        options.profile = profile;
    }
    let deadline = options.request_timeout + Duration::from_secs(5);

    let mut session = StoreLocator::from_config(config, options)?;
    if session.snapshot().selection.is_none() {
        anyhow::bail!("no locations in {}", config.places_path.display());
    }
    let mut notifications = session.subscribe();
    let handle = session.handle();

    match target {
        Target::Initial => {}
        Target::Index(index) => handle.select_index(index)?,
        Target::Id(id) => handle.tap_marker(id)?,
    }
    session.attach_location(LocationSource::Simulated(origin));

    tokio::time::timeout(deadline, async {
        while session.step().await {
            let snap = session.snapshot();
            if snap.origin.is_some()
                && matches!(snap.route_phase, RoutePhase::Succeeded | RoutePhase::Failed)
            {
                break;
            }
        }
    })
    .await
    .map_err(|_| anyhow::anyhow!("route did not settle within {}s", deadline.as_secs()))?;

    let mut viewport = PrintViewport;
    loop {
        match notifications.try_recv() {
            Ok(notification) => report(&notification, &mut viewport),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notification receiver lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    let snap = session.snapshot();
    if let Some(selection) = &snap.selection {
        println!("selected: #{} ({})", selection.index, selection.id);
    }
    match (&snap.route_phase, &snap.route) {
        (RoutePhase::Succeeded, Some(route)) => println!(
            "route: {:.1} km, {:.0} min, {} points",
            route.distance_meters / 1000.0,
            route.duration_secs / 60.0,
            route.geometry.len()
        ),
        (phase, _) => println!("route: none ({phase:?})"),
    }
    Ok(())
}

fn report(notification: &Notification, viewport: &mut impl MapViewport) {
    match notification {
        Notification::SelectionChanged(changed) => tracing::info!(
            index = changed.selection.index,
            id = %changed.selection.id,
            source = ?changed.source,
            "selection changed"
        ),
        Notification::RouteUpdated(update) => tracing::info!(
            generation = %update.generation,
            source = ?update.source,
            "route updated"
        ),
        Notification::RouteCleared => tracing::info!("route cleared"),
        Notification::RouteFailed(failure) => tracing::warn!(
            generation = %failure.generation,
            kind = ?failure.kind,
            message = %failure.message,
            "route failed"
        ),
        Notification::FitBounds(bounds) => viewport.fit_bounds(bounds),
        Notification::LocationDisabled => tracing::warn!("location disabled"),
    }
}
