//! Selection controller: the single source of truth for which location is
//! currently highlighted.

use std::sync::Arc;

use storeloc_core::{Coordinate, Location, LocationId};

/// Where a selection change came from. Carried alongside every change so
/// downstream collaborators (notably the viewport) can apply their own
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Set on construction.
    Initial,
    /// Direct tap on a map marker.
    Tap,
    /// The card carousel settled on a new card.
    Carousel,
    /// Requested by the embedding application.
    Programmatic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub id: LocationId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged {
    pub selection: Selection,
    pub destination: Coordinate,
    pub source: SelectionSource,
}

/// Owns the [`Selection`]. Every mutation goes through
/// [`select_by_index`](Self::select_by_index) or
/// [`select_by_id`](Self::select_by_id); misses are silent no-ops that keep
/// the previous selection.
#[derive(Debug)]
pub struct SelectionController {
    locations: Arc<[Location]>,
    current: Option<Selection>,
}

impl SelectionController {
    /// Selects index 0 when the collection is non-empty.
    #[must_use]
    pub fn new(locations: Arc<[Location]>) -> Self {
        let current = locations.first().map(|l| Selection {
            index: 0,
            id: l.id.clone(),
        });
        Self { locations, current }
    }

    #[must_use]
    pub fn locations(&self) -> &Arc<[Location]> {
        &self.locations
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn selected_location(&self) -> Option<&Location> {
        self.current
            .as_ref()
            .and_then(|s| self.locations.get(s.index))
    }

    /// Coordinate of the selected location, i.e. the route destination.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.selected_location().map(|l| l.coordinate)
    }

    /// Returns `None` (and changes nothing) when `index` is out of range or
    /// already selected.
    pub fn select_by_index(
        &mut self,
        index: usize,
        source: SelectionSource,
    ) -> Option<SelectionChanged> {
        let Some(location) = self.locations.get(index) else {
            tracing::debug!(index, len = self.locations.len(), "selection index out of range");
            return None;
        };

        if self.current.as_ref().is_some_and(|s| s.index == index) {
            return None;
        }

        let selection = Selection {
            index,
            id: location.id.clone(),
        };
        self.current = Some(selection.clone());
        tracing::debug!(index, id = %selection.id, ?source, "selection changed");

        Some(SelectionChanged {
            selection,
            destination: location.coordinate,
            source,
        })
    }

    /// Resolves `id` by linear scan, then behaves like
    /// [`select_by_index`](Self::select_by_index).
    pub fn select_by_id(
        &mut self,
        id: &LocationId,
        source: SelectionSource,
    ) -> Option<SelectionChanged> {
        let Some(index) = self.locations.iter().position(|l| &l.id == id) else {
            tracing::debug!(%id, "selection id not in collection");
            return None;
        };
        self.select_by_index(index, source)
    }
}
