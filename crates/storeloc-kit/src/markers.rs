//! Marker presenter.
//!
//! Splits the location collection into two disjoint symbol layers: every
//! unselected location, and the (at most one) selected location drawn above
//! it. Partitioning is pure and cheap, so it is recomputed on every
//! selection change rather than patched incrementally.

use storeloc_core::{Location, LocationId, Theme};

use crate::selection::Selection;
use crate::style::{SymbolOverride, SymbolStyle};

pub const UNSELECTED_LAYER_ID: &str = "store-locator-places-unselected-symbols";
pub const SELECTED_LAYER_ID: &str = "store-locator-selected-symbol";

/// Caller-supplied overrides, applied after the theme layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerOverrides {
    pub unselected: SymbolOverride,
    pub selected: SymbolOverride,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub layer_id: &'static str,
    /// Layer this group is drawn above, if any.
    pub above_layer_id: Option<&'static str>,
    pub style: SymbolStyle,
    pub ids: Vec<LocationId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPartition {
    pub unselected: MarkerGroup,
    pub selected: MarkerGroup,
}

#[derive(Debug, Clone)]
pub struct MarkerPresenter {
    unselected_style: SymbolStyle,
    selected_style: SymbolStyle,
}

impl MarkerPresenter {
    /// Resolve both layer styles: base → theme icon → caller override.
    #[must_use]
    pub fn new(theme: &Theme, overrides: &MarkerOverrides) -> Self {
        let theme_layer = |icon: &Option<String>| SymbolOverride {
            icon_image: icon.clone(),
            ..SymbolOverride::default()
        };

        Self {
            unselected_style: SymbolStyle::default()
                .with(&theme_layer(&theme.icon))
                .with(&overrides.unselected),
            selected_style: SymbolStyle::default()
                .with(&theme_layer(&theme.active_icon))
                .with(&overrides.selected),
        }
    }

    /// Partition `locations` around `selection`.
    ///
    /// The selection must already be validated against `locations` (the
    /// selection controller guarantees this).
    #[must_use]
    pub fn partition(
        &self,
        locations: &[Location],
        selection: Option<&Selection>,
    ) -> MarkerPartition {
        let selected_id = selection.map(|s| &s.id);
        let (selected, unselected): (Vec<_>, Vec<_>) = locations
            .iter()
            .map(|l| l.id.clone())
            .partition(|id| Some(id) == selected_id);

        MarkerPartition {
            unselected: MarkerGroup {
                layer_id: UNSELECTED_LAYER_ID,
                above_layer_id: None,
                style: self.unselected_style.clone(),
                ids: unselected,
            },
            selected: MarkerGroup {
                layer_id: SELECTED_LAYER_ID,
                above_layer_id: Some(UNSELECTED_LAYER_ID),
                style: self.selected_style.clone(),
                ids: selected,
            },
        }
    }
}
