//! Card carousel presenter.
//!
//! The presenter never owns the selection. It is told the active index,
//! reports settle events on a *different* card exactly once, and waits for
//! the selection controller to push the new index back through
//! [`CardPresenter::set_active_index`].

use storeloc_core::{round_tenths, Coordinate, Location, LocationId, Theme};

pub const DEFAULT_ITEM_HEIGHT: f64 = 150.0;

/// `item_width = slider_width + ITEM_WIDTH_BLEED - ITEM_WIDTH_PEEK`: cards
/// overlap by a few pixels and leave room for the neighbour to peek in.
const ITEM_WIDTH_BLEED: f64 = 4.0;
const ITEM_WIDTH_PEEK: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInfo {
    pub title: String,
    pub value: String,
}

/// Optional static text shown on the left and right of every card footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardTextInfo {
    pub left: Option<TextInfo>,
    pub right: Option<TextInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveIndexChanged {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: LocationId,
    pub name: String,
    pub address: Option<String>,
    pub hours: Option<String>,
    pub phone: Option<String>,
    /// Straight-line distance to the origin, rounded to 0.1 mi.
    pub distance_miles: f64,
    pub header_color: Option<String>,
    pub icon: Option<String>,
    pub text_color: Option<String>,
    pub text_info: CardTextInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub slider_width: f64,
    pub item_width: f64,
    pub item_height: f64,
    /// Card the carousel should rest on.
    pub first_item: usize,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone)]
pub struct CardPresenter {
    active_index: usize,
    slider_width: Option<f64>,
    item_height: f64,
    text_info: CardTextInfo,
    /// Index already reported upward and not yet confirmed.
    pending: Option<usize>,
}

impl Default for CardPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_HEIGHT, CardTextInfo::default())
    }
}

impl CardPresenter {
    #[must_use]
    pub fn new(item_height: f64, text_info: CardTextInfo) -> Self {
        Self {
            active_index: 0,
            slider_width: None,
            item_height,
            text_info,
            pending: None,
        }
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Externally driven; never produces a notification.
    pub fn set_active_index(&mut self, index: usize) {
        self.active_index = index;
        self.pending = None;
    }

    /// Record the measured slider width. Non-positive or non-finite widths
    /// mean layout is not known yet.
    pub fn on_layout(&mut self, slider_width: f64) {
        self.slider_width = (slider_width.is_finite() && slider_width > 0.0).then_some(slider_width);
    }

    #[must_use]
    pub fn item_width(&self) -> Option<f64> {
        self.slider_width
            .map(|w| w + ITEM_WIDTH_BLEED - ITEM_WIDTH_PEEK)
    }

    /// The carousel came to rest on `index`. Reports it at most once per
    /// distinct index until the active index is updated from outside.
    pub fn on_snap(&mut self, index: usize) -> Option<ActiveIndexChanged> {
        if index == self.active_index {
            self.pending = None;
            return None;
        }
        if self.pending == Some(index) {
            return None;
        }
        self.pending = Some(index);
        tracing::debug!(index, active = self.active_index, "carousel settled on new card");
        Some(ActiveIndexChanged { index })
    }

    /// Build the carousel view model. `None` until the slider width and the
    /// origin are both known.
    #[must_use]
    pub fn render(
        &self,
        locations: &[Location],
        origin: Option<Coordinate>,
        theme: &Theme,
    ) -> Option<CarouselView> {
        let slider_width = self.slider_width?;
        let item_width = self.item_width()?;
        let origin = origin?;

        let cards = locations
            .iter()
            .map(|location| CardView {
                id: location.id.clone(),
                name: location.properties.name.clone(),
                address: location.properties.address_formatted.clone(),
                hours: location.properties.hours_formatted.clone(),
                phone: location.properties.phone_formatted.clone(),
                distance_miles: round_tenths(origin.distance_miles(&location.coordinate)),
                header_color: theme.primary_color.clone(),
                icon: theme.card_icon.clone(),
                text_color: theme.card_text_color.clone(),
                text_info: self.text_info.clone(),
            })
            .collect();

        Some(CarouselView {
            slider_width,
            item_width,
            item_height: self.item_height,
            first_item: self.active_index,
            cards,
        })
    }
}
