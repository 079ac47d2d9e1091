use std::path::Path;

use storeloc_core::Coordinate;
use storeloc_kit::{CardPresenter, CardTextInfo, CarouselView};

use crate::themes::resolve_theme;

/// Render the carousel for `origin` and print one line per card.
pub(crate) fn run_print_cards(
    places: &Path,
    themes_path: Option<&Path>,
    theme_name: &str,
    origin: Coordinate,
    slider_width: f64,
    active_index: usize,
) -> anyhow::Result<()> {
    let theme = resolve_theme(theme_name, themes_path)?;
    let locations = storeloc_core::load_locations(places)?;
    if active_index >= locations.len() {
        anyhow::bail!(
            "--select {active_index} is out of range for {} locations",
            locations.len()
        );
    }

    let mut presenter = CardPresenter::new(
        storeloc_kit::cards::DEFAULT_ITEM_HEIGHT,
        CardTextInfo::default(),
    );
    presenter.set_active_index(active_index);
    presenter.on_layout(slider_width);

    let view = presenter
        .render(&locations, Some(origin), &theme)
        .ok_or_else(|| anyhow::anyhow!("slider width must be positive, got {slider_width}"))?;
    print_carousel(&view);
    Ok(())
}

fn print_carousel(view: &CarouselView) {
    println!(
        "carousel: item {:.0}x{:.0} in slider {:.0}",
        view.item_width, view.item_height, view.slider_width
    );
    for (index, card) in view.cards.iter().enumerate() {
        let marker = if index == view.first_item { '*' } else { ' ' };
        println!(
            "{marker} {index:>2} {:<28} {:>6.1} mi  {}",
            card.name,
            card.distance_miles,
            card.address.as_deref().unwrap_or(""),
        );
    }
}
