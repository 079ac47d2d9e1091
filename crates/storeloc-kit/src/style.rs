//! Layer styles and their override chains.
//!
//! Every style is resolved in a fixed order: component base style, then the
//! theme layer, then the caller's override. Each step only touches the
//! properties its override sets.

/// Marker symbol layer style.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStyle {
    pub icon_image: Option<String>,
    pub icon_size: f64,
    pub icon_allow_overlap: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolOverride {
    pub icon_image: Option<String>,
    pub icon_size: Option<f64>,
    pub icon_allow_overlap: Option<bool>,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            icon_image: None,
            icon_size: 0.5,
            icon_allow_overlap: true,
        }
    }
}

impl SymbolStyle {
    #[must_use]
    pub fn with(mut self, layer: &SymbolOverride) -> Self {
        if let Some(image) = &layer.icon_image {
            self.icon_image = Some(image.clone());
        }
        if let Some(size) = layer.icon_size {
            self.icon_size = size;
        }
        if let Some(overlap) = layer.icon_allow_overlap {
            self.icon_allow_overlap = overlap;
        }
        self
    }
}

/// Circle layer style (location dot).
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub circle_radius: f64,
    pub circle_opacity: f64,
    pub circle_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircleOverride {
    pub circle_radius: Option<f64>,
    pub circle_opacity: Option<f64>,
    pub circle_color: Option<String>,
}

impl CircleStyle {
    #[must_use]
    pub fn with(mut self, layer: &CircleOverride) -> Self {
        if let Some(radius) = layer.circle_radius {
            self.circle_radius = radius;
        }
        if let Some(opacity) = layer.circle_opacity {
            self.circle_opacity = opacity;
        }
        if let Some(color) = &layer.circle_color {
            self.circle_color = Some(color.clone());
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Bevel,
    Round,
    Miter,
}

/// Route line style.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineOverride {
    pub line_width: Option<f64>,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
    pub line_color: Option<String>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            line_color: None,
        }
    }
}

impl LineStyle {
    /// Base line style with the theme's `directionsLineColor` applied.
    #[must_use]
    pub fn for_theme(theme: &storeloc_core::Theme) -> Self {
        Self::default().with(&LineOverride {
            line_color: theme.directions_line_color.clone(),
            ..LineOverride::default()
        })
    }

    #[must_use]
    pub fn with(mut self, layer: &LineOverride) -> Self {
        if let Some(width) = layer.line_width {
            self.line_width = width;
        }
        if let Some(cap) = layer.line_cap {
            self.line_cap = cap;
        }
        if let Some(join) = layer.line_join {
            self.line_join = join;
        }
        if let Some(color) = &layer.line_color {
            self.line_color = Some(color.clone());
        }
        self
    }
}
