//! Display themes.
//!
//! A [`Theme`] is an immutable bag of optional display attributes passed
//! explicitly through the component tree. Each option styles exactly one
//! surface; an absent option leaves that surface at its default.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, CoreError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    /// Marker icon in the inactive state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Marker icon in the active state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_icon: Option<String>,
    /// Base map style identifier.
    #[serde(
        default,
        rename = "styleURL",
        alias = "styleUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub style_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dark_color: Option<String>,
    /// Route line and location-dot color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions_line_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

impl Theme {
    /// Return a new theme with every `Some` field of `overrides` applied on
    /// top of `self`.
    #[must_use]
    pub fn extend(&self, overrides: &Theme) -> Theme {
        fn pick(over: &Option<String>, base: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        Theme {
            icon: pick(&overrides.icon, &self.icon),
            active_icon: pick(&overrides.active_icon, &self.active_icon),
            style_url: pick(&overrides.style_url, &self.style_url),
            primary_color: pick(&overrides.primary_color, &self.primary_color),
            primary_dark_color: pick(&overrides.primary_dark_color, &self.primary_dark_color),
            directions_line_color: pick(
                &overrides.directions_line_color,
                &self.directions_line_color,
            ),
            card_icon: pick(&overrides.card_icon, &self.card_icon),
            card_text_color: pick(&overrides.card_text_color, &self.card_text_color),
            accent_color: pick(&overrides.accent_color, &self.accent_color),
        }
    }

    /// Apply an untyped override map (e.g. decoded from JSON).
    ///
    /// Unlike a key-filtering merge, unknown keys are an error.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidThemeOverride`] if the map contains an
    /// unrecognized key or a non-string value.
    pub fn extend_with_value(&self, overrides: serde_json::Value) -> Result<Theme, CoreError> {
        let overrides: Theme = serde_json::from_value(overrides)
            .map_err(|e| CoreError::InvalidThemeOverride(e.to_string()))?;
        Ok(self.extend(&overrides))
    }

    /// Look up one of the built-in presets by name.
    #[must_use]
    pub fn preset(name: &str) -> Option<Theme> {
        let theme = match name {
            "blue" => Self::from_parts(
                ["blue_unselected_ice_cream.png", "blue_selected_ice_cream.png"],
                Some("mapbox://styles/mapbox/cj7bwwv3caf7l2spgukxm8bwv"),
                ["#45AAE9", "#268DBA", "#6ECAF1"],
                "ice_cream_icon.png",
                ["#1082B2", "#9FCCE0"],
            ),
            "purple" => Self::from_parts(
                ["purple_unselected_burger.png", "purple_selected_burger.png"],
                Some("mapbox://styles/mapbox/cj7bww7is2f4i2rnwyxkzpwu7"),
                ["#A35BCD", "#5D39BA", "#987DDF"],
                "cheese_burger_icon.png",
                ["#6A159B", "#C7A8D9"],
            ),
            "green" => Self::from_parts(
                ["green_unselected_money.png", "green_selected_money.png"],
                Some("mapbox://styles/mapbox/cj62n87yx3mvi2rp93sfp2w9z"),
                ["#5AE323", "#3BC802", "#3BC802"],
                "money_bag_icon.png",
                ["#000000", "#78F645"],
            ),
            "gray" => Self::from_parts(
                ["white_unselected_bike.png", "gray_selected_bike.png"],
                Some("mapbox://styles/mapbox/light-v10"),
                ["#696969", "#696969", "#696969"],
                "bicycle_icon.png",
                ["#696969", "#9E9E9E"],
            ),
            "neutral" => Self::from_parts(
                ["white_unselected_house.png", "gray_selected_house.png"],
                None,
                ["#00BAFF", "#E8E5E0", "#00BAFF"],
                "house_icon.png",
                ["#000000", "#FFFFFF"],
            ),
            _ => return None,
        };
        Some(theme)
    }

    /// Names of the built-in presets, in display order.
    pub const PRESET_NAMES: [&'static str; 5] = ["blue", "purple", "green", "gray", "neutral"];

    fn from_parts(
        [icon, active_icon]: [&str; 2],
        style_url: Option<&str>,
        [primary, primary_dark, line]: [&str; 3],
        card_icon: &str,
        [card_text, accent]: [&str; 2],
    ) -> Theme {
        Theme {
            icon: Some(icon.to_string()),
            active_icon: Some(active_icon.to_string()),
            style_url: style_url.map(str::to_string),
            primary_color: Some(primary.to_string()),
            primary_dark_color: Some(primary_dark.to_string()),
            directions_line_color: Some(line.to_string()),
            card_icon: Some(card_icon.to_string()),
            card_text_color: Some(card_text.to_string()),
            accent_color: Some(accent.to_string()),
        }
    }
}

/// One entry of a themes YAML file: a named theme, optionally layered on top
/// of a preset or an earlier entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeEntry {
    pub name: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub options: Theme,
}

#[derive(Debug, Deserialize)]
pub struct ThemesFile {
    pub themes: Vec<ThemeEntry>,
}

/// Load a themes file and resolve every entry to a concrete theme.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_themes(path: &Path) -> Result<Vec<(String, Theme)>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ThemesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_themes(&content)
}

/// Parse themes YAML and resolve `extends` chains in file order.
///
/// # Errors
///
/// Returns [`ConfigError::ThemesFileParse`] for malformed YAML or unknown
/// keys and [`ConfigError::Validation`] for empty/duplicate names or an
/// `extends` that names neither a preset nor an earlier entry.
pub fn parse_themes(yaml: &str) -> Result<Vec<(String, Theme)>, ConfigError> {
    let file: ThemesFile = serde_yaml::from_str(yaml).map_err(ConfigError::ThemesFileParse)?;

    let mut seen = HashSet::new();
    let mut resolved: Vec<(String, Theme)> = Vec::with_capacity(file.themes.len());

    for entry in file.themes {
        let name = entry.name.trim().to_lowercase();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "theme name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate theme name: '{}'",
                entry.name
            )));
        }

        let base = match entry.extends.as_deref() {
            None => Theme::default(),
            Some(parent) => {
                let key = parent.trim().to_lowercase();
                resolved
                    .iter()
                    .find(|(n, _)| *n == key)
                    .map(|(_, t)| t.clone())
                    .or_else(|| Theme::preset(&key))
                    .ok_or_else(|| {
                        ConfigError::Validation(format!(
                            "theme '{}' extends unknown theme '{parent}'",
                            entry.name
                        ))
                    })?
            }
        };

        resolved.push((name, base.extend(&entry.options)));
    }

    Ok(resolved)
}
