//! Theme listing and lookup.

use std::path::Path;

use storeloc_core::Theme;

/// Resolve `name` against the themes file (if any), then the built-in
/// presets. File-defined themes shadow presets of the same name.
pub(crate) fn resolve_theme(name: &str, themes_path: Option<&Path>) -> anyhow::Result<Theme> {
    let key = name.trim().to_lowercase();
    if let Some(path) = themes_path {
        let themes = storeloc_core::load_themes(path)?;
        if let Some((_, theme)) = themes.into_iter().find(|(n, _)| *n == key) {
            return Ok(theme);
        }
    }
    Theme::preset(&key).ok_or_else(|| anyhow::anyhow!("unknown theme '{name}'"))
}

pub(crate) fn run_list_themes(themes_path: Option<&Path>) -> anyhow::Result<()> {
    let mut rows: Vec<(String, Theme, &str)> = Theme::PRESET_NAMES
        .iter()
        .filter_map(|name| Theme::preset(name).map(|t| ((*name).to_string(), t, "preset")))
        .collect();

    if let Some(path) = themes_path {
        let loaded = storeloc_core::load_themes(path)?;
        tracing::debug!(path = %path.display(), count = loaded.len(), "loaded themes file");
        rows.extend(loaded.into_iter().map(|(name, theme)| (name, theme, "file")));
    }

    for (name, theme, origin) in rows {
        println!(
            "{name:<12} {origin:<7} primary={:<8} line={:<8} icon={}",
            theme.primary_color.as_deref().unwrap_or("-"),
            theme.directions_line_color.as_deref().unwrap_or("-"),
            theme.icon.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
