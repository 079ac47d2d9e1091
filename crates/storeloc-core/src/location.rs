use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ConfigError;

/// Stable identifier of a location, normalized from the GeoJSON feature `id`
/// (which may be a string or a number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LocationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display metadata carried in a feature's `properties` bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address_formatted: Option<String>,
    #[serde(default)]
    pub hours_formatted: Option<String>,
    #[serde(default)]
    pub phone_formatted: Option<String>,
}

/// A single store location. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub coordinate: Coordinate,
    pub properties: LocationProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureCollectionDoc {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    #[serde(default)]
    id: Option<serde_json::Value>,
    geometry: GeometryDoc,
    #[serde(default)]
    properties: LocationProperties,
}

#[derive(Debug, Deserialize)]
struct GeometryDoc {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

/// Load the ordered location collection from a GeoJSON `FeatureCollection` file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_locations(path: &Path) -> Result<Vec<Location>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlacesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_locations(&content)
}

/// Parse and validate a GeoJSON `FeatureCollection` of point features.
///
/// Every feature must carry an `id` (string or number), a `Point` geometry
/// with an in-range coordinate, and ids must be unique across the collection.
/// Feature order is preserved.
///
/// # Errors
///
/// Returns [`ConfigError::PlacesFileParse`] for malformed JSON and
/// [`ConfigError::Validation`] for structurally valid JSON that breaks one of
/// the rules above.
pub fn parse_locations(geojson: &str) -> Result<Vec<Location>, ConfigError> {
    let doc: FeatureCollectionDoc =
        serde_json::from_str(geojson).map_err(ConfigError::PlacesFileParse)?;

    if doc.kind != "FeatureCollection" {
        return Err(ConfigError::Validation(format!(
            "expected a FeatureCollection, got '{}'",
            doc.kind
        )));
    }

    let mut seen = HashSet::new();
    let mut locations = Vec::with_capacity(doc.features.len());

    for (position, feature) in doc.features.into_iter().enumerate() {
        let id = normalize_id(feature.id.as_ref()).ok_or_else(|| {
            ConfigError::Validation(format!("feature #{position} has no usable id"))
        })?;

        if feature.geometry.kind != "Point" {
            return Err(ConfigError::Validation(format!(
                "feature '{id}' has geometry type '{}'; only Point is supported",
                feature.geometry.kind
            )));
        }

        let coordinate = serde_json::from_value::<[f64; 2]>(feature.geometry.coordinates)
            .map(Coordinate::from)
            .ok()
            .filter(Coordinate::is_valid)
            .ok_or_else(|| {
                ConfigError::Validation(format!("feature '{id}' has an invalid coordinate"))
            })?;

        if !seen.insert(id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feature id: '{id}'"
            )));
        }

        locations.push(Location {
            id,
            coordinate,
            properties: feature.properties,
        });
    }

    Ok(locations)
}

fn normalize_id(raw: Option<&serde_json::Value>) -> Option<LocationId> {
    match raw? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(LocationId(s.clone())),
        serde_json::Value::Number(n) => Some(LocationId(n.to_string())),
        _ => None,
    }
}
