//! Domain types, geographic helpers, themes and configuration for the
//! store locator kit.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod location;
pub mod profile;
pub mod theme;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{round_tenths, BoundingBox, Coordinate};
pub use location::{load_locations, parse_locations, Location, LocationId, LocationProperties};
pub use profile::TravelProfile;
pub use theme::{load_themes, parse_themes, Theme, ThemeEntry};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate '{0}': expected \"lng,lat\" within range")]
    InvalidCoordinate(String),

    #[error("invalid travel profile '{0}': expected driving, driving-traffic, walking or cycling")]
    InvalidTravelProfile(String),

    #[error("invalid theme override: {0}")]
    InvalidThemeOverride(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read places file {path}: {source}")]
    PlacesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse places file: {0}")]
    PlacesFileParse(#[source] serde_json::Error),

    #[error("failed to read themes file {path}: {source}")]
    ThemesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse themes file: {0}")]
    ThemesFileParse(#[source] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
