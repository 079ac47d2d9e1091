use crate::app_config::{AppConfig, Environment};
use crate::profile::TravelProfile;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let mapbox_access_token = require("STORELOC_MAPBOX_ACCESS_TOKEN")?;

    let env = parse_environment(&or_default("STORELOC_ENV", "development"))?;
    let log_level = or_default("STORELOC_LOG_LEVEL", "info");
    let places_path = PathBuf::from(or_default(
        "STORELOC_PLACES_PATH",
        "./config/places.geojson",
    ));
    let themes_path = lookup("STORELOC_THEMES_PATH").ok().map(PathBuf::from);

    let directions_base_url = or_default("STORELOC_DIRECTIONS_BASE_URL", "https://api.mapbox.com");
    let directions_timeout_secs = parse_u64("STORELOC_DIRECTIONS_TIMEOUT_SECS", "10")?;
    if directions_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORELOC_DIRECTIONS_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("STORELOC_USER_AGENT", "storeloc/0.1 (store-locator-kit)");

    let travel_profile = or_default("STORELOC_TRAVEL_PROFILE", "driving")
        .parse::<TravelProfile>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "STORELOC_TRAVEL_PROFILE".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        mapbox_access_token,
        env,
        log_level,
        places_path,
        themes_path,
        directions_base_url,
        directions_timeout_secs,
        user_agent,
        travel_profile,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STORELOC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
