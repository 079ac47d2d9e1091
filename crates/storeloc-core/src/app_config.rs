use std::path::PathBuf;

use crate::profile::TravelProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub mapbox_access_token: String,
    pub env: Environment,
    pub log_level: String,
    pub places_path: PathBuf,
    pub themes_path: Option<PathBuf>,
    pub directions_base_url: String,
    pub directions_timeout_secs: u64,
    pub user_agent: String,
    pub travel_profile: TravelProfile,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("mapbox_access_token", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("places_path", &self.places_path)
            .field("themes_path", &self.themes_path)
            .field("directions_base_url", &self.directions_base_url)
            .field("directions_timeout_secs", &self.directions_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("travel_profile", &self.travel_profile)
            .finish()
    }
}
