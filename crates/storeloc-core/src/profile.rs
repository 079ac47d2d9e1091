use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Travel mode sent to the directions service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelProfile {
    #[default]
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl TravelProfile {
    /// Path segment understood by the Mapbox Directions API.
    #[must_use]
    pub fn as_mapbox_profile(self) -> &'static str {
        match self {
            TravelProfile::Driving => "mapbox/driving",
            TravelProfile::DrivingTraffic => "mapbox/driving-traffic",
            TravelProfile::Walking => "mapbox/walking",
            TravelProfile::Cycling => "mapbox/cycling",
        }
    }
}

impl std::fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelProfile::Driving => write!(f, "driving"),
            TravelProfile::DrivingTraffic => write!(f, "driving-traffic"),
            TravelProfile::Walking => write!(f, "walking"),
            TravelProfile::Cycling => write!(f, "cycling"),
        }
    }
}

impl std::str::FromStr for TravelProfile {
    type Err = CoreError;

    /// Accepts the short names as well as the `mapbox/`-prefixed forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches("mapbox/") {
            "driving" => Ok(TravelProfile::Driving),
            "driving-traffic" => Ok(TravelProfile::DrivingTraffic),
            "walking" => Ok(TravelProfile::Walking),
            "cycling" => Ok(TravelProfile::Cycling),
            _ => Err(CoreError::InvalidTravelProfile(s.to_string())),
        }
    }
}
