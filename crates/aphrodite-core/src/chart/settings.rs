use crate::ephemeris::types::{Body, GeoLocation, Observer, ZodiacType};
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseSystem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which derived-point families to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedSelection {
    pub arabic_parts: bool,
    pub midpoints: bool,
    pub antiscia: bool,
    pub fixed_stars: bool,
    /// Parans need a full local day of rise/set times and are opt-in
    pub parans: bool,
}

impl DerivedSelection {
    pub fn none() -> Self {
        Self {
            arabic_parts: false,
            midpoints: false,
            antiscia: false,
            fixed_stars: false,
            parans: false,
        }
    }

    pub fn all() -> Self {
        Self {
            parans: true,
            ..Self::default()
        }
    }
}

impl Default for DerivedSelection {
    fn default() -> Self {
        Self {
            arabic_parts: true,
            midpoints: true,
            antiscia: true,
            fixed_stars: true,
            parans: false,
        }
    }
}

/// Observer used for body positions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverMode {
    #[default]
    Geocentric,
    /// Positions as seen from the chart location
    Topocentric { elevation_m: f64 },
}

impl ObserverMode {
    pub fn observer_at(self, location: GeoLocation) -> Observer {
        match self {
            ObserverMode::Geocentric => Observer::Geocentric,
            ObserverMode::Topocentric { elevation_m } => Observer::Topocentric { location, elevation_m },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub bodies: Vec<Body>,
    pub house_system: HouseSystem,
    pub zodiac: ZodiacType,
    pub observer: ObserverMode,
    /// Restrict natal aspects to these definitions; `None` uses all
    pub aspect_angles: Option<Vec<String>>,
    pub derived: DerivedSelection,
}

/// Classical and modern planets plus the lunar nodes
pub fn default_bodies() -> Vec<Body> {
    vec![
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::TrueNode,
        Body::SouthNode,
    ]
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            bodies: default_bodies(),
            house_system: HouseSystem::Placidus,
            zodiac: ZodiacType::Tropical,
            observer: ObserverMode::Geocentric,
            aspect_angles: None,
            derived: DerivedSelection::default(),
        }
    }
}

impl ChartSettings {
    /// Bodies in request order without duplicates, always including the
    /// luminaries.
    pub fn effective_bodies(&self) -> Vec<Body> {
        let mut bodies = vec![Body::Sun, Body::Moon];
        for body in &self.bodies {
            if !bodies.contains(body) {
                bodies.push(*body);
            }
        }
        bodies
    }
}

/// Everything needed to assemble one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
    #[serde(default)]
    pub settings: ChartSettings,
}

impl ChartRequest {
    pub fn new(instant: DateTime<Utc>, location: GeoLocation) -> Self {
        Self {
            instant,
            location,
            settings: ChartSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.location.validate()?;
        if let ObserverMode::Topocentric { elevation_m } = self.settings.observer {
            if !elevation_m.is_finite() {
                return Err(ChartError::MalformedInput(format!("non-finite elevation: {elevation_m}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ChartSettings::default();
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        assert!(!settings.derived.parans);
        assert!(settings.derived.arabic_parts);
        assert_eq!(settings.bodies.len(), 12);
    }

    #[test]
    fn test_luminaries_always_requested() {
        let settings = ChartSettings {
            bodies: vec![Body::Mars, Body::Mars, Body::Venus],
            ..ChartSettings::default()
        };
        assert_eq!(settings.effective_bodies(), vec![Body::Sun, Body::Moon, Body::Mars, Body::Venus]);
    }

    #[test]
    fn test_partial_settings_from_json() {
        let settings: ChartSettings = serde_json::from_str(r#"{"house_system": "koch"}"#).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.bodies, default_bodies());
    }
}
