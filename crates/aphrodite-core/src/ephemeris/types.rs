use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies the engine knows how to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
    SouthNode,
    Chiron,
    Ceres,
    Pallas,
    Juno,
    Vesta,
    Lilith,
}

pub const ALL_BODIES: [Body; 19] = [
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
    Body::MeanNode,
    Body::TrueNode,
    Body::SouthNode,
    Body::Chiron,
    Body::Ceres,
    Body::Pallas,
    Body::Juno,
    Body::Vesta,
    Body::Lilith,
];

impl Body {
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::MeanNode => "Mean Node",
            Body::TrueNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Chiron => "Chiron",
            Body::Ceres => "Ceres",
            Body::Pallas => "Pallas",
            Body::Juno => "Juno",
            Body::Vesta => "Vesta",
            Body::Lilith => "Lilith",
        }
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }

    /// The seven visible planets of traditional astrology
    pub fn is_classical(self) -> bool {
        matches!(
            self,
            Body::Sun | Body::Moon | Body::Mercury | Body::Venus | Body::Mars | Body::Jupiter | Body::Saturn
        )
    }

    pub fn is_outer(self) -> bool {
        matches!(self, Body::Uranus | Body::Neptune | Body::Pluto)
    }

    /// Lunar nodes and apogee are calculated points, not bodies with phases
    pub fn is_lunar_point(self) -> bool {
        matches!(self, Body::MeanNode | Body::TrueNode | Body::SouthNode | Body::Lilith)
    }

    /// Bodies that can turn retrograde as seen from Earth
    pub fn has_stations(self) -> bool {
        !self.is_luminary() && !self.is_lunar_point()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        let body = match key.as_str() {
            "sun" => Body::Sun,
            "moon" => Body::Moon,
            "mercury" => Body::Mercury,
            "venus" => Body::Venus,
            "mars" => Body::Mars,
            "jupiter" => Body::Jupiter,
            "saturn" => Body::Saturn,
            "uranus" => Body::Uranus,
            "neptune" => Body::Neptune,
            "pluto" => Body::Pluto,
            "meannode" => Body::MeanNode,
            "truenode" | "northnode" | "node" => Body::TrueNode,
            "southnode" => Body::SouthNode,
            "chiron" => Body::Chiron,
            "ceres" => Body::Ceres,
            "pallas" => Body::Pallas,
            "juno" => Body::Juno,
            "vesta" => Body::Vesta,
            "lilith" | "blackmoon" | "meanapogee" => Body::Lilith,
            _ => return Err(ChartError::UnknownBody(s.to_string())),
        };
        Ok(body)
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude, north positive
    pub lat: f64,
    /// Longitude, east positive
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> ChartResult<Self> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ChartError::MalformedInput(format!("latitude out of range: {}", self.lat)));
        }
        if !self.lon.is_finite() || !(-180.0..=360.0).contains(&self.lon) {
            return Err(ChartError::MalformedInput(format!("longitude out of range: {}", self.lon)));
        }
        Ok(())
    }
}

/// Point of view for body positions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observer {
    #[default]
    Geocentric,
    Topocentric {
        location: GeoLocation,
        elevation_m: f64,
    },
}

/// Raw ecliptic position of a body at an instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance from the observer in AU
    pub distance_au: f64,
    /// Speed in longitude (degrees per day)
    pub speed_longitude: f64,
}

/// Raw house output of a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFrame {
    /// Cusps 1..12 in order
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
    pub east_point: f64,
    /// Right ascension of the meridian
    pub armc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    FaganBradley,
    Lahiri,
    Raman,
    Krishnamurti,
    Yukteshwar,
}

impl Ayanamsa {
    /// Value at J2000.0 in degrees
    pub fn j2000_value(self) -> f64 {
        match self {
            Ayanamsa::FaganBradley => 24.7403,
            Ayanamsa::Lahiri => 23.8571,
            Ayanamsa::Raman => 22.4108,
            Ayanamsa::Krishnamurti => 23.7602,
            Ayanamsa::Yukteshwar => 22.4788,
        }
    }

    /// Swiss Ephemeris `SE_SIDM_*` constant
    pub fn swiss_mode(self) -> i32 {
        match self {
            Ayanamsa::FaganBradley => 0,
            Ayanamsa::Lahiri => 1,
            Ayanamsa::Raman => 3,
            Ayanamsa::Krishnamurti => 5,
            Ayanamsa::Yukteshwar => 7,
        }
    }
}

impl FromStr for Ayanamsa {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "fagan_bradley" => Ok(Ayanamsa::FaganBradley),
            "lahiri" | "chitrapaksha" => Ok(Ayanamsa::Lahiri),
            "raman" => Ok(Ayanamsa::Raman),
            "krishnamurti" => Ok(Ayanamsa::Krishnamurti),
            "yukteshwar" => Ok(Ayanamsa::Yukteshwar),
            _ => Err(ChartError::MalformedInput(format!("unknown ayanamsa: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacType {
    #[default]
    Tropical,
    Sidereal(Ayanamsa),
}
