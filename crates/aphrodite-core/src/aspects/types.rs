use serde::{Deserialize, Serialize};

/// Anything with an ecliptic longitude that can take part in aspects
pub trait HasLongitude {
    /// Name used in aspect output
    fn label(&self) -> &str;
    /// Longitude in degrees (0-360)
    fn longitude(&self) -> f64;
    /// Speed in longitude (degrees per day), if known
    fn speed(&self) -> Option<f64> {
        None
    }
    /// Whether luminary orbs apply
    fn is_luminary(&self) -> bool {
        false
    }
}

/// A bare longitude, handy for ad-hoc aspect checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudePoint {
    pub label: String,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub luminary: bool,
}

impl LongitudePoint {
    pub fn new(label: &str, longitude: f64, speed: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            longitude,
            speed,
            luminary: false,
        }
    }

    pub fn luminary(mut self) -> Self {
        self.luminary = true;
        self
    }
}

impl HasLongitude for LongitudePoint {
    fn label(&self) -> &str {
        &self.label
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn speed(&self) -> Option<f64> {
        self.speed
    }

    fn is_luminary(&self) -> bool {
        self.luminary
    }
}

/// One aspect between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub point_a: String,
    pub point_b: String,
    /// Aspect name: "Conjunction", "Trine", etc.
    pub aspect_name: String,
    /// Exact angle of the aspect definition
    pub exact_angle: f64,
    /// Shortest angular distance between the points, `[0, 180]`
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    /// `None` when a speed is unknown or both points move at the same rate
    pub applying: Option<bool>,
    /// Whether the orb is below the exactness threshold
    pub exact: bool,
}

impl Aspect {
    /// Whether this aspect connects the two named points, in either order
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.point_a == a && self.point_b == b) || (self.point_a == b && self.point_b == a)
    }

    pub fn involves(&self, name: &str) -> bool {
        self.point_a == name || self.point_b == name
    }
}
