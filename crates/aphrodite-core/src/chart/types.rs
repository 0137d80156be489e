use crate::aspects::{Aspect, HasLongitude};
use crate::chart::settings::ObserverMode;
use crate::derived::DerivedPoints;
use crate::ephemeris::types::{Body, EclipticPosition, GeoLocation, ZodiacType};
use crate::error::{ChartError, ErrorKind};
use crate::houses::{HouseCusps, HouseSystem};
use crate::math::normalize_degrees;
use crate::western::Dignity;
use crate::zodiac::{Sign, SignPosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A body placed in a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    pub body: Body,
    pub longitude: f64,
    pub latitude: f64,
    pub distance_au: f64,
    pub speed_longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub position: SignPosition,
    pub retrograde: bool,
    pub house: Option<u8>,
    pub dignity: Option<Dignity>,
}

impl CelestialPoint {
    pub fn new(body: Body, pos: EclipticPosition) -> Self {
        Self::from_longitude(body, pos.longitude, pos.latitude, pos.distance_au, pos.speed_longitude)
    }

    pub fn from_longitude(body: Body, longitude: f64, latitude: f64, distance_au: f64, speed: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        let position = SignPosition::from_longitude(longitude);
        Self {
            body,
            longitude,
            latitude,
            distance_au,
            speed_longitude: speed,
            sign: position.sign,
            degree_in_sign: position.degree_in_sign,
            position,
            retrograde: speed < 0.0,
            house: None,
            dignity: None,
        }
    }

    /// Same body moved to another longitude and speed; house and dignity are cleared
    pub fn relocated(&self, longitude: f64, speed: f64) -> Self {
        Self::from_longitude(self.body, longitude, self.latitude, self.distance_au, speed)
    }
}

impl HasLongitude for CelestialPoint {
    fn label(&self) -> &str {
        self.body.name()
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn speed(&self) -> Option<f64> {
        Some(self.speed_longitude)
    }

    fn is_luminary(&self) -> bool {
        self.body.is_luminary()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    Ascendant,
    Midheaven,
    Descendant,
    ImumCoeli,
    Vertex,
    EastPoint,
}

impl AngleKind {
    pub fn name(self) -> &'static str {
        match self {
            AngleKind::Ascendant => "Ascendant",
            AngleKind::Midheaven => "Midheaven",
            AngleKind::Descendant => "Descendant",
            AngleKind::ImumCoeli => "Imum Coeli",
            AngleKind::Vertex => "Vertex",
            AngleKind::EastPoint => "East Point",
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chart angle; angles have no speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub kind: AngleKind,
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
}

impl Angle {
    pub fn new(kind: AngleKind, longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        let position = SignPosition::from_longitude(longitude);
        Self {
            kind,
            longitude,
            sign: position.sign,
            degree_in_sign: position.degree_in_sign,
        }
    }
}

impl HasLongitude for Angle {
    fn label(&self) -> &str {
        self.kind.name()
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// The four main angles with Descendant and IC derived from Ascendant and
/// Midheaven, followed by Vertex and East Point when known.
pub fn build_angles(ascendant: f64, midheaven: f64, vertex: Option<f64>, east_point: Option<f64>) -> Vec<Angle> {
    let mut angles = vec![
        Angle::new(AngleKind::Ascendant, ascendant),
        Angle::new(AngleKind::Midheaven, midheaven),
        Angle::new(AngleKind::Descendant, ascendant + 180.0),
        Angle::new(AngleKind::ImumCoeli, midheaven + 180.0),
    ];
    if let Some(v) = vertex {
        angles.push(Angle::new(AngleKind::Vertex, v));
    }
    if let Some(e) = east_point {
        angles.push(Angle::new(AngleKind::EastPoint, e));
    }
    angles
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Natal,
    Transit,
    SecondaryProgressed,
    SolarArc,
    SolarReturn,
    LunarReturn,
    Composite,
    Harmonic(u32),
}

/// Non-fatal failure recorded while building a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Point, part or family the failure concerns
    pub subject: String,
    pub kind: ErrorKind,
    pub detail: String,
}

impl Annotation {
    pub fn from_error(subject: impl Into<String>, err: &ChartError) -> Self {
        Self {
            subject: subject.into(),
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub kind: ChartKind,
    pub instant: Option<DateTime<Utc>>,
    pub julian_day: Option<f64>,
    pub location: Option<GeoLocation>,
    pub house_system: Option<HouseSystem>,
    pub zodiac: ZodiacType,
    #[serde(default)]
    pub observer: ObserverMode,
    /// Aspect restriction the chart was built with; `None` uses all definitions
    #[serde(default)]
    pub aspect_angles: Option<Vec<String>>,
    pub day_chart: Option<bool>,
    pub annotations: Vec<Annotation>,
}

impl ChartMetadata {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            instant: None,
            julian_day: None,
            location: None,
            house_system: None,
            zodiac: ZodiacType::Tropical,
            observer: ObserverMode::Geocentric,
            aspect_angles: None,
            day_chart: None,
            annotations: Vec::new(),
        }
    }
}

/// An assembled chart. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    metadata: ChartMetadata,
    points: Vec<CelestialPoint>,
    angles: Vec<Angle>,
    cusps: Option<HouseCusps>,
    aspects: Vec<Aspect>,
    derived: DerivedPoints,
}

impl Chart {
    pub(crate) fn from_parts(
        metadata: ChartMetadata,
        points: Vec<CelestialPoint>,
        angles: Vec<Angle>,
        cusps: Option<HouseCusps>,
        aspects: Vec<Aspect>,
        derived: DerivedPoints,
    ) -> Self {
        Self {
            metadata,
            points,
            angles,
            cusps,
            aspects,
            derived,
        }
    }

    pub fn metadata(&self) -> &ChartMetadata {
        &self.metadata
    }

    pub fn kind(&self) -> ChartKind {
        self.metadata.kind
    }

    pub fn points(&self) -> &[CelestialPoint] {
        &self.points
    }

    pub fn point(&self, body: Body) -> Option<&CelestialPoint> {
        self.points.iter().find(|p| p.body == body)
    }

    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    pub fn angle(&self, kind: AngleKind) -> Option<&Angle> {
        self.angles.iter().find(|a| a.kind == kind)
    }

    pub fn ascendant(&self) -> Option<f64> {
        self.angle(AngleKind::Ascendant).map(|a| a.longitude)
    }

    pub fn midheaven(&self) -> Option<f64> {
        self.angle(AngleKind::Midheaven).map(|a| a.longitude)
    }

    pub fn cusps(&self) -> Option<&HouseCusps> {
        self.cusps.as_ref()
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn derived(&self) -> &DerivedPoints {
        &self.derived
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.metadata.annotations
    }

    pub fn is_day_chart(&self) -> Option<bool> {
        self.metadata.day_chart
    }

    /// Points and the Ascendant/Midheaven, the set aspects are computed over
    pub fn aspect_points(&self) -> Vec<&dyn HasLongitude> {
        crate::chart::assembler::aspect_set(&self.points, &self.angles)
    }

    /// Named longitudes for formula lookups: points, angles and `Cusp N`
    pub fn longitude_pool(&self) -> HashMap<String, f64> {
        longitude_pool(&self.points, &self.angles, self.cusps.as_ref())
    }
}

pub fn longitude_pool(points: &[CelestialPoint], angles: &[Angle], cusps: Option<&HouseCusps>) -> HashMap<String, f64> {
    let mut pool: HashMap<String, f64> = HashMap::new();
    for p in points {
        pool.insert(p.body.name().to_string(), p.longitude);
    }
    for a in angles {
        pool.insert(a.kind.name().to_string(), a.longitude);
    }
    if let Some(cusps) = cusps {
        for (house, cusp) in cusps.iter() {
            pool.insert(format!("Cusp {house}"), cusp);
        }
    }
    pool
}
