#![allow(dead_code)]

use aphrodite_core::ephemeris::time::{local_sidereal_time, mean_obliquity, J2000};
use aphrodite_core::ephemeris::types::{Body, EclipticPosition, GeoLocation, HouseFrame, Observer};
use aphrodite_core::ephemeris::{EphemerisAdapter, EphemerisProvider};
use aphrodite_core::houses::{compute_house_frame, HouseSystem};
use aphrodite_core::{ChartAssembler, ChartError, ChartResult, EngineConfig};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Bodies moving at constant speed from fixed J2000 longitudes
pub struct LinearProvider {
    motions: HashMap<Body, (f64, f64)>,
    failing: Vec<Body>,
}

impl LinearProvider {
    pub fn new() -> Self {
        let motions = [
            (Body::Sun, 280.0, 0.9856),
            (Body::Moon, 200.0, 13.176),
            (Body::Mercury, 270.0, 1.2),
            (Body::Venus, 240.0, 1.2),
            (Body::Mars, 330.0, 0.52),
            (Body::Jupiter, 25.0, 0.083),
            (Body::Saturn, 40.0, 0.033),
            (Body::Uranus, 315.0, 0.0117),
            (Body::Neptune, 303.0, 0.006),
            (Body::Pluto, 251.0, 0.004),
            (Body::TrueNode, 125.0, -0.053),
            (Body::MeanNode, 125.0, -0.053),
        ]
        .into_iter()
        .map(|(b, lon, speed)| (b, (lon, speed)))
        .collect();
        Self {
            motions,
            failing: Vec::new(),
        }
    }

    pub fn failing(mut self, body: Body) -> Self {
        self.failing.push(body);
        self
    }

    pub fn with_motion(mut self, body: Body, lon: f64, speed: f64) -> Self {
        self.motions.insert(body, (lon, speed));
        self
    }
}

impl EphemerisProvider for LinearProvider {
    fn name(&self) -> &str {
        "linear"
    }

    fn position(&self, body: Body, jd_ut: f64, _observer: &Observer) -> ChartResult<EclipticPosition> {
        if self.failing.contains(&body) {
            return Err(ChartError::EphemerisUnavailable {
                body: body.name().to_string(),
                detail: "switched off".to_string(),
            });
        }
        let (lon, speed) = self.motions.get(&body).copied().ok_or_else(|| ChartError::EphemerisUnavailable {
            body: body.name().to_string(),
            detail: "not modelled".to_string(),
        })?;
        Ok(EclipticPosition {
            longitude: lon + speed * (jd_ut - J2000),
            latitude: 0.0,
            distance_au: 1.0,
            speed_longitude: speed,
        })
    }

    fn houses(&self, jd_ut: f64, location: &GeoLocation, system: HouseSystem) -> ChartResult<HouseFrame> {
        let armc = local_sidereal_time(jd_ut, location.lon);
        compute_house_frame(system, armc, location.lat, mean_obliquity(jd_ut))
    }
}

pub fn linear_assembler(provider: LinearProvider) -> ChartAssembler {
    ChartAssembler::new(EphemerisAdapter::new(Arc::new(provider)), Arc::new(EngineConfig::default()))
}

pub fn analytic_assembler() -> ChartAssembler {
    ChartAssembler::new(EphemerisAdapter::analytic(), Arc::new(EngineConfig::default()))
}

pub fn birth_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1990, 7, 15, 14, 30, 0).unwrap()
}

pub fn london() -> GeoLocation {
    GeoLocation::new(51.5074, -0.1278).unwrap()
}

pub fn new_york() -> GeoLocation {
    GeoLocation::new(40.7128, -74.0060).unwrap()
}
