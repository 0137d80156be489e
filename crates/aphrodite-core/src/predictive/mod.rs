//! Predictive and comparative techniques built on assembled charts.
//!
//! Every technique reads one or two charts and returns new values; the input
//! charts are never modified.

pub mod composite;
pub mod harmonic;
pub mod progressions;
pub mod returns;
pub mod synastry;
pub mod transits;

pub use composite::composite_chart;
pub use harmonic::harmonic_chart;
pub use progressions::{progressed_julian_day, secondary_progression, solar_arc, ProgressionReport};
pub use returns::{find_return, lunar_return, solar_return, ReturnKind};
pub use synastry::{synastry, SynastryReport};
pub use transits::{transits, TransitReport};

use crate::aspects::HasLongitude;
use crate::chart::{Chart, ChartSettings, DerivedSelection};
use crate::ephemeris::types::GeoLocation;
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseCusps;
use serde::{Deserialize, Serialize};

/// A point of one chart placed in the houses of another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseOverlay {
    pub point: String,
    pub house: u8,
}

/// Houses of `cusps` holding each point; points no house claims are skipped
pub fn house_overlay(points: &[&dyn HasLongitude], cusps: &HouseCusps) -> Vec<HouseOverlay> {
    points
        .iter()
        .filter_map(|p| match cusps.house_of(p.longitude()) {
            Ok(house) => Some(HouseOverlay {
                point: p.label().to_string(),
                house,
            }),
            Err(e) => {
                log::warn!("overlay of {} skipped: {}", p.label(), e);
                None
            }
        })
        .collect()
}

/// Settings reproducing how a chart was built (bodies, house system, zodiac,
/// observer and aspect restriction), without derived points
pub(crate) fn settings_like(chart: &Chart) -> ChartSettings {
    let meta = chart.metadata();
    ChartSettings {
        bodies: chart.points().iter().map(|p| p.body).collect(),
        house_system: meta.house_system.unwrap_or_default(),
        zodiac: meta.zodiac,
        observer: meta.observer,
        aspect_angles: meta.aspect_angles.clone(),
        derived: DerivedSelection::none(),
    }
}

pub(crate) fn chart_location(chart: &Chart) -> ChartResult<GeoLocation> {
    chart
        .metadata()
        .location
        .ok_or_else(|| ChartError::MalformedInput("chart has no location".to_string()))
}

pub(crate) fn chart_julian_day(chart: &Chart) -> ChartResult<f64> {
    chart
        .metadata()
        .julian_day
        .ok_or_else(|| ChartError::MalformedInput("chart has no instant".to_string()))
}
