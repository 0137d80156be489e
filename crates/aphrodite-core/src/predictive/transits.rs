use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::chart::{Chart, ChartAssembler, ChartKind, ChartRequest};
use crate::ephemeris::types::GeoLocation;
use crate::error::ChartResult;
use crate::predictive::{chart_location, house_overlay, settings_like, HouseOverlay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub chart: Chart,
    /// Transiting point first, natal point second
    pub aspects: Vec<Aspect>,
    /// Transiting points in the natal houses
    pub natal_houses: Vec<HouseOverlay>,
}

/// Transits to a natal chart at `instant`, cast for the natal place unless
/// `location` overrides it.
pub fn transits(
    assembler: &ChartAssembler,
    natal: &Chart,
    instant: DateTime<Utc>,
    location: Option<GeoLocation>,
) -> ChartResult<TransitReport> {
    let location = match location {
        Some(l) => l,
        None => chart_location(natal)?,
    };
    let request = ChartRequest::new(instant, location).with_settings(settings_like(natal));
    let chart = assembler.assemble_as(&request, ChartKind::Transit)?;

    let calculator = AspectCalculator::from_config(assembler.config()).with_orb(assembler.config().orbs.transit);
    let moving: Vec<&dyn HasLongitude> = chart.points().iter().map(|p| p as &dyn HasLongitude).collect();
    let aspects = calculator.find_cross_aspects(&moving, &natal.aspect_points());
    let natal_houses = match natal.cusps() {
        Some(cusps) => house_overlay(&moving, cusps),
        None => Vec::new(),
    };
    log::debug!("{} transit aspects at {}", aspects.len(), instant);

    Ok(TransitReport {
        chart,
        aspects,
        natal_houses,
    })
}
