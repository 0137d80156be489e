//! Secondary progressions (a day for a year) and solar arc directions.

use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::assembler::place_in_houses;
use crate::chart::{build_angles, AngleKind, Chart, ChartAssembler, ChartKind, ChartMetadata, ChartRequest};
use crate::derived::DerivedPoints;
use crate::ephemeris::time::julian_day_to_datetime;
use crate::ephemeris::types::Body;
use crate::error::{ChartError, ChartResult};
use crate::houses::HouseCusps;
use crate::math::normalize_degrees;
use crate::predictive::{chart_julian_day, chart_location, settings_like};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionReport {
    pub chart: Chart,
    /// Progressed (directed) point first, natal point second
    pub aspects: Vec<Aspect>,
    /// Solar arc in degrees; for secondary progressions the progressed Sun's advance
    pub arc: f64,
}

/// Julian day whose ephemeris stands for `target_jd`: one day after birth per
/// tropical year lived.
pub fn progressed_julian_day(natal_jd: f64, target_jd: f64, tropical_year_days: f64) -> f64 {
    natal_jd + (target_jd - natal_jd) / tropical_year_days
}

fn progressed_aspects(assembler: &ChartAssembler, progressed: &Chart, natal: &Chart) -> Vec<Aspect> {
    let calculator = AspectCalculator::from_config(assembler.config()).with_orb(assembler.config().orbs.progression);
    calculator.find_cross_aspects(&progressed.aspect_points(), &natal.aspect_points())
}

fn sun_longitude(chart: &Chart) -> ChartResult<f64> {
    chart
        .point(Body::Sun)
        .map(|p| p.longitude)
        .ok_or_else(|| ChartError::MalformedInput("chart has no Sun".to_string()))
}

/// Full chart for the progressed instant at the natal place, angles recomputed
pub fn secondary_progression(assembler: &ChartAssembler, natal: &Chart, target: DateTime<Utc>) -> ChartResult<ProgressionReport> {
    let natal_jd = chart_julian_day(natal)?;
    let target_jd = assembler.adapter().julian_day(target);
    let jd = progressed_julian_day(natal_jd, target_jd, assembler.config().tropical_year_days);
    let request = ChartRequest::new(julian_day_to_datetime(jd)?, chart_location(natal)?).with_settings(settings_like(natal));
    let chart = assembler.assemble_as(&request, ChartKind::SecondaryProgressed)?;

    let arc = normalize_degrees(sun_longitude(&chart)? - sun_longitude(natal)?);
    let aspects = progressed_aspects(assembler, &chart, natal);
    Ok(ProgressionReport { chart, aspects, arc })
}

/// Every natal point and angle advanced by the solar arc. Only the progressed
/// Sun is read from the ephemeris.
pub fn solar_arc(assembler: &ChartAssembler, natal: &Chart, target: DateTime<Utc>) -> ChartResult<ProgressionReport> {
    let natal_jd = chart_julian_day(natal)?;
    let target_jd = assembler.adapter().julian_day(target);
    let jd = progressed_julian_day(natal_jd, target_jd, assembler.config().tropical_year_days);

    let meta = natal.metadata();
    let observer = meta.observer.observer_at(chart_location(natal)?);
    let offset = assembler.adapter().zodiac_offset(jd, meta.zodiac)?;
    let progressed_sun = normalize_degrees(assembler.adapter().position(Body::Sun, jd, &observer)?.longitude - offset);
    let arc = normalize_degrees(progressed_sun - sun_longitude(natal)?);

    let mut points: Vec<_> = natal
        .points()
        .iter()
        .map(|p| p.relocated(p.longitude + arc, p.speed_longitude))
        .collect();

    let angle_at = |kind: AngleKind| natal.angle(kind).map(|a| a.longitude + arc);
    let (Some(asc), Some(mc)) = (angle_at(AngleKind::Ascendant), angle_at(AngleKind::Midheaven)) else {
        return Err(ChartError::MalformedInput("natal chart has no angles".to_string()));
    };
    let angles = build_angles(asc, mc, angle_at(AngleKind::Vertex), angle_at(AngleKind::EastPoint));

    let mut annotations = Vec::new();
    let cusps = match natal.cusps() {
        Some(c) => Some(HouseCusps::new((*c.as_array()).map(|x| x + arc))?),
        None => None,
    };
    if let Some(cusps) = &cusps {
        place_in_houses(&mut points, cusps, &mut annotations);
    }

    let settings = settings_like(natal);
    let aspects = assembler.aspects_for(&points, &angles, &settings);
    let metadata = ChartMetadata {
        instant: Some(target),
        julian_day: Some(target_jd),
        annotations,
        ..natal.metadata().clone()
    };
    let chart = Chart::from_parts(
        ChartMetadata {
            kind: ChartKind::SolarArc,
            ..metadata
        },
        points,
        angles,
        cusps,
        aspects,
        DerivedPoints::default(),
    );

    let aspects = progressed_aspects(assembler, &chart, natal);
    Ok(ProgressionReport { chart, aspects, arc })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_day_for_a_year() {
        let natal = 2_451_545.0;
        let thirty_years = natal + 30.0 * 365.24219;
        assert!((progressed_julian_day(natal, thirty_years, 365.24219) - (natal + 30.0)).abs() < 1e-9);
        assert_eq!(progressed_julian_day(natal, natal, 365.24219), natal);
    }
}
