//! Fixed-star alignments: conjunctions/oppositions and parans.

use crate::aspects::{Aspect, AspectCalculator, HasLongitude};
use crate::config::{AspectDefinition, FixedStar};
use crate::ephemeris::time::{julian_day_to_datetime, local_sidereal_time, mean_obliquity, J2000};
use crate::ephemeris::types::GeoLocation;
use crate::error::ChartResult;
use crate::math::{ecliptic_to_equatorial, normalize_degrees, semi_diurnal_arc, Equatorial};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.25;
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985_647_366_29;
const MINUTES_PER_DEGREE: f64 = 4.0;

/// A catalog star precessed to a chart's date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarPosition {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub magnitude: f64,
}

impl HasLongitude for StarPosition {
    fn label(&self) -> &str {
        &self.name
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Ecliptic longitude of a star at `jd` using a constant precession rate
pub fn precessed_longitude(star: &FixedStar, jd: f64, arcsec_per_year: f64) -> f64 {
    let years = (jd - J2000) / DAYS_PER_YEAR;
    normalize_degrees(star.longitude + years * arcsec_per_year / 3600.0)
}

pub fn star_positions(catalog: &[FixedStar], jd: f64, arcsec_per_year: f64) -> Vec<StarPosition> {
    catalog
        .iter()
        .map(|star| StarPosition {
            name: star.name.clone(),
            longitude: precessed_longitude(star, jd, arcsec_per_year),
            latitude: star.latitude,
            magnitude: star.magnitude,
        })
        .collect()
}

/// Conjunctions and oppositions between stars and chart points within `orb`
pub fn star_contacts(stars: &[StarPosition], points: &[&dyn HasLongitude], orb: f64) -> Vec<Aspect> {
    let calculator = AspectCalculator::new(vec![
        AspectDefinition::new("Conjunction", 0.0, orb, None, true),
        AspectDefinition::new("Opposition", 180.0, orb, None, true),
    ]);
    let stars: Vec<&dyn HasLongitude> = stars.iter().map(|s| s as &dyn HasLongitude).collect();
    calculator.find_cross_aspects(&stars, points)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleEvent {
    Rising,
    Culminating,
    Setting,
    AntiCulminating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paran {
    pub star: String,
    pub point: String,
    pub star_event: AngleEvent,
    pub point_event: AngleEvent,
    pub star_time: DateTime<Utc>,
    pub point_time: DateTime<Utc>,
    /// Absolute difference between the two instants in minutes
    pub minutes_apart: f64,
}

/// Julian day (UT) of the local mean midnight starting the day containing `jd`
pub fn local_day_start(jd: f64, longitude: f64) -> f64 {
    let offset = longitude / 360.0;
    ((jd + offset - 0.5).floor() + 0.5) - offset
}

/// Instants within the local day at which a body with equatorial position
/// `eq` crosses each angle. Circumpolar and never-rising bodies have only the
/// meridian events.
pub fn angle_events(eq: Equatorial, location: &GeoLocation, day_start: f64) -> Vec<(AngleEvent, f64)> {
    angle_events_between(eq, location, day_start, day_start + 1.0)
}

/// Every angle crossing in `[start, end)`; an angle can be crossed twice in
/// one solar day.
fn angle_events_between(eq: Equatorial, location: &GeoLocation, start: f64, end: f64) -> Vec<(AngleEvent, f64)> {
    let lst0 = local_sidereal_time(start, location.lon);
    let mut hour_angles = vec![(AngleEvent::Culminating, 0.0), (AngleEvent::AntiCulminating, 180.0)];
    if let Some(h0) = semi_diurnal_arc(eq.dec, location.lat) {
        hour_angles.push((AngleEvent::Rising, -h0));
        hour_angles.push((AngleEvent::Setting, h0));
    }

    let mut events = Vec::new();
    for (event, h) in hour_angles {
        let mut t = start + normalize_degrees(eq.ra + h - lst0) / SIDEREAL_DEGREES_PER_DAY;
        while t < end {
            events.push((event, t));
            t += 360.0 / SIDEREAL_DEGREES_PER_DAY;
        }
    }
    events.sort_by(|a, b| a.1.total_cmp(&b.1));
    events
}

/// Parans between stars and bodies for the local day of `jd`.
///
/// `bodies` are `(label, longitude, latitude)`; bodies are held at their
/// positions at `jd` for the whole day. A pair is kept when at least one of
/// its two events falls inside the day, so pairs straddling local midnight
/// are found.
pub fn find_parans(
    stars: &[StarPosition],
    bodies: &[(String, f64, f64)],
    jd: f64,
    location: &GeoLocation,
    orb_degrees: f64,
) -> ChartResult<Vec<Paran>> {
    location.validate()?;
    let eps = mean_obliquity(jd);
    let day_start = local_day_start(jd, location.lon);
    let tolerance_minutes = orb_degrees * MINUTES_PER_DEGREE;
    let margin = tolerance_minutes / 1440.0;
    let (start, end) = (day_start - margin, day_start + 1.0 + margin);
    let in_day = |t: f64| t >= day_start && t < day_start + 1.0;

    let body_events: Vec<(&str, Vec<(AngleEvent, f64)>)> = bodies
        .iter()
        .map(|(label, lon, lat)| {
            let eq = ecliptic_to_equatorial(*lon, *lat, eps);
            (label.as_str(), angle_events_between(eq, location, start, end))
        })
        .collect();

    let mut parans = Vec::new();
    for star in stars {
        let eq = ecliptic_to_equatorial(star.longitude, star.latitude, eps);
        for (star_event, star_jd) in angle_events_between(eq, location, start, end) {
            for (label, events) in &body_events {
                for (point_event, point_jd) in events {
                    let minutes_apart = (star_jd - point_jd).abs() * 1440.0;
                    if minutes_apart <= tolerance_minutes && (in_day(star_jd) || in_day(*point_jd)) {
                        parans.push(Paran {
                            star: star.name.clone(),
                            point: label.to_string(),
                            star_event,
                            point_event: *point_event,
                            star_time: julian_day_to_datetime(star_jd)?,
                            point_time: julian_day_to_datetime(*point_jd)?,
                            minutes_apart,
                        });
                    }
                }
            }
        }
    }
    parans.sort_by(|a, b| a.minutes_apart.total_cmp(&b.minutes_apart).then_with(|| a.star.cmp(&b.star)));
    Ok(parans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::LongitudePoint;
    use crate::config::default_fixed_stars;

    #[test]
    fn test_precession_rate() {
        let regulus = FixedStar {
            name: "Regulus".to_string(),
            longitude: 149.83,
            latitude: 0.47,
            magnitude: 1.4,
        };
        assert!((precessed_longitude(&regulus, J2000, 50.29) - 149.83).abs() < 1e-12);
        // one century later: 5029" = 1.397 degrees
        let later = precessed_longitude(&regulus, J2000 + 36_525.0, 50.29);
        assert!((later - 149.83 - 1.396_944).abs() < 1e-5);
    }

    #[test]
    fn test_star_conjunction() {
        let stars = star_positions(&default_fixed_stars(), J2000, 50.29);
        let sun = LongitudePoint::new("Sun", 150.5, None).luminary();
        let contacts = star_contacts(&stars, &[&sun], 1.5);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].point_a, "Regulus");
    }

    #[test]
    fn test_local_day_start() {
        // Greenwich: midnight before noon of J2000
        assert!((local_day_start(J2000, 0.0) - (J2000 - 0.5)).abs() < 1e-9);
        // 90 E: local midnight is 6h earlier in UT
        assert!((local_day_start(J2000, 90.0) - (J2000 - 0.75)).abs() < 1e-9);
    }

    #[test]
    fn test_circumpolar_star_has_only_meridian_events() {
        let location = GeoLocation::new(60.0, 0.0).unwrap();
        let events = angle_events(Equatorial { ra: 10.0, dec: 80.0 }, &location, J2000 - 0.5);
        assert_eq!(events.len(), 2);
        let events = angle_events(Equatorial { ra: 10.0, dec: 20.0 }, &location, J2000 - 0.5);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|(_, t)| *t >= J2000 - 0.5 && *t < J2000 + 0.5));
    }

    #[test]
    fn test_identical_positions_form_parans() {
        let location = GeoLocation::new(40.0, -74.0).unwrap();
        let star = StarPosition {
            name: "Spica".to_string(),
            longitude: 203.84,
            latitude: -2.05,
            magnitude: 1.0,
        };
        let bodies = vec![("Mars".to_string(), 203.84, -2.05)];
        let parans = find_parans(&[star], &bodies, J2000, &location, 1.0).unwrap();
        // every event matches its twin
        assert!(parans.len() >= 4);
        assert!(parans.iter().any(|p| p.star_event == AngleEvent::Rising && p.point_event == AngleEvent::Rising));
        assert!(parans[0].minutes_apart < 1e-6);
    }

    #[test]
    fn test_parans_straddling_local_midnight() {
        let location = GeoLocation::new(40.0, 0.0).unwrap();
        let day_start = local_day_start(J2000, location.lon);
        let lst0 = local_sidereal_time(day_start, location.lon);
        let eps = mean_obliquity(J2000);
        // star culminates about a minute before local midnight, the body a minute after
        let (star_lon, star_lat) = crate::math::equatorial_to_ecliptic(lst0 - 0.25, 10.0, eps);
        let (body_lon, body_lat) = crate::math::equatorial_to_ecliptic(lst0 + 0.25, 10.0, eps);
        let star = StarPosition {
            name: "Test Star".to_string(),
            longitude: star_lon,
            latitude: star_lat,
            magnitude: 1.0,
        };
        let bodies = vec![("Mars".to_string(), body_lon, body_lat)];

        let parans = find_parans(&[star], &bodies, J2000, &location, 1.0).unwrap();
        let midnight = julian_day_to_datetime(day_start).unwrap();
        let straddling = parans
            .iter()
            .find(|p| p.star_event == AngleEvent::Culminating && p.point_event == AngleEvent::Culminating && p.star_time < midnight)
            .unwrap();
        assert!(straddling.point_time >= midnight);
        assert!(straddling.minutes_apart < 2.5);
    }
}
