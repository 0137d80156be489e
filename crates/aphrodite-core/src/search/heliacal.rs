//! Heliacal rising and setting of planets and fixed stars.
//!
//! A body rises heliacally on the first morning it is seen rising before the
//! Sun: at the body's rising the Sun must be at least the arcus visionis
//! below the horizon. It sets heliacally on the last evening it is seen
//! setting after the Sun.

use crate::config::FixedStar;
use crate::derived::fixed_stars::{angle_events, precessed_longitude, AngleEvent};
use crate::ephemeris::time::{julian_day_to_datetime, local_sidereal_time, mean_obliquity};
use crate::ephemeris::types::{Body, GeoLocation};
use crate::ephemeris::EphemerisAdapter;
use crate::error::{ChartError, ChartResult};
use crate::math::{altitude, ecliptic_to_equatorial};
use crate::search::root::{find_crossings, not_found, SearchOptions, SearchWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeliacalKind {
    Rising,
    Setting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeliacalTarget {
    Body(Body),
    Star(FixedStar),
}

impl HeliacalTarget {
    pub fn name(&self) -> &str {
        match self {
            HeliacalTarget::Body(b) => b.name(),
            HeliacalTarget::Star(s) => &s.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeliacalEvent {
    pub target: String,
    pub kind: HeliacalKind,
    /// Rising (setting) instant of the body on the day of the event
    pub julian_day: f64,
    pub instant: DateTime<Utc>,
    /// Depression of the Sun below the horizon at that instant, degrees
    pub sun_depression: f64,
}

/// Finds heliacal events of one target at one place
pub struct HeliacalSearch<'a> {
    adapter: &'a EphemerisAdapter,
    location: GeoLocation,
    arcus_visionis: f64,
    precession_arcsec_per_year: f64,
}

impl<'a> HeliacalSearch<'a> {
    pub fn new(adapter: &'a EphemerisAdapter, location: GeoLocation, arcus_visionis: f64, precession_arcsec_per_year: f64) -> Self {
        Self {
            adapter,
            location,
            arcus_visionis,
            precession_arcsec_per_year,
        }
    }

    /// First heliacal event of `kind` inside the window
    pub fn find(&self, target: &HeliacalTarget, kind: HeliacalKind, window: &SearchWindow, options: &SearchOptions) -> ChartResult<HeliacalEvent> {
        if let HeliacalTarget::Body(body) = target {
            if *body == Body::Sun || body.is_lunar_point() {
                return Err(ChartError::MalformedInput(format!("{} has no heliacal events", body)));
            }
        }
        self.location.validate()?;
        let options = options.with_event(match kind {
            HeliacalKind::Rising => "heliacal rising",
            HeliacalKind::Setting => "heliacal setting",
        });

        // visibility margin goes negative to positive at a rising, the reverse at a setting
        let wanted_rising = kind == HeliacalKind::Rising;
        let crossing = find_crossings(|jd| self.visibility_margin(target, kind, jd), window, &options)?
            .into_iter()
            .find(|c| c.rising == wanted_rising)
            .ok_or_else(|| not_found(window, &options))?;

        // the margin steps once per day; keep the first (last) visible morning (evening)
        let (mut event_jd, mut depression) = self.sun_depression_at_event(target, kind, crossing.jd)?;
        if depression < self.arcus_visionis {
            let shift = if wanted_rising { 1.0 } else { -1.0 };
            (event_jd, depression) = self.sun_depression_at_event(target, kind, event_jd + shift)?;
        }
        Ok(HeliacalEvent {
            target: target.name().to_string(),
            kind,
            julian_day: event_jd,
            instant: julian_day_to_datetime(event_jd)?,
            sun_depression: depression,
        })
    }

    /// Sun depression at the body's rising (setting) minus the arcus visionis
    fn visibility_margin(&self, target: &HeliacalTarget, kind: HeliacalKind, jd: f64) -> ChartResult<f64> {
        let (_, depression) = self.sun_depression_at_event(target, kind, jd)?;
        Ok(depression - self.arcus_visionis)
    }

    /// The body's horizon crossing in the day centred on `jd` and the Sun's depression then
    fn sun_depression_at_event(&self, target: &HeliacalTarget, kind: HeliacalKind, jd: f64) -> ChartResult<(f64, f64)> {
        let eps = mean_obliquity(jd);
        let (lon, lat) = self.target_position(target, jd)?;
        let eq = ecliptic_to_equatorial(lon, lat, eps);
        let wanted = match kind {
            HeliacalKind::Rising => AngleEvent::Rising,
            HeliacalKind::Setting => AngleEvent::Setting,
        };
        let event_jd = angle_events(eq, &self.location, jd - 0.5)
            .into_iter()
            .find(|(event, _)| *event == wanted)
            .map(|(_, t)| t)
            .ok_or_else(|| ChartError::EventNotFound {
                event: "horizon crossing".to_string(),
                detail: format!("{} does not rise or set at latitude {}", target.name(), self.location.lat),
            })?;

        let sun = self.adapter.position(Body::Sun, event_jd, &Default::default())?;
        let sun_eq = ecliptic_to_equatorial(sun.longitude, sun.latitude, eps);
        let hour_angle = local_sidereal_time(event_jd, self.location.lon) - sun_eq.ra;
        let sun_altitude = altitude(hour_angle, sun_eq.dec, self.location.lat);
        Ok((event_jd, -sun_altitude))
    }

    fn target_position(&self, target: &HeliacalTarget, jd: f64) -> ChartResult<(f64, f64)> {
        match target {
            HeliacalTarget::Body(body) => {
                let pos = self.adapter.position(*body, jd, &Default::default())?;
                Ok((pos.longitude, pos.latitude))
            }
            HeliacalTarget::Star(star) => Ok((
                precessed_longitude(star, jd, self.precession_arcsec_per_year),
                star.latitude,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_sun_has_no_heliacal_rising() {
        let adapter = EphemerisAdapter::analytic();
        let search = HeliacalSearch::new(&adapter, GeoLocation::new(30.0, 31.0).unwrap(), 10.0, 50.29);
        let window = SearchWindow::new(2_451_545.0, 2_451_645.0, 1.0).unwrap();
        let err = search
            .find(&HeliacalTarget::Body(Body::Sun), HeliacalKind::Rising, &window, &SearchOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
