use crate::ephemeris::analytic::AnalyticEphemeris;
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::time::{datetime_to_julian_day, mean_obliquity};
use crate::ephemeris::types::{Ayanamsa, Body, EclipticPosition, GeoLocation, Observer, ZodiacType};
use crate::error::{ChartError, ChartResult};
use crate::houses::{HouseCusps, HouseSet, HouseSystem};
use crate::math::normalize_degrees;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Wraps an [`EphemerisProvider`], converting calendar time to Julian days and
/// normalizing and validating everything the provider returns.
#[derive(Clone)]
pub struct EphemerisAdapter {
    provider: Arc<dyn EphemerisProvider>,
}

impl EphemerisAdapter {
    pub fn new(provider: Arc<dyn EphemerisProvider>) -> Self {
        Self { provider }
    }

    /// Adapter over the built-in analytic ephemeris
    pub fn analytic() -> Self {
        Self::new(Arc::new(AnalyticEphemeris::new()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn julian_day(&self, dt: DateTime<Utc>) -> f64 {
        datetime_to_julian_day(dt)
    }

    /// Position of a body with longitude normalized into `[0, 360)`.
    ///
    /// The south node is always derived from the true node.
    pub fn position(&self, body: Body, jd_ut: f64, observer: &Observer) -> ChartResult<EclipticPosition> {
        if !jd_ut.is_finite() {
            return Err(ChartError::MalformedInput(format!("non-finite julian day: {jd_ut}")));
        }
        if let Observer::Topocentric { location, .. } = observer {
            location.validate()?;
        }
        let raw = if body == Body::SouthNode {
            let north = self.provider.position(Body::TrueNode, jd_ut, observer)?;
            EclipticPosition {
                longitude: north.longitude + 180.0,
                latitude: -north.latitude,
                ..north
            }
        } else {
            self.provider.position(body, jd_ut, observer)?
        };

        if !raw.longitude.is_finite()
            || !raw.latitude.is_finite()
            || !raw.speed_longitude.is_finite()
            || !raw.distance_au.is_finite()
        {
            return Err(ChartError::unavailable(
                body.name(),
                format!("{} returned a non-finite position at JD {jd_ut}", self.provider.name()),
            ));
        }
        Ok(EclipticPosition {
            longitude: normalize_degrees(raw.longitude),
            ..raw
        })
    }

    /// Geocentric longitude only
    pub fn longitude(&self, body: Body, jd_ut: f64) -> ChartResult<f64> {
        Ok(self.position(body, jd_ut, &Observer::Geocentric)?.longitude)
    }

    /// Geocentric speed in longitude only
    pub fn speed(&self, body: Body, jd_ut: f64) -> ChartResult<f64> {
        Ok(self.position(body, jd_ut, &Observer::Geocentric)?.speed_longitude)
    }

    /// Validated cusps and angles.
    ///
    /// Semi-arc systems are refused inside the polar circles even when the
    /// provider would silently substitute another system.
    pub fn houses(&self, jd_ut: f64, location: &GeoLocation, system: HouseSystem) -> ChartResult<HouseSet> {
        location.validate()?;
        if location.lat.abs() >= 90.0 {
            return Err(ChartError::MalformedInput(format!(
                "houses are undefined at the pole (latitude {})",
                location.lat
            )));
        }
        if system.requires_semi_arcs() {
            let eps = mean_obliquity(jd_ut);
            if (location.lat.to_radians().tan() * eps.to_radians().tan()).abs() > 1.0 {
                return Err(ChartError::house_calc(
                    system.name(),
                    format!("semi-arcs undefined at latitude {:.4}", location.lat),
                ));
            }
        }

        let frame = self.provider.houses(jd_ut, location, system)?;
        let cusps = HouseCusps::new(frame.cusps).map_err(|e| match e {
            ChartError::HouseCalc { detail, .. } => ChartError::house_calc(system.name(), detail),
            other => other,
        })?;
        let angles = [frame.ascendant, frame.midheaven, frame.vertex, frame.east_point, frame.armc];
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(ChartError::house_calc(system.name(), "non-finite angle"));
        }
        log::debug!(
            "houses {} at JD {:.5} lat {:.4}: asc {:.4} mc {:.4}",
            system,
            jd_ut,
            location.lat,
            frame.ascendant,
            frame.midheaven
        );
        Ok(HouseSet {
            system,
            cusps,
            ascendant: normalize_degrees(frame.ascendant),
            midheaven: normalize_degrees(frame.midheaven),
            vertex: normalize_degrees(frame.vertex),
            east_point: normalize_degrees(frame.east_point),
            armc: normalize_degrees(frame.armc),
        })
    }

    pub fn ayanamsa(&self, jd_ut: f64, mode: Ayanamsa) -> ChartResult<f64> {
        self.provider.ayanamsa(jd_ut, mode)
    }

    /// Degrees to subtract from tropical longitudes for a zodiac
    pub fn zodiac_offset(&self, jd_ut: f64, zodiac: ZodiacType) -> ChartResult<f64> {
        match zodiac {
            ZodiacType::Tropical => Ok(0.0),
            ZodiacType::Sidereal(mode) => self.ayanamsa(jd_ut, mode),
        }
    }
}

impl std::fmt::Debug for EphemerisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemerisAdapter")
            .field("provider", &self.provider.name())
            .finish()
    }
}
