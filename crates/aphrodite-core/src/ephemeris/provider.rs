use crate::ephemeris::time::J2000;
use crate::ephemeris::types::{Ayanamsa, Body, EclipticPosition, GeoLocation, HouseFrame, Observer};
use crate::error::ChartResult;
use crate::houses::HouseSystem;

/// General precession used by the default ayanamsa model, arc seconds per year
const AYANAMSA_PRECESSION_ARCSEC: f64 = 50.2388475;

/// Source of raw astronomical positions.
///
/// Implementations must be safe to share between threads; the engine calls
/// them from concurrent searches.
pub trait EphemerisProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Geocentric or topocentric ecliptic position of `body` (equinox of date)
    fn position(&self, body: Body, jd_ut: f64, observer: &Observer) -> ChartResult<EclipticPosition>;

    /// Cusps and angles for a location
    fn houses(&self, jd_ut: f64, location: &GeoLocation, system: HouseSystem) -> ChartResult<HouseFrame>;

    /// Sidereal offset subtracted from tropical longitudes
    fn ayanamsa(&self, jd_ut: f64, mode: Ayanamsa) -> ChartResult<f64> {
        let years = (jd_ut - J2000) / 365.25;
        Ok(mode.j2000_value() + years * AYANAMSA_PRECESSION_ARCSEC / 3600.0)
    }
}
