//! Julian day conversion, sidereal time and obliquity.

use crate::error::{ChartError, ChartResult};
use crate::math::normalize_degrees;
use chrono::{DateTime, TimeZone, Utc};

pub const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert UTC datetime to Julian Day (UT)
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert Julian Day (UT) to UTC datetime, rounded to the millisecond
pub fn julian_day_to_datetime(jd: f64) -> ChartResult<DateTime<Utc>> {
    if !jd.is_finite() {
        return Err(ChartError::MalformedInput(format!("non-finite julian day: {jd}")));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ChartError::MalformedInput(format!("julian day out of range: {jd}")))
}

/// Julian centuries since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / 36_525.0
}

/// Approximate ΔT = TT − UT in seconds (Espenak & Meeus polynomials).
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    let year = 2000.0 + (jd_ut - J2000) / 365.25;
    if (1986.0..2005.0).contains(&year) {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2) + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if (2005.0..2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if (1961.0..1986.0).contains(&year) {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if (1900.0..1961.0).contains(&year) {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// Julian Ephemeris Day for a Julian Day in UT
pub fn terrestrial_time(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(jd_ut) / SECONDS_PER_DAY
}

/// Greenwich mean sidereal time in degrees
pub fn greenwich_sidereal_time(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time (ARMC) in degrees for an east-positive longitude
pub fn local_sidereal_time(jd_ut: f64, longitude: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd_ut) + longitude)
}

/// Mean obliquity of the ecliptic in degrees
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let seconds = 21.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    23.0 + 26.0 / 60.0 + seconds / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((datetime_to_julian_day(dt) - J2000).abs() < 1e-9);
        let back = julian_day_to_datetime(J2000).unwrap();
        assert_eq!(back, dt);
    }

    #[test]
    fn test_gmst_meeus_example() {
        // Meeus, example 12.a: 1987-04-10 0h UT -> 13h10m46.3668s
        let jd = 2_446_895.5;
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!((greenwich_sidereal_time(jd) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_mean_obliquity_j2000() {
        assert!((mean_obliquity(J2000) - 23.439_291).abs() < 1e-5);
    }

    #[test]
    fn test_delta_t_plausible() {
        let dt = delta_t_seconds(J2000);
        assert!(dt > 60.0 && dt < 70.0, "{}", dt);
    }
}
