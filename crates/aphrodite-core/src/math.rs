//! Circular degree arithmetic and spherical-astronomy helpers.
//!
//! All angles are in degrees unless a function name says otherwise.

use serde::{Deserialize, Serialize};

/// Normalize any finite angle into `[0, 360)`.
///
/// `rem_euclid` alone can return exactly `360.0` for tiny negative inputs
/// (e.g. `-1e-15`), and `-0.0` for negative zero; both are folded to `0.0`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0) + 0.0;
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shortest angular distance between two longitudes, in `[0, 180]`.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Signed difference `a - b` folded into `(-180, 180]`.
pub fn signed_delta(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Midpoint of two longitudes on the shorter arc.
///
/// For exactly opposite points the arc is ambiguous; the midpoint of the
/// direct average is returned.
pub fn shortest_arc_midpoint(a: f64, b: f64) -> f64 {
    let a = normalize_degrees(a);
    let b = normalize_degrees(b);
    let direct = (a + b) / 2.0;
    if (a - b).abs() > 180.0 {
        normalize_degrees(direct + 180.0)
    } else {
        normalize_degrees(direct)
    }
}

/// Reflection across the Cancer/Capricorn solstice axis.
pub fn antiscion(longitude: f64) -> f64 {
    normalize_degrees(180.0 - longitude)
}

/// Reflection across the Aries/Libra equinox axis.
pub fn contra_antiscion(longitude: f64) -> f64 {
    normalize_degrees(360.0 - longitude)
}

/// Equatorial coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension `[0, 360)`
    pub ra: f64,
    /// Declination `[-90, 90]`
    pub dec: f64,
}

/// Ecliptic (longitude, latitude) to equatorial for obliquity `eps`.
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, eps: f64) -> Equatorial {
    let (l, b, e) = (longitude.to_radians(), latitude.to_radians(), eps.to_radians());
    let sin_dec = b.sin() * e.cos() + b.cos() * e.sin() * l.sin();
    let ra = (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos());
    Equatorial {
        ra: normalize_degrees(ra.to_degrees()),
        dec: sin_dec.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// Equatorial (ra, dec) to ecliptic `(longitude, latitude)` for obliquity `eps`.
pub fn equatorial_to_ecliptic(ra: f64, dec: f64, eps: f64) -> (f64, f64) {
    let (a, d, e) = (ra.to_radians(), dec.to_radians(), eps.to_radians());
    let lon = (a.sin() * e.cos() + d.tan() * e.sin()).atan2(a.cos());
    let sin_lat = d.sin() * e.cos() - d.cos() * e.sin() * a.sin();
    (
        normalize_degrees(lon.to_degrees()),
        sin_lat.clamp(-1.0, 1.0).asin().to_degrees(),
    )
}

/// Altitude of a body above the horizon given its hour angle.
pub fn altitude(hour_angle: f64, dec: f64, latitude: f64) -> f64 {
    let (h, d, p) = (hour_angle.to_radians(), dec.to_radians(), latitude.to_radians());
    let sin_alt = p.sin() * d.sin() + p.cos() * d.cos() * h.cos();
    sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Semi-diurnal arc (hour angle of rising) for a declination at a latitude.
///
/// `None` when the body is circumpolar or never rises.
pub fn semi_diurnal_arc(dec: f64, latitude: f64) -> Option<f64> {
    let x = -latitude.to_radians().tan() * dec.to_radians().tan();
    if !x.is_finite() || x.abs() > 1.0 {
        return None;
    }
    Some(x.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_range() {
        for v in [-720.5, -360.0, -1e-15, -0.0, 0.0, 359.999, 360.0, 1e9, -1e9, 725.25] {
            let n = normalize_degrees(v);
            assert!((0.0..360.0).contains(&n), "{} -> {}", v, n);
        }
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(390.0), 30.0);
        assert!(normalize_degrees(-0.0).is_sign_positive());
    }

    #[test]
    fn test_angular_separation_wraps() {
        assert!((angular_separation(358.0, 2.0) - 4.0).abs() < 1e-12);
        assert!((angular_separation(2.0, 358.0) - 4.0).abs() < 1e-12);
        assert!((angular_separation(10.0, 190.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_signed_delta() {
        assert!((signed_delta(2.0, 358.0) - 4.0).abs() < 1e-12);
        assert!((signed_delta(358.0, 2.0) + 4.0).abs() < 1e-12);
        assert_eq!(signed_delta(190.0, 10.0), 180.0);
    }

    #[test]
    fn test_shortest_arc_midpoint() {
        assert_eq!(shortest_arc_midpoint(359.0, 1.0), 0.0);
        assert_eq!(shortest_arc_midpoint(42.5, 42.5), 42.5);
        assert!((shortest_arc_midpoint(10.0, 50.0) - 30.0).abs() < 1e-12);
        assert!((shortest_arc_midpoint(300.0, 80.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_antiscia_involutive() {
        for lon in [0.0, 15.5, 89.999, 180.0, 271.3, 359.9] {
            assert!(angular_separation(antiscion(antiscion(lon)), lon) < 1e-9);
            assert!(angular_separation(contra_antiscion(contra_antiscion(lon)), lon) < 1e-9);
        }
        assert!((antiscion(10.0) - 170.0).abs() < 1e-12);
        assert!((contra_antiscion(10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn test_equatorial_roundtrip_solstice() {
        let eps = 23.4393;
        let eq = ecliptic_to_equatorial(90.0, 0.0, eps);
        assert!((eq.ra - 90.0).abs() < 1e-9);
        assert!((eq.dec - eps).abs() < 1e-9);
        let (lon, lat) = equatorial_to_ecliptic(eq.ra, eq.dec, eps);
        assert!((lon - 90.0).abs() < 1e-9);
        assert!(lat.abs() < 1e-9);
    }

    #[test]
    fn test_semi_diurnal_arc() {
        assert!((semi_diurnal_arc(0.0, 45.0).unwrap() - 90.0).abs() < 1e-9);
        assert!(semi_diurnal_arc(30.0, 70.0).is_none());
    }
}
