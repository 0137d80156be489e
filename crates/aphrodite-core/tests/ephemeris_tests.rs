use aphrodite_core::ephemeris::time::J2000;
use aphrodite_core::ephemeris::{julian_day_to_datetime, Observer, ALL_BODIES};
use aphrodite_core::{Body, EphemerisAdapter, ErrorKind, GeoLocation};
use chrono::{TimeZone, Utc};

#[test]
fn test_analytic_longitudes_normalized() {
    let adapter = EphemerisAdapter::analytic();
    for body in ALL_BODIES {
        match adapter.position(body, J2000 + 1234.5, &Observer::Geocentric) {
            Ok(pos) => assert!((0.0..360.0).contains(&pos.longitude), "{body}: {}", pos.longitude),
            Err(e) => assert_eq!(e.kind(), ErrorKind::EphemerisUnavailable, "{body}"),
        }
    }
}

#[test]
fn test_asteroids_unavailable_analytically() {
    let adapter = EphemerisAdapter::analytic();
    let err = adapter.position(Body::Chiron, J2000, &Observer::Geocentric).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EphemerisUnavailable);
    assert!(err.to_string().contains("Chiron"));
}

#[test]
fn test_sun_and_moon_at_j2000() {
    let adapter = EphemerisAdapter::analytic();
    let sun = adapter.longitude(Body::Sun, J2000).unwrap();
    assert!((sun - 280.37).abs() < 0.05, "{sun}");
    let moon = adapter.longitude(Body::Moon, J2000).unwrap();
    assert!((moon - 223.3).abs() < 0.5, "{moon}");
    let speed = adapter.speed(Body::Sun, J2000).unwrap();
    assert!((speed - 1.019).abs() < 0.01, "{speed}");
}

#[test]
fn test_julian_day_round_trip() {
    let adapter = EphemerisAdapter::analytic();
    let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    assert!((adapter.julian_day(dt) - J2000).abs() < 1e-9);
    let dt = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
    assert_eq!(julian_day_to_datetime(adapter.julian_day(dt)).unwrap(), dt);
}

#[test]
fn test_topocentric_moon_parallax() {
    let adapter = EphemerisAdapter::analytic();
    let location = GeoLocation::new(51.5, 0.0).unwrap();
    let geo = adapter.longitude(Body::Moon, J2000).unwrap();
    let topo = adapter
        .position(
            Body::Moon,
            J2000,
            &Observer::Topocentric {
                location,
                elevation_m: 0.0,
            },
        )
        .unwrap()
        .longitude;
    let shift = aphrodite_core::math::angular_separation(geo, topo);
    // horizontal parallax of the Moon is about one degree
    assert!(shift > 0.0 && shift < 1.1, "{shift}");
}

#[cfg(feature = "swiss-ephemeris")]
#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_swiss_matches_analytic_sun() {
    use aphrodite_core::ephemeris::SwissEphemeris;
    use std::sync::Arc;

    let swiss = EphemerisAdapter::new(Arc::new(SwissEphemeris::new(None).unwrap()));
    let analytic = EphemerisAdapter::analytic();
    let a = swiss.longitude(Body::Sun, J2000).unwrap();
    let b = analytic.longitude(Body::Sun, J2000).unwrap();
    assert!(aphrodite_core::math::angular_separation(a, b) < 0.02);
    assert!(swiss.position(Body::Chiron, J2000, &Observer::Geocentric).is_ok());
}
