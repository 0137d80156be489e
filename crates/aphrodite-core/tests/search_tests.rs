use aphrodite_core::ephemeris::time::J2000;
use aphrodite_core::search::{
    find_stations, next_station, search_stations_concurrently, HeliacalKind, HeliacalSearch, HeliacalTarget, SearchOptions,
    SearchWindow, StationKind,
};
use aphrodite_core::{Body, EngineConfig, EphemerisAdapter, ErrorKind, GeoLocation};

#[test]
fn test_mercury_stations_in_2000() {
    let adapter = EphemerisAdapter::analytic();
    let window = SearchWindow::new(J2000, J2000 + 365.0, 1.0).unwrap();
    let stations = find_stations(&adapter, Body::Mercury, &window, &SearchOptions::default()).unwrap();

    // three retrograde periods: February, June and October
    assert_eq!(stations.len(), 6);
    assert_eq!(stations[0].kind, StationKind::StationRetrograde);
    assert!(stations[0].julian_day > J2000 + 45.0 && stations[0].julian_day < J2000 + 57.0);
    for pair in stations.windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind);
        assert!(pair[0].julian_day < pair[1].julian_day);
    }
    for station in &stations {
        let speed = adapter.speed(Body::Mercury, station.julian_day).unwrap();
        assert!(speed.abs() < 1e-4, "{speed}");
    }
}

#[test]
fn test_no_station_in_window() {
    let adapter = EphemerisAdapter::analytic();
    // direct Mercury from early January into February 2000
    let window = SearchWindow::new(J2000 + 1.0, J2000 + 30.0, 1.0).unwrap();
    let err = next_station(&adapter, Body::Mercury, &window, &SearchOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EventNotFound);
}

#[tokio::test]
async fn test_concurrent_stations_keep_order() {
    let adapter = EphemerisAdapter::analytic();
    let window = SearchWindow::new(J2000, J2000 + 400.0, 1.0).unwrap();
    let bodies = vec![Body::Mars, Body::Mercury, Body::Jupiter];
    let results = search_stations_concurrently(adapter.clone(), bodies.clone(), window, SearchOptions::default())
        .await
        .unwrap();

    let order: Vec<Body> = results.iter().map(|(b, _)| *b).collect();
    assert_eq!(order, bodies);
    for (body, stations) in &results {
        let sequential = find_stations(&adapter, *body, &window, &SearchOptions::default()).unwrap();
        assert_eq!(stations.len(), sequential.len(), "{body}");
    }
    assert!(results[1].1.len() >= 6);
}

#[test]
fn test_sirius_heliacal_rising_at_cairo() {
    let adapter = EphemerisAdapter::analytic();
    let config = EngineConfig::default();
    let sirius = config.fixed_star("Sirius").unwrap().clone();
    let cairo = GeoLocation::new(30.04, 31.24).unwrap();
    let search = HeliacalSearch::new(&adapter, cairo, 10.0, config.precession_arcsec_per_year);

    // 1 June 2000 onwards; Sirius reappears before dawn in early August
    let window = SearchWindow::new(2_451_696.5, 2_451_816.5, 1.0).unwrap();
    let event = search
        .find(&HeliacalTarget::Star(sirius), HeliacalKind::Rising, &window, &SearchOptions::default())
        .unwrap();
    assert_eq!(event.target, "Sirius");
    assert_eq!(event.kind, HeliacalKind::Rising);
    // 31 July to 8 August
    assert!(event.julian_day > 2_451_756.5 && event.julian_day < 2_451_764.5, "{}", event.instant);
    // first visible morning: at least the arcus visionis, less than a day's gain beyond it
    assert!(event.sun_depression >= 10.0 && event.sun_depression < 11.0, "{}", event.sun_depression);
}
