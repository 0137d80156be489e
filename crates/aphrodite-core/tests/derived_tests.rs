use aphrodite_core::aspects::{HasLongitude, LongitudePoint};
use aphrodite_core::config::{default_parts, PartFormula};
use aphrodite_core::derived::{compute_midpoints, resolve_parts, ArabicPart};
use aphrodite_core::math::{angular_separation, antiscion, contra_antiscion, shortest_arc_midpoint};
use aphrodite_core::{ChartError, ErrorKind};
use std::collections::HashMap;

fn pool(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_mirror_points_are_involutive() {
    let mut lon = -720.0;
    while lon < 720.0 {
        assert!(angular_separation(antiscion(antiscion(lon)), lon) < 1e-9, "{lon}");
        assert!(angular_separation(contra_antiscion(contra_antiscion(lon)), lon) < 1e-9, "{lon}");
        lon += 7.3;
    }
    assert!((antiscion(100.0) - 80.0).abs() < 1e-12);
    assert!((contra_antiscion(100.0) - 260.0).abs() < 1e-12);
}

#[test]
fn test_midpoint_properties() {
    for lon in [0.0, 17.5, 179.9, 359.99] {
        assert!(angular_separation(shortest_arc_midpoint(lon, lon), lon) < 1e-12);
    }
    assert!(shortest_arc_midpoint(359.0, 1.0).abs() < 1e-12);
    assert!((shortest_arc_midpoint(10.0, 50.0) - 30.0).abs() < 1e-12);
    assert!((shortest_arc_midpoint(300.0, 100.0) - 20.0).abs() < 1e-12);
}

#[test]
fn test_midpoints_of_every_pair() {
    let points = [
        LongitudePoint::new("Sun", 10.0, None),
        LongitudePoint::new("Moon", 70.0, None),
        LongitudePoint::new("Venus", 350.0, None),
    ];
    let refs: Vec<&dyn HasLongitude> = points.iter().map(|p| p as &dyn HasLongitude).collect();
    let midpoints = compute_midpoints(&refs);
    let names: Vec<&str> = midpoints.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Sun/Moon", "Sun/Venus", "Moon/Venus"]);
    assert!((midpoints[1].longitude - 0.0).abs() < 1e-12);
    assert!((midpoints[2].longitude - 30.0).abs() < 1e-12);
}

#[test]
fn test_part_of_fortune_scenario() {
    let parts = resolve_parts(
        &pool(&[("Ascendant", 10.0), ("Moon", 200.0), ("Sun", 100.0)]),
        &[PartFormula::new("Fortune", "Moon", "Sun", true)],
        true,
    )
    .unwrap();
    assert_eq!(
        parts,
        vec![ArabicPart {
            name: "Fortune".to_string(),
            longitude: 110.0,
            terms: ("Ascendant".to_string(), "Moon".to_string(), "Sun".to_string()),
        }]
    );
}

#[test]
fn test_parts_may_use_cusps() {
    let mut formula = PartFormula::new("Lot of Property", "Cusp 2", "Jupiter", false);
    formula.base = "Cusp 1".to_string();
    let parts = resolve_parts(&pool(&[("Cusp 1", 15.0), ("Cusp 2", 40.0), ("Jupiter", 100.0)]), &[formula], false).unwrap();
    assert!((parts[0].longitude - 315.0).abs() < 1e-12);
}

#[test]
fn test_part_cycle_reported() {
    let formulas = vec![
        PartFormula::new("Alpha", "Beta", "Sun", false),
        PartFormula::new("Beta", "Gamma", "Sun", false),
        PartFormula::new("Gamma", "Alpha", "Sun", false),
    ];
    let err = resolve_parts(&pool(&[("Ascendant", 1.0), ("Sun", 2.0)]), &formulas, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvableDependency);
    if let ChartError::UnresolvableDependency { names, .. } = err {
        assert_eq!(names.len(), 3);
    }
}

#[test]
fn test_default_parts_need_the_classical_planets() {
    let err = resolve_parts(&pool(&[("Ascendant", 1.0), ("Sun", 2.0), ("Moon", 3.0)]), &default_parts(), true)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvableDependency);
}
