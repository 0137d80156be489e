use aphrodite_config::{parse_engine_settings, EphemerisBackend};
use aphrodite_core::HouseSystem;

#[test]
fn test_empty_file_uses_defaults() {
    let settings = parse_engine_settings("").unwrap();
    assert_eq!(settings.ephemeris, EphemerisBackend::Analytic);
    assert_eq!(settings.chart.house_system, HouseSystem::Placidus);
    assert_eq!(settings.engine.arabic_parts.len(), 10);
}

#[test]
fn test_partial_tables() {
    let text = r#"
[engine]
modern_rulers = true

[engine.orbs]
transit = 2.0

[chart]
house_system = "whole_sign"

[ephemeris]
backend = "swiss"
"#;
    let settings = parse_engine_settings(text).unwrap();
    assert!(settings.engine.modern_rulers);
    assert_eq!(settings.engine.orbs.transit, 2.0);
    assert_eq!(settings.engine.orbs.midpoint, 1.5);
    assert_eq!(settings.chart.house_system, HouseSystem::WholeSign);
    assert_eq!(settings.ephemeris, EphemerisBackend::Swiss { path: None });
}

#[test]
fn test_unknown_backend_rejected() {
    let err = parse_engine_settings("[ephemeris]\nbackend = \"jpl\"\n").unwrap_err();
    assert!(err.to_string().contains("jpl"));
}

#[test]
fn test_invalid_engine_rejected() {
    let err = parse_engine_settings("[engine.search]\ntolerance_days = -1.0\n").unwrap_err();
    assert!(err.to_string().contains("Invalid [engine]"));
}

#[test]
fn test_sample_config_parses() {
    let text = include_str!("../../../configs/engine.toml");
    assert!(parse_engine_settings(text).is_ok());
}
