use crate::chart::{build_angles, AngleKind, Chart, ChartAssembler, ChartKind, ChartMetadata};
use crate::derived::DerivedPoints;
use crate::error::{ChartError, ChartResult};
use crate::math::normalize_degrees;
use crate::predictive::settings_like;

/// Harmonic chart of order `n`: every longitude multiplied by `n`, houses
/// dropped, aspects recomputed. `n = 1` reproduces the natal longitudes.
pub fn harmonic_chart(assembler: &ChartAssembler, natal: &Chart, n: u32) -> ChartResult<Chart> {
    if n == 0 {
        return Err(ChartError::MalformedInput("harmonic must be at least 1".to_string()));
    }
    let factor = f64::from(n);
    let harmonic = |lon: f64| normalize_degrees(lon * factor);

    let points: Vec<_> = natal
        .points()
        .iter()
        .map(|p| p.relocated(harmonic(p.longitude), p.speed_longitude * factor))
        .collect();

    let angle_at = |kind: AngleKind| natal.angle(kind).map(|a| harmonic(a.longitude));
    let angles = match (angle_at(AngleKind::Ascendant), angle_at(AngleKind::Midheaven)) {
        (Some(asc), Some(mc)) => build_angles(asc, mc, angle_at(AngleKind::Vertex), angle_at(AngleKind::EastPoint)),
        _ => Vec::new(),
    };

    let aspects = assembler.aspects_for(&points, &angles, &settings_like(natal));
    let metadata = ChartMetadata {
        kind: ChartKind::Harmonic(n),
        house_system: None,
        annotations: Vec::new(),
        ..natal.metadata().clone()
    };
    Ok(Chart::from_parts(metadata, points, angles, None, aspects, DerivedPoints::default()))
}
